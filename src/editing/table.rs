//! Decoding of allele frequency tables into typed [`AlignmentRow`]s.
//!
//! Column labels are resolved once against the header; every data record is
//! then projected onto the three required fields and deserialized.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use thiserror::Error;
use tracing::debug;

use super::AlignmentRow;

/// Default label of the aligned read column.
pub const ALIGNED_COLUMN: &str = "Aligned_Sequence";
/// Default label of the reference column.
pub const REFERENCE_COLUMN: &str = "Reference_Sequence";
/// Default label of the read count column.
pub const READS_COLUMN: &str = "#Reads";

/// Errors raised while reading an alignment table.
#[derive(Debug, Error)]
pub enum TableError {
    /// Underlying reader failed.
    #[error("failed to read alignment table: {0}")]
    Io(#[from] std::io::Error),
    /// Delimited parsing failed (e.g. ragged rows).
    #[error("malformed alignment table: {0}")]
    Csv(#[from] csv::Error),
    /// Header lacks one or more required columns.
    #[error("input table is missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    /// Whitespace-delimited row with the wrong number of fields.
    #[error("line {line}: expected {expected} fields, found {found}")]
    MalformedRow {
        /// 1-based line number.
        line: u64,
        /// Field count of the header.
        expected: usize,
        /// Field count of the row.
        found: usize,
    },
    /// Read count is not a non-negative integer.
    #[error("line {line}: invalid read count '{value}': {message}")]
    InvalidReadCount {
        /// 1-based line number.
        line: u64,
        /// Raw field text.
        value: String,
        /// Decoder message.
        message: String,
    },
}

/// Header labels of the three required columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnNames {
    /// Aligned read column.
    pub aligned: String,
    /// Reference column.
    pub reference: String,
    /// Read count column.
    pub reads: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            aligned: ALIGNED_COLUMN.to_string(),
            reference: REFERENCE_COLUMN.to_string(),
            reads: READS_COLUMN.to_string(),
        }
    }
}

impl ColumnNames {
    fn labels(&self) -> [&str; 3] {
        [self.aligned.as_str(), self.reference.as_str(), self.reads.as_str()]
    }
}

#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    positions: [usize; 3],
    width: usize,
}

impl ColumnIndex {
    fn resolve<'h>(
        header: impl IntoIterator<Item = &'h str>,
        names: &ColumnNames,
    ) -> Result<Self, TableError> {
        let header: Vec<&str> = header.into_iter().collect();
        let mut positions = [0usize; 3];
        let mut missing = Vec::new();
        for (slot, label) in names.labels().into_iter().enumerate() {
            match header.iter().position(|field| *field == label) {
                Some(idx) => positions[slot] = idx,
                None => missing.push(label.to_string()),
            }
        }
        if !missing.is_empty() {
            return Err(TableError::MissingColumns(missing));
        }
        Ok(Self {
            positions,
            width: header.len(),
        })
    }

    fn decode(&self, record: &StringRecord, line: u64) -> Result<AlignmentRow, TableError> {
        let projected: StringRecord = self
            .positions
            .iter()
            .map(|&idx| record.get(idx).unwrap_or(""))
            .collect();
        projected
            .deserialize(None)
            .map_err(|err| TableError::InvalidReadCount {
                line,
                value: record.get(self.positions[2]).unwrap_or("").to_string(),
                message: err.to_string(),
            })
    }
}

/// Read an alignment table from disk.
pub fn read_alignment_table<P: AsRef<Path>>(
    path: P,
    columns: &ColumnNames,
) -> Result<Vec<AlignmentRow>, TableError> {
    let file = File::open(path.as_ref())?;
    parse_alignment_table(file, columns)
}

/// Read an alignment table from any reader.
///
/// Tab-separated input is expected. If its header does not carry the
/// required columns but a whitespace-split header does, the input is decoded
/// as whitespace-delimited instead.
pub fn parse_alignment_table<R: Read>(
    mut reader: R,
    columns: &ColumnNames,
) -> Result<Vec<AlignmentRow>, TableError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;

    match parse_tab_separated(&text, columns) {
        Err(TableError::MissingColumns(missing)) => {
            if whitespace_header_matches(&text, columns) {
                debug!("tab-separated header incomplete; decoding as whitespace-delimited");
                parse_whitespace_delimited(&text, columns)
            } else {
                Err(TableError::MissingColumns(missing))
            }
        }
        other => other,
    }
}

fn parse_tab_separated(text: &str, columns: &ColumnNames) -> Result<Vec<AlignmentRow>, TableError> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .from_reader(text.as_bytes());

    let index = ColumnIndex::resolve(reader.headers()?.iter(), columns)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map(|pos| pos.line()).unwrap_or(0);
        rows.push(index.decode(&record, line)?);
    }
    Ok(rows)
}

fn non_blank_lines(text: &str) -> impl Iterator<Item = (u64, &str)> {
    text.lines()
        .enumerate()
        .map(|(idx, line)| (idx as u64 + 1, line))
        .filter(|(_, line)| !line.trim().is_empty())
}

fn whitespace_header_matches(text: &str, columns: &ColumnNames) -> bool {
    non_blank_lines(text)
        .next()
        .map(|(_, header)| ColumnIndex::resolve(header.split_whitespace(), columns).is_ok())
        .unwrap_or(false)
}

fn parse_whitespace_delimited(
    text: &str,
    columns: &ColumnNames,
) -> Result<Vec<AlignmentRow>, TableError> {
    let mut lines = non_blank_lines(text);
    let header = match lines.next() {
        Some((_, header)) => header,
        None => return Ok(Vec::new()),
    };
    let index = ColumnIndex::resolve(header.split_whitespace(), columns)?;

    let mut rows = Vec::new();
    for (line, content) in lines {
        let record: StringRecord = content.split_whitespace().collect();
        if record.len() != index.width {
            return Err(TableError::MalformedRow {
                line,
                expected: index.width,
                found: record.len(),
            });
        }
        rows.push(index.decode(&record, line)?);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "Aligned_Sequence\tReference_Sequence\tReference_Name\t#Reads\t%Reads\n\
                         ATGTAA\tACGTAA\tReference\t5\t62.5\n\
                         ACGTAA\tACGTAA\tReference\t3\t37.5\n";

    #[test]
    fn decodes_tab_separated_table() {
        let rows = parse_alignment_table(TABLE.as_bytes(), &ColumnNames::default()).unwrap();
        assert_eq!(
            rows,
            vec![
                AlignmentRow::new("ATGTAA", "ACGTAA", 5),
                AlignmentRow::new("ACGTAA", "ACGTAA", 3),
            ]
        );
    }

    #[test]
    fn header_only_table_is_empty() {
        let rows = parse_alignment_table(
            "Aligned_Sequence\tReference_Sequence\t#Reads\n".as_bytes(),
            &ColumnNames::default(),
        )
        .unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn reports_every_missing_column() {
        let err = parse_alignment_table(
            "Aligned_Sequence\tCount\nACGT\t1\n".as_bytes(),
            &ColumnNames::default(),
        )
        .unwrap_err();
        match err {
            TableError::MissingColumns(missing) => {
                assert_eq!(missing, vec!["Reference_Sequence", "#Reads"])
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn falls_back_to_whitespace_delimiters() {
        let text = "Aligned_Sequence   Reference_Sequence  #Reads\n\
                    ATGTAA ACGTAA 5\n\
                    \n\
                    ACGTAA  ACGTAA 3\n";
        let rows = parse_alignment_table(text.as_bytes(), &ColumnNames::default()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].read_count, 3);
    }

    #[test]
    fn rejects_negative_read_count() {
        let text = "Aligned_Sequence\tReference_Sequence\t#Reads\nACGT\tACGT\t-2\n";
        let err = parse_alignment_table(text.as_bytes(), &ColumnNames::default()).unwrap_err();
        match err {
            TableError::InvalidReadCount { line, value, .. } => {
                assert_eq!((line, value.as_str()), (2, "-2"))
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn custom_column_names_are_honoured() {
        let columns = ColumnNames {
            aligned: "read".to_string(),
            reference: "ref".to_string(),
            reads: "n".to_string(),
        };
        let rows = parse_alignment_table("n\tref\tread\n4\tACGT\tATGT\n".as_bytes(), &columns)
            .unwrap();
        assert_eq!(rows, vec![AlignmentRow::new("ATGT", "ACGT", 4)]);
    }
}
