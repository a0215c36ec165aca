//! # sgRNA Window Editing Efficiency
//!
//! Quantifies base-editing efficiency at a fixed window of a guide target
//! from an allele frequency table: aligned reads, their references and the
//! number of reads sharing each alignment.
//!
//! ## Pipeline
//!
//! 1. **Guide location**: exact search for the guide (forward strand) or its
//!    reverse complement (reverse strand) in each reference
//! 2. **Window scan**: project the 1-based window onto the match and look for
//!    C→T (forward) or G→A (reverse) conversions
//! 3. **Aggregation**: read-weighted totals reduced into one percentage,
//!    `100 * edited_reads / total_reads`
//!
//! ## Usage Example
//!
//! ```
//! use sgrna_analyzer::{AlignmentRow, AnalysisConfig, EditingAnalyzer, Strand};
//!
//! let config = AnalysisConfig::default()
//!     .with_guide("ACGT")
//!     .with_strand(Strand::Forward)
//!     .with_window("1-2".parse()?);
//! let analyzer = EditingAnalyzer::new(&config)?;
//! let report = analyzer.analyze(&[AlignmentRow::new("ATGTAA", "ACGTAA", 5)]);
//! assert_eq!(report.result.edited_reads, 5);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]

pub mod editing; // Guide location, window scanning and aggregation

pub use editing::{
    AlignmentRow, AnalysisConfig, AnalysisReport, AnalysisResult, ColumnNames, EditingAnalyzer,
    EditingTally, GuideSpec, ParseStrandError, RangeError, SequenceError, Strand, TableError,
    TargetWindow,
};

use thiserror::Error;

/// Errors that abort an analysis run before or while loading input.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Guide contains symbols outside A/C/G/T or is empty
    #[error("invalid guide sequence: {0}")]
    InvalidSequence(#[from] SequenceError),

    /// Window literal is malformed or inverted
    #[error("invalid target window: {0}")]
    InvalidRange(#[from] RangeError),

    /// Strand label not recognised
    #[error("invalid strand: {0}")]
    InvalidStrand(#[from] ParseStrandError),

    /// Table unreadable or missing required columns
    #[error("invalid input table: {0}")]
    InputFormat(#[from] TableError),
}

/// Build an analyzer from raw textual settings, as supplied on a command line.
pub fn analyzer_from_args(
    guide: &str,
    strand: &str,
    region: &str,
) -> Result<EditingAnalyzer, AnalysisError> {
    let config = AnalysisConfig::default()
        .with_guide(guide)
        .with_strand(strand.parse()?)
        .with_window(region.parse()?);
    EditingAnalyzer::new(&config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn textual_settings_are_validated() {
        assert!(analyzer_from_args("ACGT", "+", "1-2").is_ok());
        assert!(matches!(
            analyzer_from_args("ACGT", "sideways", "1-2"),
            Err(AnalysisError::InvalidStrand(_))
        ));
        assert!(matches!(
            analyzer_from_args("ACGT", "-", "2-x"),
            Err(AnalysisError::InvalidRange(_))
        ));
        assert!(matches!(
            analyzer_from_args("ACGTZ", "forward", "1-2"),
            Err(AnalysisError::InvalidSequence(_))
        ));
    }
}
