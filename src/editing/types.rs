use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reading orientation of the guide relative to the reference sequence.
///
/// The strand selects both the base conversion that counts as an edit
/// (C→T forward, G→A reverse) and how window offsets map onto the reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strand {
    /// Guide read as written; C→T conversions.
    #[default]
    Forward,
    /// Guide matched as its reverse complement; G→A conversions.
    Reverse,
}

impl Strand {
    /// Reference base that marks a candidate editing site.
    pub fn pre_edit_base(self) -> u8 {
        match self {
            Strand::Forward => b'C',
            Strand::Reverse => b'G',
        }
    }

    /// Read base that marks a completed edit.
    pub fn post_edit_base(self) -> u8 {
        match self {
            Strand::Forward => b'T',
            Strand::Reverse => b'A',
        }
    }

    /// Lowercase label used in reports and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Strand::Forward => "forward",
            Strand::Reverse => "reverse",
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a strand label is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown strand '{0}' (expected forward, reverse, + or -)")]
pub struct ParseStrandError(pub String);

impl FromStr for Strand {
    type Err = ParseStrandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        match label {
            "+" => return Ok(Strand::Forward),
            "-" => return Ok(Strand::Reverse),
            _ => {}
        }
        if label.eq_ignore_ascii_case("forward") {
            Ok(Strand::Forward)
        } else if label.eq_ignore_ascii_case("reverse") {
            Ok(Strand::Reverse)
        } else {
            Err(ParseStrandError(s.to_string()))
        }
    }
}

/// One distinct alignment pattern from an allele frequency table.
///
/// Position `i` of the aligned read corresponds to position `i` of the
/// reference; gaps are carried through as ordinary symbols.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentRow {
    /// Aligned read sequence.
    pub aligned_sequence: String,
    /// Reference sequence the read was aligned against.
    pub reference_sequence: String,
    /// Number of reads sharing this alignment.
    pub read_count: u64,
}

impl AlignmentRow {
    /// Construct a row from its three fields.
    pub fn new(
        aligned_sequence: impl Into<String>,
        reference_sequence: impl Into<String>,
        read_count: u64,
    ) -> Self {
        Self {
            aligned_sequence: aligned_sequence.into(),
            reference_sequence: reference_sequence.into(),
            read_count,
        }
    }

    /// Aligned read as raw bytes.
    pub fn aligned(&self) -> &[u8] {
        self.aligned_sequence.as_bytes()
    }

    /// Reference as raw bytes.
    pub fn reference(&self) -> &[u8] {
        self.reference_sequence.as_bytes()
    }
}
