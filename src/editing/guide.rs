use thiserror::Error;

use super::Strand;

/// Errors raised while validating a guide sequence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    /// Guide sequence has no bases.
    #[error("guide sequence is empty")]
    Empty,
    /// Guide contains a symbol outside A/C/G/T.
    #[error("unsupported nucleotide '{base}' at position {position} of guide sequence")]
    InvalidBase {
        /// Offending symbol.
        base: char,
        /// 0-based position of the symbol in the guide.
        position: usize,
    },
}

fn complement(base: u8) -> Option<u8> {
    match base {
        b'A' => Some(b'T'),
        b'T' => Some(b'A'),
        b'C' => Some(b'G'),
        b'G' => Some(b'C'),
        _ => None,
    }
}

/// Reverse complement of an uppercase A/C/G/T sequence.
pub fn reverse_complement(sequence: &[u8]) -> Result<Vec<u8>, SequenceError> {
    let len = sequence.len();
    sequence
        .iter()
        .rev()
        .enumerate()
        .map(|(idx, &base)| {
            complement(base).ok_or(SequenceError::InvalidBase {
                base: base as char,
                position: len - 1 - idx,
            })
        })
        .collect()
}

/// Validated guide plus the literal searched for in each reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuideSpec {
    sequence: String,
    strand: Strand,
    target: Vec<u8>,
}

impl GuideSpec {
    /// Validate the guide and precompute the strand-specific search literal.
    ///
    /// Lowercase input is accepted and normalised to uppercase.
    pub fn new(sequence: &str, strand: Strand) -> Result<Self, SequenceError> {
        let sequence = sequence.trim().to_ascii_uppercase();
        if sequence.is_empty() {
            return Err(SequenceError::Empty);
        }
        if let Some((position, base)) = sequence
            .bytes()
            .enumerate()
            .find(|(_, base)| complement(*base).is_none())
        {
            return Err(SequenceError::InvalidBase {
                base: base as char,
                position,
            });
        }

        let target = match strand {
            Strand::Forward => sequence.as_bytes().to_vec(),
            Strand::Reverse => reverse_complement(sequence.as_bytes())?,
        };

        Ok(Self {
            sequence,
            strand,
            target,
        })
    }

    /// Guide as supplied (uppercased).
    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    /// Strand the guide is matched on.
    pub fn strand(&self) -> Strand {
        self.strand
    }

    /// Literal searched for in references: the guide itself on the forward
    /// strand, its reverse complement on the reverse strand.
    pub fn target(&self) -> &[u8] {
        &self.target
    }

    /// Length of the search literal.
    pub fn len(&self) -> usize {
        self.target.len()
    }

    /// Always false; construction rejects empty guides.
    pub fn is_empty(&self) -> bool {
        self.target.is_empty()
    }

    /// 0-based start of the first exact occurrence of the search literal.
    ///
    /// Later occurrences are ignored.
    pub fn locate(&self, reference: &[u8]) -> Option<usize> {
        if reference.len() < self.target.len() {
            return None;
        }
        reference
            .windows(self.target.len())
            .position(|window| window == self.target.as_slice())
    }
}
