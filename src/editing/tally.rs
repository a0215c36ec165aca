use serde::{Deserialize, Serialize};

use super::{AlignmentRow, RowScan};

/// Final read-weighted editing statistics for one run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Sum of read counts over every row, located or not.
    pub total_reads: u128,
    /// Reads whose row shows at least one in-window conversion.
    pub edited_reads: u128,
    /// Read-weighted count of in-window pre-edit reference bases.
    pub editable_bases: u128,
    /// `100 * edited_reads / total_reads`, or 0 when no editable base was seen.
    pub efficiency_percent: f64,
}

impl AnalysisResult {
    /// Whether any editable substrate was located.
    pub fn has_substrate(&self) -> bool {
        self.editable_bases > 0
    }
}

/// Running sums accumulated over the rows of a table.
///
/// Sums are `u128`: a `u64` read count times an in-memory sequence length
/// summed over an in-memory table cannot reach its limit.
///
/// Tallies over disjoint row sets combine with [`EditingTally::merge`]; the
/// merge is associative and commutative, so row order never affects totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EditingTally {
    /// Sum of read counts.
    pub total_reads: u128,
    /// Reads from edited rows.
    pub edited_reads: u128,
    /// Editable positions weighted by read count.
    pub editable_bases: u128,
}

impl EditingTally {
    /// Empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one row and its scan outcome into the sums.
    pub fn observe(&mut self, row: &AlignmentRow, scan: Option<RowScan>) {
        let reads = u128::from(row.read_count);
        self.total_reads += reads;
        if let Some(scan) = scan {
            self.editable_bases += u128::from(scan.editable_bases) * reads;
            if scan.edited {
                self.edited_reads += reads;
            }
        }
    }

    /// Combine two tallies.
    pub fn merge(self, other: Self) -> Self {
        Self {
            total_reads: self.total_reads + other.total_reads,
            edited_reads: self.edited_reads + other.edited_reads,
            editable_bases: self.editable_bases + other.editable_bases,
        }
    }

    /// Compute the efficiency.
    ///
    /// The denominator is the total read count, not the editable base count.
    pub fn finish(&self) -> AnalysisResult {
        let efficiency_percent = if self.editable_bases > 0 {
            100.0 * self.edited_reads as f64 / self.total_reads as f64
        } else {
            0.0
        };
        AnalysisResult {
            total_reads: self.total_reads,
            edited_reads: self.edited_reads,
            editable_bases: self.editable_bases,
            efficiency_percent,
        }
    }
}
