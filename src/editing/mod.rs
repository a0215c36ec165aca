//! Base-editing quantification within a guide-anchored target window.
//!
//! The pipeline is a single pass: each [`AlignmentRow`] is searched for the
//! guide ([`GuideSpec`]), the [`TargetWindow`] is projected onto the match
//! ([`WindowScanner`]) and the outcome is folded into an [`EditingTally`].

mod analysis;
mod guide;
mod report;
mod scanner;
mod table;
mod tally;
mod types;
mod window;

pub use analysis::{AnalysisConfig, AnalysisReport, EditingAnalyzer, DEFAULT_GUIDE};
pub use guide::{reverse_complement, GuideSpec, SequenceError};
pub use report::{efficiency_line, render_report, write_report};
pub use scanner::{RowScan, WindowScanner};
pub use table::{
    parse_alignment_table, read_alignment_table, ColumnNames, TableError, ALIGNED_COLUMN,
    READS_COLUMN, REFERENCE_COLUMN,
};
pub use tally::{AnalysisResult, EditingTally};
pub use types::{AlignmentRow, ParseStrandError, Strand};
pub use window::{RangeError, TargetWindow, DEFAULT_WINDOW};
