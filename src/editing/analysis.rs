use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::table::{read_alignment_table, ColumnNames};
use super::window::DEFAULT_WINDOW;
use super::{
    AlignmentRow, AnalysisResult, EditingTally, GuideSpec, Strand, TargetWindow, WindowScanner,
};
use crate::AnalysisError;

/// Guide analysed when none is configured.
pub const DEFAULT_GUIDE: &str = "TCCCCATGCTTCCCCCAAACGCA";

/// Parameters of one analysis run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Guide sequence, 5' to 3' on its own strand.
    pub guide: String,
    /// Strand the guide targets.
    pub strand: Strand,
    /// Window of guide positions to inspect.
    pub window: TargetWindow,
}

impl Default for AnalysisConfig {
    /// [`DEFAULT_GUIDE`] on the forward strand with window 3-9.
    fn default() -> Self {
        Self {
            guide: DEFAULT_GUIDE.to_string(),
            strand: Strand::Forward,
            window: DEFAULT_WINDOW,
        }
    }
}

impl AnalysisConfig {
    /// Replace the guide sequence.
    pub fn with_guide(mut self, guide: impl Into<String>) -> Self {
        self.guide = guide.into();
        self
    }

    /// Replace the strand.
    pub fn with_strand(mut self, strand: Strand) -> Self {
        self.strand = strand;
        self
    }

    /// Replace the target window.
    pub fn with_window(mut self, window: TargetWindow) -> Self {
        self.window = window;
        self
    }
}

/// Result of a run together with the configuration that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    /// Strand analysed.
    pub strand: Strand,
    /// Guide sequence exactly as configured.
    pub guide: String,
    /// Window inspected.
    pub window: TargetWindow,
    /// Aggregated statistics.
    pub result: AnalysisResult,
}

impl AnalysisReport {
    /// Reference base counted as editable.
    pub fn pre_edit_base(&self) -> char {
        self.strand.pre_edit_base() as char
    }

    /// Read base counted as an edit.
    pub fn post_edit_base(&self) -> char {
        self.strand.post_edit_base() as char
    }
}

/// Quantifies base-editing efficiency within a guide-anchored window.
///
/// Construction validates the whole configuration, so a run fails before any
/// row is touched; scanning itself cannot fail.
#[derive(Debug, Clone)]
pub struct EditingAnalyzer {
    guide: GuideSpec,
    configured_guide: String,
    window: TargetWindow,
}

impl EditingAnalyzer {
    /// Validate the configuration and prepare the guide search literal.
    pub fn new(config: &AnalysisConfig) -> Result<Self, AnalysisError> {
        let guide = GuideSpec::new(&config.guide, config.strand)?;
        Ok(Self {
            guide,
            configured_guide: config.guide.clone(),
            window: config.window,
        })
    }

    /// Validated guide.
    pub fn guide(&self) -> &GuideSpec {
        &self.guide
    }

    /// Configured window.
    pub fn window(&self) -> TargetWindow {
        self.window
    }

    /// Read a table from disk and analyse it.
    pub fn analyze_file<P: AsRef<Path>>(
        &self,
        path: P,
        columns: &ColumnNames,
    ) -> Result<AnalysisReport, AnalysisError> {
        let rows = read_alignment_table(path.as_ref(), columns)?;
        Ok(self.analyze(&rows))
    }

    /// Run the single aggregation pass over `rows`.
    pub fn analyze(&self, rows: &[AlignmentRow]) -> AnalysisReport {
        info!(
            rows = rows.len(),
            strand = %self.guide.strand(),
            window = %self.window,
            "analysing alignment rows"
        );

        let scanner = WindowScanner::new(&self.guide, self.window);
        let result = tally_rows(&scanner, rows).finish();

        if !result.has_substrate() {
            warn!(
                base = %(self.guide.strand().pre_edit_base() as char),
                "no editable substrate located in target window"
            );
        }
        info!(
            total_reads = result.total_reads,
            edited_reads = result.edited_reads,
            editable_bases = result.editable_bases,
            "analysis finished"
        );

        AnalysisReport {
            strand: self.guide.strand(),
            guide: self.configured_guide.clone(),
            window: self.window,
            result,
        }
    }
}

fn tally_row(scanner: &WindowScanner<'_>, idx: usize, row: &AlignmentRow) -> EditingTally {
    let scan = scanner.scan(row);
    if scan.is_none() {
        debug!(row = idx, "guide not found in reference");
    }
    let mut tally = EditingTally::new();
    tally.observe(row, scan);
    tally
}

#[cfg_attr(feature = "parallel", allow(dead_code))]
fn tally_sequential(scanner: &WindowScanner<'_>, rows: &[AlignmentRow]) -> EditingTally {
    rows.iter()
        .enumerate()
        .map(|(idx, row)| tally_row(scanner, idx, row))
        .fold(EditingTally::new(), EditingTally::merge)
}

#[cfg(not(feature = "parallel"))]
fn tally_rows(scanner: &WindowScanner<'_>, rows: &[AlignmentRow]) -> EditingTally {
    tally_sequential(scanner, rows)
}

#[cfg(feature = "parallel")]
fn tally_rows(scanner: &WindowScanner<'_>, rows: &[AlignmentRow]) -> EditingTally {
    tally_parallel(scanner, rows)
}

#[cfg(feature = "parallel")]
fn tally_parallel(scanner: &WindowScanner<'_>, rows: &[AlignmentRow]) -> EditingTally {
    use rayon::prelude::*;

    rows.par_iter()
        .enumerate()
        .map(|(idx, row)| tally_row(scanner, idx, row))
        .reduce(EditingTally::new, EditingTally::merge)
}
