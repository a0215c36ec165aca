use std::ops::Range;

use tracing::trace;

use super::{AlignmentRow, GuideSpec, Strand, TargetWindow};

/// Outcome of scanning one row whose reference carries the guide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowScan {
    /// In-window reference positions holding the pre-edit base.
    pub editable_bases: u64,
    /// Whether any such position shows the post-edit base in the read.
    pub edited: bool,
}

/// Projects the target window onto each row and checks it for conversions.
#[derive(Debug, Clone)]
pub struct WindowScanner<'g> {
    guide: &'g GuideSpec,
    window: TargetWindow,
}

impl<'g> WindowScanner<'g> {
    /// Create a scanner for a validated guide and window.
    pub fn new(guide: &'g GuideSpec, window: TargetWindow) -> Self {
        Self { guide, window }
    }

    /// Strand the scanner inspects.
    pub fn strand(&self) -> Strand {
        self.guide.strand()
    }

    /// Absolute window for a row, or `None` when the guide is absent.
    pub fn locate(&self, row: &AlignmentRow) -> Option<Range<usize>> {
        let offset = self.guide.locate(row.reference())?;
        Some(self.window.project(offset, self.guide.len(), self.strand()))
    }

    /// Scan one row. Returns `None` when the guide is not found in its reference.
    pub fn scan(&self, row: &AlignmentRow) -> Option<RowScan> {
        let span = self.locate(row)?;
        let reference = row.reference();
        let aligned = row.aligned();
        let strand = self.strand();
        let (pre, post) = (strand.pre_edit_base(), strand.post_edit_base());

        let limit = reference.len().min(aligned.len());
        let span = span.start.min(limit)..span.end.min(limit);
        trace!(start = span.start, end = span.end, "scanning window");

        let mut scan = RowScan::default();
        for pos in span {
            if reference[pos] != pre {
                continue;
            }
            scan.editable_bases += 1;
            if aligned[pos] == post {
                scan.edited = true;
            }
        }
        Some(scan)
    }
}
