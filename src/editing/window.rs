use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Strand;

/// Errors raised while building or parsing a target window.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    /// Literal is not of the form `start-end` with integer bounds.
    #[error("invalid region '{0}', expected 'start-end' such as '3-9'")]
    Malformed(String),
    /// Windows are 1-based, so a start of zero cannot be expressed.
    #[error("region start must be >= 1")]
    ZeroStart,
    /// End precedes start.
    #[error("region end {end} is before start {start}")]
    EndBeforeStart {
        /// 1-based start position.
        start: usize,
        /// 1-based end position.
        end: usize,
    },
}

/// Window inspected when none is configured: guide positions 3-9.
pub const DEFAULT_WINDOW: TargetWindow = TargetWindow { start: 3, end: 9 };

/// Inclusive 1-based span of guide positions inspected for conversions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "WindowBounds")]
pub struct TargetWindow {
    start: usize,
    end: usize,
}

impl TargetWindow {
    /// Create a window from 1-based inclusive bounds.
    pub fn new(start: usize, end: usize) -> Result<Self, RangeError> {
        if start == 0 {
            return Err(RangeError::ZeroStart);
        }
        if end < start {
            return Err(RangeError::EndBeforeStart { start, end });
        }
        Ok(Self { start, end })
    }

    /// 1-based first position.
    pub fn start(&self) -> usize {
        self.start
    }

    /// 1-based last position (inclusive).
    pub fn end(&self) -> usize {
        self.end
    }

    /// Number of positions covered.
    pub fn len(&self) -> usize {
        (self.end - self.start).saturating_add(1)
    }

    /// Always false; a valid window covers at least one position.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Half-open 0-based range relative to the guide.
    pub fn zero_based(&self) -> Range<usize> {
        (self.start - 1)..self.end
    }

    /// Project the window onto absolute positions of a sequence in which the
    /// search literal (guide or its reverse complement) starts at `offset`.
    ///
    /// On the reverse strand the window counts from the guide's own 5' end,
    /// which is the right-hand end of the reverse-complement match, so the
    /// offsets are mirrored about `guide_len`. Positions that would precede
    /// the start of the sequence are dropped.
    /// Bounds saturate instead of overflowing, so callers must still clamp
    /// the range to the sequence length.
    pub fn project(&self, offset: usize, guide_len: usize, strand: Strand) -> Range<usize> {
        let (lo, hi) = match strand {
            Strand::Forward => {
                let rel = self.zero_based();
                (offset.saturating_add(rel.start), offset.saturating_add(rel.end))
            }
            Strand::Reverse => {
                let anchor = offset.saturating_add(guide_len);
                let lo = anchor.saturating_sub(self.end);
                let hi = anchor
                    .checked_sub(self.start)
                    .map_or(0, |last| last.saturating_add(1));
                (lo, hi)
            }
        };
        lo..hi.max(lo)
    }
}

#[derive(Deserialize)]
struct WindowBounds {
    start: usize,
    end: usize,
}

impl TryFrom<WindowBounds> for TargetWindow {
    type Error = RangeError;

    fn try_from(bounds: WindowBounds) -> Result<Self, Self::Error> {
        Self::new(bounds.start, bounds.end)
    }
}

impl fmt::Display for TargetWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl FromStr for TargetWindow {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || RangeError::Malformed(s.to_string());
        let (start, end) = s.trim().split_once('-').ok_or_else(malformed)?;
        let start: usize = start.trim().parse().map_err(|_| malformed())?;
        let end: usize = end.trim().parse().map_err(|_| malformed())?;
        Self::new(start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_start_end_literal() {
        let window: TargetWindow = "3-9".parse().unwrap();
        assert_eq!((window.start(), window.end()), (3, 9));
        assert_eq!(window.zero_based(), 2..9);
        assert_eq!(window.len(), 7);
        assert_eq!(window.to_string(), "3-9");
    }

    #[test]
    fn rejects_malformed_literals() {
        for literal in ["", "3", "a-9", "3-b", "3:9", "-3-9", "3-9-10"] {
            assert!(
                matches!(literal.parse::<TargetWindow>(), Err(RangeError::Malformed(_))),
                "{literal:?} should be malformed"
            );
        }
        assert_eq!("0-4".parse::<TargetWindow>(), Err(RangeError::ZeroStart));
        assert_eq!(
            "9-3".parse::<TargetWindow>(),
            Err(RangeError::EndBeforeStart { start: 9, end: 3 })
        );
    }

    #[test]
    fn forward_projection_shifts_by_offset() {
        let window = TargetWindow::new(1, 2).unwrap();
        assert_eq!(window.project(0, 4, Strand::Forward), 0..2);
        assert_eq!(window.project(7, 4, Strand::Forward), 7..9);
    }

    #[test]
    fn reverse_projection_mirrors_about_guide_length() {
        let window = TargetWindow::new(1, 2).unwrap();
        // L = 4, s = 1, e = 2 -> offset + (L - e) ..= offset + (L - s)
        assert_eq!(window.project(0, 4, Strand::Reverse), 2..4);
        assert_eq!(window.project(10, 4, Strand::Reverse), 12..14);
    }

    #[test]
    fn reverse_projection_drops_positions_before_sequence_start() {
        let window = TargetWindow::new(1, 6).unwrap();
        assert_eq!(window.project(0, 4, Strand::Reverse), 0..4);
        assert_eq!(window.project(1, 4, Strand::Reverse), 0..5);
        let beyond = TargetWindow::new(9, 12).unwrap();
        assert_eq!(beyond.project(0, 4, Strand::Reverse), 0..0);
    }

    #[test]
    fn huge_bounds_saturate_instead_of_wrapping() {
        let forward: TargetWindow = "1-18446744073709551615".parse().unwrap();
        assert_eq!(forward.project(3, 4, Strand::Forward), 3..usize::MAX);

        let reverse: TargetWindow = "1-9223372036854775808".parse().unwrap();
        assert_eq!(reverse.project(2, 4, Strand::Reverse), 0..6);

        let far: TargetWindow = TargetWindow::new(usize::MAX, usize::MAX).unwrap();
        assert_eq!(far.project(usize::MAX, usize::MAX, Strand::Reverse), 0..1);
        assert_eq!(far.project(7, 4, Strand::Forward), usize::MAX..usize::MAX);
    }

    #[test]
    fn deserialized_windows_are_validated() {
        fn decode(text: &str) -> Result<TargetWindow, csv::Error> {
            csv::Reader::from_reader(text.as_bytes())
                .deserialize()
                .next()
                .expect("one record")
        }
        assert_eq!(decode("start,end\n3,9\n").unwrap(), DEFAULT_WINDOW);
        assert!(decode("start,end\n0,4\n").is_err());
        assert!(decode("start,end\n9,3\n").is_err());
    }
}
