#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use sgrna_analyzer::editing::render_report;
use sgrna_analyzer::{AnalysisConfig, AnalysisReport, EditingAnalyzer, Strand, TargetWindow};

/// Golden reports live under `tests/snapshots/report/<name>.txt`.
fn report_snapshot_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/snapshots/report")
        .join(format!("{name}.txt"))
}

/// Compare a rendered report with its golden file line by line.
///
/// `SGRNA_UPDATE_SNAPSHOTS=1` rewrites the golden file instead.
pub fn assert_report_snapshot(name: &str, report: &AnalysisReport) {
    let actual = render_report(report).expect("report rendering should succeed");
    let path = report_snapshot_path(name);
    if std::env::var_os("SGRNA_UPDATE_SNAPSHOTS").is_some() {
        fs::create_dir_all(path.parent().expect("snapshot directory")).expect("create snapshots");
        fs::write(&path, &actual).expect("write snapshot");
        return;
    }

    let expected = fs::read_to_string(&path)
        .unwrap_or_else(|_| panic!("golden report {} not found", path.display()));
    let expected_lines: Vec<&str> = expected.lines().map(str::trim_end).collect();
    let actual_lines: Vec<&str> = actual.lines().map(str::trim_end).collect();
    for (idx, (want, got)) in expected_lines.iter().zip(&actual_lines).enumerate() {
        assert_eq!(got, want, "{} differs at line {}", path.display(), idx + 1);
    }
    assert_eq!(
        actual_lines.len(),
        expected_lines.len(),
        "{} has a different number of lines",
        path.display()
    );
}

/// Analyzer for a guide, strand and window literal.
pub fn analyzer(guide: &str, strand: Strand, window: &str) -> EditingAnalyzer {
    let window: TargetWindow = window.parse().expect("valid window literal");
    let config = AnalysisConfig::default()
        .with_guide(guide)
        .with_strand(strand)
        .with_window(window);
    EditingAnalyzer::new(&config).expect("valid configuration")
}

pub fn assert_percent(report: &AnalysisReport, expected: f64) {
    let actual = report.result.efficiency_percent;
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}% efficiency, got {actual}%"
    );
}
