use anyhow::{anyhow, Result};
use std::io::Write;

use super::AnalysisReport;

const TITLE: &str = "sgRNA window editing efficiency analysis";

/// Efficiency line printed on the console and closing the report.
pub fn efficiency_line(report: &AnalysisReport) -> String {
    format!(
        "Window editing efficiency: {:.4}%",
        report.result.efficiency_percent
    )
}

/// Write a report as one `Label: value` pair per line.
pub fn write_report<W: Write>(writer: &mut W, report: &AnalysisReport) -> Result<()> {
    let result = &report.result;
    writeln!(writer, "{TITLE}")?;
    writeln!(writer, "Strand: {}", report.strand)?;
    writeln!(
        writer,
        "Base change: {} to {}",
        report.pre_edit_base(),
        report.post_edit_base()
    )?;
    writeln!(writer, "sgRNA sequence: {}", report.guide)?;
    writeln!(writer, "Target window: {}", report.window)?;
    writeln!(writer, "Total reads: {}", result.total_reads)?;
    writeln!(writer, "Edited reads in window: {}", result.edited_reads)?;
    writeln!(writer, "Editable bases in window: {}", result.editable_bases)?;
    writeln!(writer)?;
    writeln!(writer, "{}", efficiency_line(report))?;

    writer.flush()?;
    Ok(())
}

/// Render a report into a string (useful for tests and snapshots).
pub fn render_report(report: &AnalysisReport) -> Result<String> {
    let mut buffer = Vec::new();
    write_report(&mut buffer, report)?;
    String::from_utf8(buffer).map_err(|_| anyhow!("rendered report is not valid UTF-8"))
}
