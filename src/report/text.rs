//! Plain-text report written next to the CSV export.

use crate::report::summary::Summary;
use chrono::NaiveDateTime;
use std::fmt::Write;

pub const REPORT_TITLE: &str = "Hong Kong Sunset Cloud Observation Report";

/// Renders the report: header, period, totals, the twelve month lines, data source and
/// generation timestamp.
pub fn render_report(summary: &Summary, source: &str, generated_at: NaiveDateTime) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = write_report(&mut out, summary, source, generated_at);
    out
}

fn write_report(
    out: &mut String,
    summary: &Summary,
    source: &str,
    generated_at: NaiveDateTime,
) -> std::fmt::Result {
    writeln!(out, "{}", REPORT_TITLE)?;
    writeln!(out, "{}", "=".repeat(40))?;
    writeln!(out)?;

    match (summary.start, summary.end) {
        (Some(start), Some(end)) => writeln!(
            out,
            "Period: {} to {}",
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d")
        )?,
        _ => writeln!(out, "Period: none")?,
    }
    writeln!(out, "Total days: {}", group_thousands(summary.total_days))?;
    writeln!(
        out,
        "Sunset cloud days: {}",
        group_thousands(summary.occurrences)
    )?;
    writeln!(
        out,
        "Occurrence rate: {:.2}%",
        summary.occurrence_rate * 100.0
    )?;
    writeln!(out)?;

    writeln!(out, "Monthly breakdown:")?;
    for m in &summary.monthly {
        writeln!(
            out,
            "{:02}: {:3} occurrences ({:5.1}%)",
            m.month,
            m.occurrences,
            m.rate * 100.0
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Data source: {}", source)?;
    writeln!(
        out,
        "Generated at: {}",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    )?;
    Ok(())
}

fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}
