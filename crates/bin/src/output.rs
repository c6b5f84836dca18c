//! Output formatting for migration reports and plans.

use std::io::{self, Write};

use hexframe::migration::{AddressUpdate, MigrationPlan, MigrationReport};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

/// A value that renders as one line of an aligned table.
pub trait TableRow {
    const HEADERS: &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

impl TableRow for AddressUpdate {
    const HEADERS: &'static [&'static str] = &["ID", "FROM", "TO", "PARENT"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.from.to_string(),
            self.to.to_string(),
            self.parent_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "-".to_string()),
        ]
    }
}

/// Writes `rows` as a table with columns padded to their widest cell.
///
/// Nothing is written for an empty slice.
pub fn write_table<R: TableRow>(out: &mut impl Write, rows: &[R]) -> io::Result<()> {
    if rows.is_empty() {
        return Ok(());
    }

    let cells: Vec<Vec<String>> = rows.iter().map(TableRow::cells).collect();
    let mut widths: Vec<usize> = R::HEADERS.iter().map(|h| h.len()).collect();
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let header: Vec<String> = R::HEADERS.iter().map(|h| h.to_string()).collect();
    for line in std::iter::once(&header).chain(&cells) {
        let padded: Vec<String> = line
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect();
        writeln!(out, "{}", padded.join("  ").trim_end())?;
    }
    Ok(())
}

/// Writes the counters of a finished (or planned) migration.
pub fn write_report(
    out: &mut impl Write,
    label: &str,
    report: &MigrationReport,
    dry_run: bool,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Human => {
            writeln!(out, "Backend:               {label}")?;
            if dry_run {
                writeln!(out, "Mode:                  dry run")?;
            }
            writeln!(out, "Containers removed:    {}", report.containers_removed)?;
            writeln!(out, "Children reattached:   {}", report.children_reattached)?;
            writeln!(out, "Descendants moved:     {}", report.descendants_readdressed)?;
        }
        OutputFormat::Json => {
            let value = serde_json::json!({
                "backend": label,
                "dry_run": dry_run,
                "report": report,
            });
            writeln!(out, "{}", serde_json::to_string(&value)?)?;
        }
    }
    Ok(())
}

/// Writes a dry-run plan: the report, then every address rewrite and the
/// containers that would be deleted.
pub fn write_plan(
    out: &mut impl Write,
    label: &str,
    plan: &MigrationPlan,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Human => {
            write_report(out, label, &plan.report, true, format)?;
            if !plan.updates.is_empty() {
                writeln!(out)?;
                write_table(out, &plan.updates)?;
            }
            if !plan.deletions.is_empty() {
                let deleted: Vec<String> = plan.deletions.iter().map(|id| id.to_string()).collect();
                writeln!(out)?;
                writeln!(out, "Containers to delete:  {}", deleted.join(", "))?;
            }
        }
        OutputFormat::Json => {
            let value = serde_json::json!({
                "backend": label,
                "dry_run": true,
                "plan": plan,
            });
            writeln!(out, "{}", serde_json::to_string(&value)?)?;
        }
    }
    Ok(())
}
