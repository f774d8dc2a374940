use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::fielding::FieldingTally;

const HEADER: [&str; 6] = ["Rank", "Player", "Catches", "Stumpings", "Run Outs", "Total"];

pub struct ExportReport {
    pub rows: usize,
    pub scorecards: usize,
}

/// Plain-text leaderboard for the terminal.
pub fn render_table(tallies: &[FieldingTally]) -> String {
    if tallies.is_empty() {
        return "No fielding dismissals recorded.\n".to_string();
    }
    let rows = leaderboard_rows(tallies);
    let mut widths = HEADER.map(str::len);
    for row in &rows {
        for (col, value) in row.iter().enumerate() {
            widths[col] = widths[col].max(value.chars().count());
        }
    }

    let mut out = String::new();
    let header: Vec<String> = HEADER.iter().map(|h| h.to_string()).collect();
    for row in std::iter::once(&header).chain(rows.iter()) {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(col, value)| {
                // Player column left-aligned, numbers right-aligned.
                if col == 1 {
                    format!("{value:<width$}", width = widths[col])
                } else {
                    format!("{value:>width$}", width = widths[col])
                }
            })
            .collect();
        let _ = writeln!(out, "{}", cells.join("  ").trim_end());
    }
    out
}

pub fn to_json(tallies: &[FieldingTally]) -> Result<String> {
    serde_json::to_string_pretty(tallies).context("serialize fielding leaderboard")
}

pub fn export_xlsx(path: &Path, tallies: &[FieldingTally], scorecards: usize) -> Result<ExportReport> {
    let mut workbook = Workbook::new();

    let mut rows = vec![HEADER.iter().map(|h| h.to_string()).collect::<Vec<_>>()];
    rows.extend(leaderboard_rows(tallies));
    let sheet = workbook.add_worksheet();
    sheet.set_name("Fielding").context("name fielding sheet")?;
    write_rows(sheet, &rows)?;

    let info = vec![
        vec!["Generated".to_string(), chrono::Local::now().to_rfc3339()],
        vec!["Scorecards".to_string(), scorecards.to_string()],
        vec!["Fielders".to_string(), tallies.len().to_string()],
    ];
    let sheet = workbook.add_worksheet();
    sheet.set_name("Info").context("name info sheet")?;
    write_rows(sheet, &info)?;

    workbook
        .save(path)
        .with_context(|| format!("save workbook {}", path.display()))?;
    tracing::info!(path = %path.display(), rows = tallies.len(), "leaderboard exported");

    Ok(ExportReport {
        rows: tallies.len(),
        scorecards,
    })
}

fn leaderboard_rows(tallies: &[FieldingTally]) -> Vec<Vec<String>> {
    tallies
        .iter()
        .enumerate()
        .map(|(idx, t)| {
            vec![
                (idx + 1).to_string(),
                t.name.clone(),
                t.catches.to_string(),
                t.stumpings.to_string(),
                t.run_outs.to_string(),
                t.total.to_string(),
            ]
        })
        .collect()
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}
