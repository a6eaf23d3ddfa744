use std::io::Write;

use anyhow::{Context, Result};

use crate::summary::SummaryRow;

const COLUMNS: [&str; 3] = ["Total Plays", "Wins", "Win Percentage"];

/// Stable sort, wins descending; equal wins keep their grouping order.
pub fn sort_by_wins(mut rows: Vec<SummaryRow>) -> Vec<SummaryRow> {
    rows.sort_by(|a, b| b.wins.cmp(&a.wins));
    rows
}

pub fn render_table<W: Write>(title: &str, rows: &[SummaryRow], out: &mut W) -> Result<()> {
    let cells: Vec<[String; 3]> = rows
        .iter()
        .map(|row| {
            [
                row.total_plays.to_string(),
                row.wins.to_string(),
                format!("{:.2}", row.win_percentage),
            ]
        })
        .collect();

    let key_width = rows
        .iter()
        .map(|row| row.key.chars().count())
        .chain(std::iter::once(title.chars().count()))
        .max()
        .unwrap_or(0);
    let mut widths = COLUMNS.map(str::len);
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.len());
        }
    }

    write!(out, "{title:<key_width$}").context("write table header")?;
    for (name, width) in COLUMNS.iter().zip(widths) {
        write!(out, "  {name:>width$}").context("write table header")?;
    }
    writeln!(out).context("write table header")?;

    if rows.is_empty() {
        writeln!(out, "(no games)").context("write table body")?;
        return Ok(());
    }

    for (row, cells) in rows.iter().zip(&cells) {
        write!(out, "{:<key_width$}", row.key).context("write table row")?;
        for (cell, width) in cells.iter().zip(widths) {
            write!(out, "  {cell:>width$}").context("write table row")?;
        }
        writeln!(out).context("write table row")?;
    }
    Ok(())
}
