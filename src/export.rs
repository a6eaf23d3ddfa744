use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook, Worksheet};

use crate::summary::SummaryRow;

pub struct SummarySheet<'a> {
    pub name: &'a str,
    pub key_header: &'a str,
    pub rows: &'a [SummaryRow],
}

pub struct ExportReport {
    pub sheets: usize,
    pub rows: usize,
}

/// Writes one worksheet per summary table.
pub fn export_summaries_xlsx(path: &Path, sheets: &[SummarySheet<'_>]) -> Result<ExportReport> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let mut rows = 0usize;

    for summary in sheets {
        let sheet = workbook.add_worksheet();
        sheet
            .set_name(summary.name)
            .with_context(|| format!("invalid sheet name {}", summary.name))?;
        write_header(sheet, summary.key_header, &header)?;
        write_summary_rows(sheet, summary.rows)?;
        rows += summary.rows.len();
    }

    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;

    Ok(ExportReport {
        sheets: sheets.len(),
        rows,
    })
}

fn write_header(worksheet: &mut Worksheet, key_header: &str, format: &Format) -> Result<()> {
    let titles = [key_header, "Total Plays", "Wins", "Win Percentage"];
    for (col_idx, title) in titles.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col_idx as u16, *title, format)
            .with_context(|| format!("write header cell {col_idx}"))?;
    }
    Ok(())
}

fn write_summary_rows(worksheet: &mut Worksheet, rows: &[SummaryRow]) -> Result<()> {
    for (idx, row) in rows.iter().enumerate() {
        let row_idx = idx as u32 + 1;
        worksheet
            .write_string(row_idx, 0, &row.key)
            .with_context(|| format!("write cell ({row_idx},0)"))?;
        worksheet
            .write_number(row_idx, 1, f64::from(row.total_plays))
            .with_context(|| format!("write cell ({row_idx},1)"))?;
        worksheet
            .write_number(row_idx, 2, f64::from(row.wins))
            .with_context(|| format!("write cell ({row_idx},2)"))?;
        worksheet
            .write_number(row_idx, 3, row.win_percentage)
            .with_context(|| format!("write cell ({row_idx},3)"))?;
    }
    Ok(())
}
