//! export::xlsx
//!
//! Spreadsheet export of classification results.
//!
//! # Layout
//!
//! | URL | Time | Open | Return | Reopen | Notes |
//!
//! One row per issue below a header row. Flag columns hold `1` or nothing,
//! and a conditional format paints cells equal to `1` in the flag's color
//! (background and font alike, so the cell reads as a solid band). Each
//! column is as wide as its longest cell plus one.

use std::path::Path;

use rust_xlsxwriter::{
    Color, ConditionalFormatCell, ConditionalFormatCellRule, Format, Workbook,
};

use super::ExportError;
use crate::core::classify::ClassificationResult;
use crate::report::{format_custom_fields, Language};

/// Column headers, in order.
pub const HEADERS: [&str; 6] = ["URL", "Time", "Open", "Return", "Reopen", "Notes"];

/// Layout of the `Time` column.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const OPEN_COLOR: u32 = 0x279289;
const RETURN_COLOR: u32 = 0xFAE39C;
const REOPEN_COLOR: u32 = 0xB12000;

/// Zero-based index of the first flag column ("Open").
const FIRST_FLAG_COLUMN: u16 = 2;

/// One spreadsheet cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    /// Written as `1` when set, left blank otherwise.
    Flag(bool),
}

impl Cell {
    /// Displayed character count, used for column widths.
    fn width(&self) -> usize {
        match self {
            Cell::Text(s) => s.chars().count(),
            Cell::Flag(true) => 1,
            Cell::Flag(false) => 0,
        }
    }
}

/// Build the data rows (without the header) for `results`.
pub fn build_rows(results: &[ClassificationResult], language: Language) -> Vec<[Cell; 6]> {
    results
        .iter()
        .map(|r| {
            [
                Cell::Text(r.link().to_string()),
                Cell::Text(
                    r.first_annotation_time
                        .map(|t| t.format(TIME_FORMAT).to_string())
                        .unwrap_or_default(),
                ),
                Cell::Flag(r.still_open),
                Cell::Flag(r.returned_from_testing),
                Cell::Flag(r.reopened_from_production),
                Cell::Text(format_custom_fields(&r.custom_fields, language)),
            ]
        })
        .collect()
}

/// Width of each column: the longest cell (header included) plus one.
pub fn column_widths(rows: &[[Cell; 6]]) -> [usize; 6] {
    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width());
        }
    }
    widths.map(|w| w + 1)
}

/// Write `results` to a new workbook at `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`ExportError::Xlsx`] if the workbook cannot be built or saved.
pub fn write_xlsx(
    results: &[ClassificationResult],
    language: Language,
    path: &Path,
) -> Result<(), ExportError> {
    let rows = build_rows(results, language);
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, header) in (0u16..).zip(HEADERS) {
        worksheet.write_string(0, col, header)?;
    }

    for (row_idx, row) in (1u32..).zip(&rows) {
        for (col, cell) in (0u16..).zip(row) {
            match cell {
                Cell::Text(text) if !text.is_empty() => {
                    worksheet.write_string(row_idx, col, text)?;
                }
                Cell::Flag(true) => {
                    worksheet.write_number(row_idx, col, 1.0)?;
                }
                _ => {}
            }
        }
    }

    for (col, width) in (0u16..).zip(column_widths(&rows)) {
        worksheet.set_column_width(col, width as f64)?;
    }

    if !rows.is_empty() {
        let last_row = rows.len() as u32;
        for (offset, color) in [OPEN_COLOR, RETURN_COLOR, REOPEN_COLOR].into_iter().enumerate() {
            let col = FIRST_FLAG_COLUMN + offset as u16;
            let band = Format::new()
                .set_background_color(Color::RGB(color))
                .set_font_color(Color::RGB(color));
            let rule = ConditionalFormatCell::new()
                .set_rule(ConditionalFormatCellRule::EqualTo(1))
                .set_format(band);
            worksheet.add_conditional_format(1, col, last_row, col, &rule)?;
        }
    }

    workbook.save(path)?;
    Ok(())
}
