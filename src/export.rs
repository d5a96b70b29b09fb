//! Spreadsheet export of a report [`Sheet`].

use crate::report::{Cell, Sheet};
use rust_xlsxwriter::{Format, FormatBorder, Workbook, Worksheet, XlsxError};
use thiserror::Error;

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[derive(Debug, Error)]
#[error("failed to create Excel: {0}")]
pub struct ExportError(#[from] XlsxError);

struct Formats {
    header: Format,
    body: Format,
    total: Format,
}

impl Formats {
    fn new() -> Self {
        Self {
            header: Format::new().set_bold().set_border(FormatBorder::Thin),
            body: Format::new().set_border(FormatBorder::Thin),
            total: Format::new()
                .set_bold()
                .set_background_color(0xF7FAFC)
                .set_border(FormatBorder::Thin),
        }
    }
}

/// Header row, data rows, total row, one blank row, then the footer line.
pub fn render_xlsx(sheet: &Sheet) -> Result<Vec<u8>, ExportError> {
    let formats = Formats::new();
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(&sheet.name)?;

    for (col, title) in sheet.header.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, title, &formats.header)?;
        let width = if col == 0 { 40 } else { 18 };
        worksheet.set_column_width(col as u16, width)?;
    }

    let mut row = 1u32;
    for cells in &sheet.rows {
        write_row(worksheet, row, cells, &formats.body)?;
        row += 1;
    }
    write_row(worksheet, row, &sheet.total, &formats.total)?;

    worksheet.write_string(row + 2, 0, &sheet.footer)?;

    Ok(workbook.save_to_buffer()?)
}

fn write_row(
    worksheet: &mut Worksheet,
    row: u32,
    cells: &[Cell],
    format: &Format,
) -> Result<(), XlsxError> {
    for (col, cell) in cells.iter().enumerate() {
        let col = col as u16;
        match cell {
            Cell::Text(text) => worksheet.write_string_with_format(row, col, text, format)?,
            Cell::Number(value) => {
                worksheet.write_number_with_format(row, col, *value as f64, format)?
            }
        };
    }
    Ok(())
}
