#![allow(dead_code)]

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};
use umya_spreadsheet::Spreadsheet;

/// Number format used by [`Cell::Money`].
pub const MONEY_FORMAT: &str = "¥#,##0.00";

/// Cell content for fixture workbooks.
pub enum Cell<'a> {
    Text(&'a str),
    Number(f64),
    /// Number shown with [`MONEY_FORMAT`].
    Money(f64),
    Formula(&'a str),
    /// Leaves the cell unwritten.
    Skip,
}

pub use Cell::{Formula, Money, Number, Skip, Text};

/// Writes a workbook whose sheets are given as rows of cells anchored at A1.
pub fn write_fixture(path: &Path, sheets: &[(&str, Vec<Vec<Cell<'_>>>)]) {
    let mut workbook = Workbook::new();
    for (name, rows) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(*name).expect("sheet named");
        for (row_idx, row) in rows.iter().enumerate() {
            for (col_idx, cell) in row.iter().enumerate() {
                let (row_idx, col_idx) = (row_idx as u32, col_idx as u16);
                match cell {
                    Cell::Text(text) => {
                        worksheet
                            .write_string(row_idx, col_idx, *text)
                            .expect("string written");
                    }
                    Cell::Number(number) => {
                        worksheet
                            .write_number(row_idx, col_idx, *number)
                            .expect("number written");
                    }
                    Cell::Money(number) => {
                        let format = Format::new().set_num_format(MONEY_FORMAT);
                        worksheet
                            .write_number_with_format(row_idx, col_idx, *number, &format)
                            .expect("money written");
                    }
                    Cell::Formula(formula) => {
                        worksheet
                            .write_formula(row_idx, col_idx, *formula)
                            .expect("formula written");
                    }
                    Cell::Skip => {}
                }
            }
        }
    }
    workbook.save(path).expect("fixture saved");
}

/// Header row plus one `[date, order id, amount]` row per identifier.
pub fn order_rows<'a>(ids: &[&'a str]) -> Vec<Vec<Cell<'a>>> {
    let mut rows = vec![vec![Text("date"), Text("order"), Text("amount")]];
    for (idx, id) in ids.iter().enumerate() {
        rows.push(vec![Text("2025-11-15"), Text(id), Number(idx as f64 + 1.5)]);
    }
    rows
}

/// Loads a saved workbook with its styles.
pub fn load_styled(path: &Path) -> Spreadsheet {
    umya_spreadsheet::reader::xlsx::read(path).expect("workbook loaded")
}

/// ARGB of the fill on a cell, 1-based coordinates. `None` for absent cells
/// and cells without a fill colour.
pub fn fill_at(book: &Spreadsheet, sheet: &str, column: u32, row: u32) -> Option<String> {
    let worksheet = book.get_sheet_by_name(sheet).expect("sheet present");
    worksheet
        .get_cell((column, row))
        .and_then(|cell| cell.get_style().get_background_color())
        .map(|color| color.get_argb().to_string())
}
