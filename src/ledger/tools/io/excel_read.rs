use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use calamine::{DataType, Range, Reader, Xlsx, open_workbook};
use tracing::{debug, instrument};

use crate::ledger::tools::error::{Result, ToolError};
use crate::ledger::tools::model::{CellValue, OrderSet, SheetGrid, WorkbookGrid};

type XlsxReader = Xlsx<BufReader<File>>;

/// Opens a workbook read-only. Cells carry their cached values, so formulas
/// are seen as the results they last evaluated to.
pub fn open_xlsx(path: &Path) -> Result<XlsxReader> {
    if !path.exists() {
        return Err(ToolError::MissingInput(path.to_path_buf()));
    }
    let workbook: XlsxReader = open_workbook(path)?;
    Ok(workbook)
}

/// Collects the order identifiers found in `id_column` of every data row of
/// `sheet`.
#[instrument(level = "info", skip_all, fields(path = %path.display(), sheet = %sheet))]
pub fn read_order_set(
    path: &Path,
    sheet: &str,
    id_column: u32,
    header_rows: u32,
) -> Result<OrderSet> {
    let grid = {
        let mut workbook = open_xlsx(path)?;
        let range = read_required_sheet(&mut workbook, path, sheet)?;
        sheet_grid(sheet, &range)
    };

    let ids = grid
        .data_rows(header_rows)
        .filter_map(|row| grid.order_id(row, id_column));
    let orders = OrderSet::new(sheet, ids);
    debug!(order_count = orders.len(), "order set collected");
    Ok(orders)
}

/// Loads every sheet of a workbook into memory, in workbook order.
#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub fn read_workbook(path: &Path) -> Result<WorkbookGrid> {
    let mut workbook = open_xlsx(path)?;
    let names = workbook.sheet_names().to_owned();

    let mut sheets = Vec::with_capacity(names.len());
    for name in &names {
        let range = read_required_sheet(&mut workbook, path, name)?;
        sheets.push(sheet_grid(name, &range));
    }

    debug!(sheet_count = sheets.len(), "workbook loaded");
    Ok(WorkbookGrid { sheets })
}

fn read_required_sheet(
    workbook: &mut XlsxReader,
    path: &Path,
    name: &str,
) -> Result<Range<DataType>> {
    let range_result = workbook
        .worksheet_range(name)
        .ok_or_else(|| ToolError::MissingSheet {
            path: path.to_path_buf(),
            sheet: name.to_string(),
        })?;
    let range = range_result.map_err(ToolError::from)?;
    Ok(range)
}

fn sheet_grid(name: &str, range: &Range<DataType>) -> SheetGrid {
    if range.is_empty() {
        return SheetGrid::from_rows(name, Vec::new());
    }

    let rows = range
        .rows()
        .map(|row| row.iter().map(cell_value).collect())
        .collect();

    SheetGrid {
        name: name.to_string(),
        origin: range.start().unwrap_or((0, 0)),
        rows,
    }
}

fn cell_value(cell: &DataType) -> CellValue {
    match cell {
        DataType::Empty => CellValue::Empty,
        DataType::String(value) => CellValue::String(value.clone()),
        DataType::Float(value) => CellValue::Float(*value),
        DataType::Int(value) => CellValue::Int(*value),
        DataType::Bool(value) => CellValue::Bool(*value),
        DataType::DateTime(serial) => CellValue::DateTime(*serial),
        DataType::Error(error) => CellValue::Error(error.to_string()),
        other => CellValue::String(other.to_string()),
    }
}
