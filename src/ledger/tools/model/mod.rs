use std::collections::BTreeSet;
use std::fmt;
use std::ops::Range;

use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Order identifiers are kept as the trimmed text of the identifier cell.
pub type OrderId = String;

/// A single cell value as read from a workbook, without any coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    String(String),
    Float(f64),
    Int(i64),
    Bool(bool),
    /// Excel date serial (days since 1899-12-30).
    DateTime(f64),
    /// Error literal such as `#N/A`.
    Error(String),
}

impl CellValue {
    /// Text form used for identifier matching. Empty cells produce an empty
    /// string.
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::String(value) => value.clone(),
            CellValue::Float(value) => value.to_string(),
            CellValue::Int(value) => value.to_string(),
            CellValue::Bool(value) => value.to_string(),
            CellValue::DateTime(serial) => match serial_to_datetime(*serial) {
                Some(datetime) => datetime.to_string(),
                None => serial.to_string(),
            },
            CellValue::Error(value) => value.clone(),
        }
    }

    /// Extracts an order identifier: the trimmed text, or `None` when
    /// nothing is left after trimming. Zero and `false` are treated as blank
    /// cells, so they never become identifiers.
    pub fn order_id(&self) -> Option<OrderId> {
        if self.is_blank() {
            return None;
        }
        let text = self.as_text();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty | CellValue::Bool(false) | CellValue::Int(0) => true,
            CellValue::Float(value) => *value == 0.0,
            _ => false,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => write!(f, "None"),
            CellValue::String(value) => write!(f, "'{}'", value.replace('\'', "\\'")),
            CellValue::Float(value) => write!(f, "{value:?}"),
            CellValue::Int(value) => write!(f, "{value}"),
            CellValue::Bool(true) => write!(f, "True"),
            CellValue::Bool(false) => write!(f, "False"),
            CellValue::DateTime(serial) => match serial_to_datetime(*serial) {
                Some(datetime) => write!(f, "datetime({datetime})"),
                None => write!(f, "datetime({serial})"),
            },
            CellValue::Error(value) => write!(f, "error({value})"),
        }
    }
}

/// Converts an Excel date serial into a calendar timestamp. Serials outside
/// the representable range yield `None`.
pub fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    let millis = (serial * 86_400_000.0).round();
    if !millis.is_finite() || millis.abs() >= i64::MAX as f64 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    epoch.checked_add_signed(Duration::try_milliseconds(millis as i64)?)
}

/// Writes a row as a parenthesised tuple of raw cell values.
pub struct RowTuple<'a>(pub &'a [CellValue]);

impl fmt::Display for RowTuple<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (idx, cell) in self.0.iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{cell}")?;
        }
        write!(f, ")")
    }
}

/// The used range of one worksheet, addressed by absolute row and column.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetGrid {
    pub name: String,
    /// Absolute position of the first stored cell.
    pub origin: (u32, u32),
    pub rows: Vec<Vec<CellValue>>,
}

impl SheetGrid {
    /// Builds a grid anchored at `A1`.
    pub fn from_rows(name: impl Into<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            name: name.into(),
            origin: (0, 0),
            rows,
        }
    }

    /// Number of rows up to and including the last used one.
    pub fn row_count(&self) -> u32 {
        if self.rows.is_empty() {
            0
        } else {
            self.origin.0 + self.rows.len() as u32
        }
    }

    /// Number of columns up to and including the last used one.
    pub fn column_count(&self) -> u32 {
        let width = self.rows.iter().map(Vec::len).max().unwrap_or(0) as u32;
        if width == 0 { 0 } else { self.origin.1 + width }
    }

    pub fn value_at(&self, row: u32, column: u32) -> Option<&CellValue> {
        let rel_row = row.checked_sub(self.origin.0)? as usize;
        let rel_column = column.checked_sub(self.origin.1)? as usize;
        self.rows.get(rel_row)?.get(rel_column)
    }

    /// Rows after the header block, in sheet order.
    pub fn data_rows(&self, header_rows: u32) -> Range<u32> {
        header_rows.min(self.row_count())..self.row_count()
    }

    /// Values of one row from column `A` to the last used column; absent
    /// cells are reported as empty.
    pub fn row_values(&self, row: u32) -> Vec<CellValue> {
        (0..self.column_count())
            .map(|column| {
                self.value_at(row, column)
                    .cloned()
                    .unwrap_or(CellValue::Empty)
            })
            .collect()
    }

    /// Order identifier stored in `column` of `row`, if any.
    pub fn order_id(&self, row: u32, column: u32) -> Option<OrderId> {
        self.value_at(row, column).and_then(CellValue::order_id)
    }
}

/// All worksheets of a workbook in workbook order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WorkbookGrid {
    pub sheets: Vec<SheetGrid>,
}

impl WorkbookGrid {
    pub fn sheet(&self, name: &str) -> Option<&SheetGrid> {
        self.sheets.iter().find(|sheet| sheet.name == name)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|sheet| sheet.name.as_str()).collect()
    }
}

/// The deduplicated order identifiers collected from one reference sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSet {
    sheet: String,
    ids: BTreeSet<OrderId>,
}

impl OrderSet {
    pub fn new<I>(sheet: impl Into<String>, ids: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<OrderId>,
    {
        Self {
            sheet: sheet.into(),
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn sheet(&self) -> &str {
        &self.sheet
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Number of identifiers present in both sets.
    pub fn overlap(&self, other: &OrderSet) -> usize {
        self.ids.intersection(&other.ids).count()
    }
}
