use std::fmt;

use tracing::debug;

use crate::ledger::tools::model::{OrderSet, SheetGrid};

/// Solid fill applied to every cell of a matched row, as `0xRRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FillColor(pub u32);

impl FillColor {
    /// Light red for orders listed only on the Mom sheet.
    pub const MOM: FillColor = FillColor(0xFFE6E6);
    /// Light yellow for orders listed only on the Other sheet.
    pub const OTHER: FillColor = FillColor(0xFFFFE0);
    /// Solid red for orders listed on both sheets.
    pub const DUPLICATE: FillColor = FillColor(0xFF0000);

    /// Opaque `AARRGGBB` form used in workbook styles.
    pub fn argb(self) -> String {
        format!("FF{self}")
    }
}

impl fmt::Display for FillColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:06X}", self.0)
    }
}

/// Match category of a target row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowClass {
    /// Empty identifier, or listed on neither reference sheet. Left untouched.
    None,
    Mom,
    Other,
    /// Listed on both reference sheets. Wins over `Mom` and `Other`.
    Duplicate,
}

impl RowClass {
    pub fn from_membership(in_mom: bool, in_other: bool) -> Self {
        match (in_mom, in_other) {
            (true, true) => RowClass::Duplicate,
            (true, false) => RowClass::Mom,
            (false, true) => RowClass::Other,
            (false, false) => RowClass::None,
        }
    }

    /// Classifies an identifier against both reference sets. A missing
    /// identifier is always `None`.
    pub fn of(id: Option<&str>, mom: &OrderSet, other: &OrderSet) -> Self {
        match id {
            Some(id) => Self::from_membership(mom.contains(id), other.contains(id)),
            None => RowClass::None,
        }
    }

    /// Fill for the class; `None` means the row keeps its default look.
    pub fn fill(self) -> Option<FillColor> {
        match self {
            RowClass::None => None,
            RowClass::Mom => Some(FillColor::MOM),
            RowClass::Other => Some(FillColor::OTHER),
            RowClass::Duplicate => Some(FillColor::DUPLICATE),
        }
    }
}

impl fmt::Display for RowClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RowClass::None => "none",
            RowClass::Mom => "mom",
            RowClass::Other => "other",
            RowClass::Duplicate => "duplicate",
        };
        f.write_str(label)
    }
}

/// Per-class row counters. `None` rows are never counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassCounts {
    pub mom: usize,
    pub other: usize,
    pub duplicate: usize,
}

impl ClassCounts {
    pub fn record(&mut self, class: RowClass) {
        match class {
            RowClass::None => {}
            RowClass::Mom => self.mom += 1,
            RowClass::Other => self.other += 1,
            RowClass::Duplicate => self.duplicate += 1,
        }
    }

    /// Rows that received a fill.
    pub fn total(&self) -> usize {
        self.mom + self.other + self.duplicate
    }
}

/// Classification of one data row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowOutcome {
    /// Absolute zero-based row index.
    pub row: u32,
    pub order_id: Option<String>,
    pub class: RowClass,
}

/// Result of classifying every data row of a sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetClassification {
    pub rows: Vec<RowOutcome>,
    pub counts: ClassCounts,
}

impl SheetClassification {
    /// Rows that need a fill, with their colour.
    pub fn fills(&self) -> impl Iterator<Item = (u32, FillColor)> + '_ {
        self.rows
            .iter()
            .filter_map(|outcome| outcome.class.fill().map(|fill| (outcome.row, fill)))
    }
}

/// Classifies every row below the header block of `sheet`.
pub fn classify_sheet(
    sheet: &SheetGrid,
    id_column: u32,
    header_rows: u32,
    mom: &OrderSet,
    other: &OrderSet,
) -> SheetClassification {
    let mut classification = SheetClassification::default();

    for row in sheet.data_rows(header_rows) {
        let order_id = sheet.order_id(row, id_column);
        let class = RowClass::of(order_id.as_deref(), mom, other);
        if class != RowClass::None {
            debug!(row, order_id = order_id.as_deref(), %class, "row matched");
        }
        classification.counts.record(class);
        classification.rows.push(RowOutcome {
            row,
            order_id,
            class,
        });
    }

    classification
}
