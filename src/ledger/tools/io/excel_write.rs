use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, instrument};
use umya_spreadsheet::{reader, writer};

use crate::ledger::tools::classify::FillColor;
use crate::ledger::tools::error::{Result, ToolError};

/// Row fills for one sheet, keyed by zero-based row index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FillPlan {
    sheet: String,
    rows: BTreeMap<u32, FillColor>,
}

impl FillPlan {
    pub fn for_sheet<I>(sheet: &str, rows: I) -> Self
    where
        I: IntoIterator<Item = (u32, FillColor)>,
    {
        Self {
            sheet: sheet.to_string(),
            rows: rows.into_iter().collect(),
        }
    }

    pub fn sheet(&self) -> &str {
        &self.sheet
    }

    pub fn fill_for(&self, row: u32) -> Option<FillColor> {
        self.rows.get(&row).copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Loads `input`, gives every row in `plan` a solid background from column
/// `A` to the sheet's last used column and saves the result to `output`.
/// Values, formulas, number formats and layout are left as they were.
#[instrument(
    level = "debug",
    skip_all,
    fields(input = %input.display(), output = %output.display(), sheet = %plan.sheet())
)]
pub fn paint_rows(input: &Path, output: &Path, plan: &FillPlan) -> Result<()> {
    let mut book = reader::xlsx::read(input)
        .map_err(|error| ToolError::ExcelEdit(format!("{}: {error}", input.display())))?;

    let worksheet = book
        .get_sheet_by_name_mut(plan.sheet())
        .ok_or_else(|| ToolError::MissingSheet {
            path: input.to_path_buf(),
            sheet: plan.sheet().to_string(),
        })?;

    if plan.is_empty() {
        debug!("no rows to fill");
    }

    let last_column = worksheet.get_highest_column();
    for (row, fill) in &plan.rows {
        let argb = fill.argb();
        for column in 1..=last_column {
            worksheet
                .get_style_mut((column, row + 1))
                .set_background_color(argb.as_str());
        }
    }

    writer::xlsx::write(&book, output)
        .map_err(|error| ToolError::ExcelEdit(format!("{}: {error}", output.display())))?;
    Ok(())
}
