use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use crate::ledger::tools::classify::{ClassCounts, RowOutcome, classify_sheet};
use crate::ledger::tools::config::ColorizeConfig;
use crate::ledger::tools::error::{Result, ToolError};
use crate::ledger::tools::io::backup::{self, extension_suffix, sibling};
use crate::ledger::tools::io::excel_read;
use crate::ledger::tools::io::excel_write::{self, FillPlan};
use crate::ledger::tools::model::OrderSet;

/// Outcome of a completed colorize run.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorizeReport {
    pub backup_path: PathBuf,
    pub output_path: PathBuf,
    /// Distinct identifiers read from the Mom sheet.
    pub mom_orders: usize,
    /// Distinct identifiers read from the Other sheet.
    pub other_orders: usize,
    /// Identifiers listed on both reference sheets.
    pub overlap: usize,
    pub counts: ClassCounts,
    /// Classification of every data row of the target sheet, in order.
    pub rows: Vec<RowOutcome>,
}

/// Deterministic output name: `<stem><suffix><.ext>` next to the input.
pub fn colored_output_path(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    sibling(path, format!("{stem}{suffix}{}", extension_suffix(path)))
}

/// Runs the whole pipeline: back up the target, read both reference sets,
/// classify the target sheet and write the coloured copy.
///
/// A failed backup stops the run before anything else is read or written.
#[instrument(
    level = "info",
    skip_all,
    fields(source = %config.source_path.display(), target = %config.target_path.display())
)]
pub fn run(config: &ColorizeConfig) -> Result<ColorizeReport> {
    config.validate()?;
    if !config.target_path.exists() {
        return Err(ToolError::MissingInput(config.target_path.clone()));
    }

    let backup_path = backup::create_backup(&config.target_path, &config.backup_marker)?;

    let (mom, other) = read_reference_sets(config)?;
    let overlap = mom.overlap(&other);
    if overlap > 0 {
        warn!(overlap, "orders listed on both reference sheets will be marked duplicate");
    }

    let workbook = excel_read::read_workbook(&config.target_path)?;
    let sheet = workbook
        .sheet(&config.target_sheet)
        .ok_or_else(|| ToolError::MissingSheet {
            path: config.target_path.clone(),
            sheet: config.target_sheet.clone(),
        })?;

    let classification = classify_sheet(
        sheet,
        config.id_column,
        config.header_rows,
        &mom,
        &other,
    );
    let counts = classification.counts;
    info!(
        mom = counts.mom,
        other = counts.other,
        duplicate = counts.duplicate,
        "target rows classified"
    );

    let fills = FillPlan::for_sheet(&sheet.name, classification.fills());
    let output_path = colored_output_path(&config.target_path, &config.output_suffix);
    excel_write::paint_rows(&config.target_path, &output_path, &fills)?;
    info!(output = %output_path.display(), filled_rows = fills.len(), "coloured workbook written");

    Ok(ColorizeReport {
        backup_path,
        output_path,
        mom_orders: mom.len(),
        other_orders: other.len(),
        overlap,
        counts,
        rows: classification.rows,
    })
}

fn read_reference_sets(config: &ColorizeConfig) -> Result<(OrderSet, OrderSet)> {
    let mom = excel_read::read_order_set(
        &config.source_path,
        &config.mom_sheet,
        config.id_column,
        config.header_rows,
    )?;
    let other = excel_read::read_order_set(
        &config.source_path,
        &config.other_sheet,
        config.id_column,
        config.header_rows,
    )?;
    Ok((mom, other))
}
