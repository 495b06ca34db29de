use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::ledger::tools::error::{Result, ToolError};

/// Highest zero-based column index an xlsx sheet can hold.
pub const MAX_COLUMN_INDEX: u32 = 16_383;

/// Settings for a colorize run. Every path, sheet name and column position
/// the pipeline touches is taken from here.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ColorizeConfig {
    /// Workbook holding the two reference sheets.
    pub source_path: PathBuf,
    /// Workbook whose rows get coloured.
    pub target_path: PathBuf,
    /// Reference sheet whose orders are painted light red.
    pub mom_sheet: String,
    /// Reference sheet whose orders are painted light yellow.
    pub other_sheet: String,
    /// Sheet of the target workbook that is classified.
    pub target_sheet: String,
    /// Zero-based column holding the order identifier.
    pub id_column: u32,
    /// Number of leading header rows skipped in every sheet.
    pub header_rows: u32,
    /// Marker appended to the target stem to name the coloured output.
    pub output_suffix: String,
    /// Marker placed between the target stem and the backup timestamp.
    pub backup_marker: String,
}

impl Default for ColorizeConfig {
    fn default() -> Self {
        Self {
            source_path: PathBuf::from("淘寶暫時清單 2025.11.15.xlsx"),
            target_path: PathBuf::from("2026淘寶結賬.xlsx"),
            mom_sheet: "媽媽".into(),
            other_sheet: "其他".into(),
            target_sheet: "2025淘寶".into(),
            id_column: 1,
            header_rows: 1,
            output_suffix: "_已上色".into(),
            backup_marker: "_backup_".into(),
        }
    }
}

impl ColorizeConfig {
    /// Loads a configuration document. Missing fields fall back to the
    /// defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ToolError::MissingInput(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        let config: ColorizeConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.output_suffix.is_empty() {
            return Err(ToolError::InvalidConfig(
                "output suffix must not be empty, the input would be overwritten".into(),
            ));
        }
        if self.backup_marker.is_empty() {
            return Err(ToolError::InvalidConfig("backup marker must not be empty".into()));
        }
        if self.mom_sheet == self.other_sheet {
            return Err(ToolError::InvalidConfig(format!(
                "reference sheets must differ, both are '{}'",
                self.mom_sheet
            )));
        }
        if self.id_column > MAX_COLUMN_INDEX {
            return Err(ToolError::InvalidConfig(format!(
                "identifier column {} exceeds the sheet limit of {}",
                self.id_column, MAX_COLUMN_INDEX
            )));
        }
        Ok(())
    }
}

/// Settings for an inspection batch.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct InspectConfig {
    pub directory: PathBuf,
    /// Leading rows printed for every sheet.
    pub preview_rows: usize,
}

impl Default for InspectConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            preview_rows: 5,
        }
    }
}
