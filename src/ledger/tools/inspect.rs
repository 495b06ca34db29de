use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument, warn};

use crate::ledger::tools::config::InspectConfig;
use crate::ledger::tools::error::Result;
use crate::ledger::tools::io::excel_read;
use crate::ledger::tools::model::CellValue;

/// Prefix of the owner/lock files Excel and LibreOffice create next to a
/// workbook while it is open (`~$Book1.xlsx`). They are not workbooks.
pub const LOCK_FILE_PREFIX: &str = "~$";

/// Extension of the files picked up by [`discover_workbooks`].
pub const WORKBOOK_EXTENSION: &str = "xlsx";

/// Structure of one worksheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetSummary {
    pub name: String,
    /// Last used row, counted from the top of the sheet.
    pub rows: u32,
    /// Last used column, counted from column `A`.
    pub columns: u32,
    /// Leading rows as raw values, at most `preview_rows` of them.
    pub preview: Vec<Vec<CellValue>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkbookSummary {
    pub sheets: Vec<SheetSummary>,
}

impl WorkbookSummary {
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|sheet| sheet.name.as_str()).collect()
    }
}

/// Inspection result of a single file. A failure only affects its own entry.
#[derive(Debug)]
pub struct FileInspection {
    pub path: PathBuf,
    pub outcome: Result<WorkbookSummary>,
}

#[derive(Debug, Default)]
pub struct InspectionReport {
    pub files: Vec<FileInspection>,
}

impl InspectionReport {
    pub fn failures(&self) -> usize {
        self.files
            .iter()
            .filter(|file| file.outcome.is_err())
            .count()
    }
}

/// True for lock files left behind by an open spreadsheet application.
pub fn is_lock_file(file_name: &str) -> bool {
    file_name.starts_with(LOCK_FILE_PREFIX)
}

fn is_workbook_candidate(path: &Path) -> bool {
    let has_extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(WORKBOOK_EXTENSION));
    let locked = path
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(is_lock_file);
    path.is_file() && has_extension && !locked
}

/// Lists the workbooks directly inside `directory`, sorted by name.
pub fn discover_workbooks(directory: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(directory)? {
        let path = entry?.path();
        if is_workbook_candidate(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Reads the structure of one workbook without modifying it.
#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub fn inspect_workbook(path: &Path, preview_rows: usize) -> Result<WorkbookSummary> {
    let workbook = excel_read::read_workbook(path)?;
    let preview_rows = u32::try_from(preview_rows).unwrap_or(u32::MAX);

    let sheets = workbook
        .sheets
        .iter()
        .map(|sheet| {
            let shown = sheet.row_count().min(preview_rows);
            SheetSummary {
                name: sheet.name.clone(),
                rows: sheet.row_count(),
                columns: sheet.column_count(),
                preview: (0..shown).map(|row| sheet.row_values(row)).collect(),
            }
        })
        .collect();

    Ok(WorkbookSummary { sheets })
}

/// Inspects every workbook in the configured directory. Unreadable files are
/// recorded in the report and the batch carries on.
#[instrument(level = "info", skip_all, fields(directory = %config.directory.display()))]
pub fn inspect_directory(config: &InspectConfig) -> Result<InspectionReport> {
    let paths = discover_workbooks(&config.directory)?;
    debug!(file_count = paths.len(), "workbooks discovered");

    let files = paths
        .into_iter()
        .map(|path| {
            let outcome = inspect_workbook(&path, config.preview_rows);
            if let Err(error) = &outcome {
                warn!(path = %path.display(), %error, "workbook could not be inspected");
            }
            FileInspection { path, outcome }
        })
        .collect();

    Ok(InspectionReport { files })
}
