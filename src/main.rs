use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ledger_tools::colorize::{self, ColorizeReport};
use ledger_tools::config::{ColorizeConfig, InspectConfig};
use ledger_tools::inspect::{self, InspectionReport};
use ledger_tools::model::RowTuple;
use ledger_tools::{Result, ToolError};
use tracing_subscriber::EnvFilter;

const RULE: &str = "============================================================";

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_logging().and_then(|()| run(cli)) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn init_logging() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| ToolError::Logging(error.to_string()))
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Colorize(args) => execute_colorize(args),
        Command::Inspect(args) => execute_inspect(args),
    }
}

fn execute_colorize(args: ColorizeArgs) -> Result<()> {
    let config = args.resolve()?;

    println!("{RULE}");
    println!("Order colorizer");
    println!("{RULE}");

    let report = match colorize::run(&config) {
        Ok(report) => report,
        Err(error @ ToolError::Backup { .. }) => {
            println!("\nBackup failed, nothing was changed.");
            return Err(error);
        }
        Err(error) => return Err(error),
    };

    print_colorize_report(&config, &report);
    Ok(())
}

fn print_colorize_report(config: &ColorizeConfig, report: &ColorizeReport) {
    println!("\nStep 1: backup");
    println!("  backup created: {}", report.backup_path.display());

    println!("\nStep 2: read order sets");
    println!("  '{}': {} orders", config.mom_sheet, report.mom_orders);
    println!("  '{}': {} orders", config.other_sheet, report.other_orders);
    if report.overlap > 0 {
        println!(
            "  warning: {} orders appear on both '{}' and '{}', they are marked solid red",
            report.overlap, config.mom_sheet, config.other_sheet
        );
    }

    println!("\nStep 3: match and colour '{}'", config.target_sheet);
    println!("  light red (only '{}'): {}", config.mom_sheet, report.counts.mom);
    println!(
        "  light yellow (only '{}'): {}",
        config.other_sheet, report.counts.other
    );
    println!("  solid red (both): {}", report.counts.duplicate);
    println!("\nSaved to: {}", report.output_path.display());
    println!("{RULE}");
}

fn execute_inspect(args: InspectArgs) -> Result<()> {
    let config = InspectConfig {
        directory: args.dir,
        preview_rows: args.preview_rows,
    };
    let report = inspect::inspect_directory(&config)?;
    print_inspection_report(&report);
    Ok(())
}

fn print_inspection_report(report: &InspectionReport) {
    println!("\nFound {} xlsx files", report.files.len());

    for file in &report.files {
        println!("\n{RULE}");
        println!("File: {}", file.path.display());
        println!("{RULE}");

        let summary = match &file.outcome {
            Ok(summary) => summary,
            Err(error) => {
                println!("error: {error}");
                continue;
            }
        };

        println!("\nSheet count: {}", summary.sheets.len());
        println!("Sheets: {:?}", summary.sheet_names());
        for sheet in &summary.sheets {
            println!("\n--- Sheet: {} ---", sheet.name);
            println!("  rows: {}", sheet.rows);
            println!("  columns: {}", sheet.columns);
            println!("  first {} rows:", sheet.preview.len());
            for (idx, row) in sheet.preview.iter().enumerate() {
                println!("    row {}: {}", idx + 1, RowTuple(row));
            }
        }
    }

    println!("\n{RULE}");
    println!("Inspection finished");
    println!("{RULE}\n");
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Colour order rows by reference-sheet membership and inspect workbooks."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Back up the target workbook and write a copy with matched rows coloured.
    Colorize(ColorizeArgs),
    /// Print sheet names, sizes and leading rows of every workbook in a directory.
    Inspect(InspectArgs),
}

#[derive(clap::Args)]
struct ColorizeArgs {
    /// JSON configuration document; flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Workbook holding the reference sheets.
    #[arg(long)]
    source: Option<PathBuf>,

    /// Workbook to colour.
    #[arg(long)]
    target: Option<PathBuf>,

    /// Reference sheet painted light red.
    #[arg(long)]
    mom_sheet: Option<String>,

    /// Reference sheet painted light yellow.
    #[arg(long)]
    other_sheet: Option<String>,

    /// Sheet of the target workbook to classify.
    #[arg(long)]
    target_sheet: Option<String>,

    /// Zero-based column holding the order identifier.
    #[arg(long)]
    id_column: Option<u32>,

    /// Marker appended to the target name for the coloured copy.
    #[arg(long)]
    output_suffix: Option<String>,
}

impl ColorizeArgs {
    fn resolve(self) -> Result<ColorizeConfig> {
        let mut config = match &self.config {
            Some(path) => ColorizeConfig::load(path)?,
            None => ColorizeConfig::default(),
        };

        if let Some(source) = self.source {
            config.source_path = source;
        }
        if let Some(target) = self.target {
            config.target_path = target;
        }
        if let Some(sheet) = self.mom_sheet {
            config.mom_sheet = sheet;
        }
        if let Some(sheet) = self.other_sheet {
            config.other_sheet = sheet;
        }
        if let Some(sheet) = self.target_sheet {
            config.target_sheet = sheet;
        }
        if let Some(column) = self.id_column {
            config.id_column = column;
        }
        if let Some(suffix) = self.output_suffix {
            config.output_suffix = suffix;
        }

        config.validate()?;
        Ok(config)
    }
}

#[derive(clap::Args)]
struct InspectArgs {
    /// Directory scanned for workbooks.
    #[arg(long, default_value = ".")]
    dir: PathBuf,

    /// Leading rows printed per sheet.
    #[arg(long, default_value_t = 5)]
    preview_rows: usize,
}
