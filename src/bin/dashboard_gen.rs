//! Command-line wrapper around the composition engine.
//!
//! Reads a JSON workbook (sheets of indexed columns), composes one
//! dashboard per sheet, and exports the chart units as image files.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde::Deserialize;

use dashboard_rs::api::{ExportFormat, ExportOptions, export_dashboard};
use dashboard_rs::core::{CellValue, ColumnGroup, DataTable};
use dashboard_rs::error::DashboardResult;
use dashboard_rs::{DashboardComposer, DashboardConfig};

/// Columns per auto-generated group when the workbook does not define
/// groups itself.
const AUTO_GROUP_SIZE: usize = 4;

#[derive(Debug, Parser)]
#[command(name = "dashboard-gen", about = "Generate bar-chart dashboards from a JSON workbook")]
struct Cli {
    /// Workbook file path.
    #[arg(long)]
    file: PathBuf,

    /// Sheet name to process (default: all sheets).
    #[arg(long)]
    sheet: Option<String>,

    /// Output directory for images.
    #[arg(long, default_value = "./exports")]
    output: PathBuf,

    /// Raster image resolution.
    #[arg(long, default_value_t = 300)]
    dpi: u32,

    /// Custom dashboard title prefix.
    #[arg(long)]
    title: Option<String>,

    /// Background style.
    #[arg(long, default_value = "presentation")]
    style: String,

    /// Color scheme.
    #[arg(long, default_value = "brand")]
    colors: String,

    /// Output image format.
    #[arg(long, value_enum, default_value = "svg")]
    format: ExportFormat,
}

#[derive(Debug, Deserialize)]
struct WorkbookFile {
    sheets: Vec<SheetFile>,
}

#[derive(Debug, Deserialize)]
struct SheetFile {
    name: String,
    #[serde(default)]
    index_name: Option<String>,
    index: Vec<String>,
    columns: Vec<ColumnFile>,
}

#[derive(Debug, Deserialize)]
struct ColumnFile {
    name: String,
    values: Vec<CellValue>,
}

fn main() -> ExitCode {
    let _ = dashboard_rs::telemetry::init_default_tracing();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<bool, Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(&cli.file)
        .map_err(|err| format!("cannot read `{}`: {err}", cli.file.display()))?;
    let workbook: WorkbookFile =
        serde_json::from_str(&raw).map_err(|err| format!("invalid workbook: {err}"))?;

    std::fs::create_dir_all(&cli.output)
        .map_err(|err| format!("cannot create `{}`: {err}", cli.output.display()))?;

    let composer = DashboardComposer::new();
    let mut all_ok = true;

    for sheet in &workbook.sheets {
        if let Some(wanted) = &cli.sheet {
            if &sheet.name != wanted {
                continue;
            }
        }
        println!("Processing sheet: {}", sheet.name);

        match process_sheet(&composer, sheet, cli) {
            Ok(reports) => {
                for report in &reports {
                    if let Err(err) = &report.outcome {
                        eprintln!("  export failed: {err}");
                        all_ok = false;
                    }
                }
                let written = reports.iter().filter(|r| r.is_ok()).count();
                println!("  - Generated {written} chart group(s) for {}", sheet.name);
            }
            Err(err) => {
                eprintln!("  error processing sheet {}: {err}", sheet.name);
                all_ok = false;
            }
        }
    }

    println!("All dashboards exported to {}", cli.output.display());
    Ok(all_ok)
}

fn process_sheet(
    composer: &DashboardComposer,
    sheet: &SheetFile,
    cli: &Cli,
) -> DashboardResult<Vec<dashboard_rs::api::ExportReport>> {
    let mut table = DataTable::new(sheet.index.clone());
    if let Some(index_name) = &sheet.index_name {
        table = table.with_index_name(index_name);
    }
    for column in &sheet.columns {
        table = table.with_column(&column.name, column.values.clone())?;
    }

    let names: Vec<String> = table.column_names().map(str::to_owned).collect();
    let mut groups = Vec::new();
    for chunk in names.chunks(AUTO_GROUP_SIZE) {
        groups.push(ColumnGroup::new(chunk.to_vec())?);
    }

    let mut config = DashboardConfig::new(&sheet.name, groups)
        .with_bg_style(&cli.style)
        .with_color_schemes(vec![cli.colors.clone()]);
    if let Some(title) = &cli.title {
        config = config.with_title_prefix(title);
    }

    let artifact = composer.compose(&table, &config)?;
    for warning in &artifact.warnings {
        eprintln!(
            "  warning: group {} column `{}`: {}",
            warning.group_index, warning.column, warning.message
        );
    }

    let base = cli.output.join(format!("{}_", sheet.name));
    let options = ExportOptions::new(base, cli.format).with_dpi(cli.dpi);
    Ok(export_dashboard(&artifact, &options))
}
