//! itsreport CLI - Back-office Excel report engine
//!
//! Builds report workbooks from JSON row dumps of the ITS services.

mod config;
mod reports;

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use itsreport_render::{content_disposition, content_type, export_combined, export_standalone};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use config::Settings;
use reports::{export_all_entries, find, CATALOG};

#[derive(Parser)]
#[command(name = "itsreport")]
#[command(author, version, about = "Back-office Excel report engine", long_about = None)]
struct Cli {
    /// Verbose output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Settings file (defaults to ./itsreport.toml when present)
    #[arg(long, value_name = "FILE", env = "ITSREPORT_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available reports and the data file each one reads
    List,

    /// Export one report as a standalone workbook
    Export {
        /// Report name, e.g. "MEMO" or jadwal-cuti
        #[arg(value_name = "REPORT")]
        report: String,

        /// JSON dump to read (defaults to the report's data file)
        #[arg(short, long, value_name = "FILE")]
        data: Option<PathBuf>,

        /// Output file (defaults to <report>.xlsx)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Read a report sheet back into a JSON row dump
    Import {
        /// Report name, e.g. "SURAT MASUK"
        #[arg(value_name = "REPORT")]
        report: String,

        /// Workbook holding the report's sheet
        #[arg(value_name = "XLSX")]
        file: PathBuf,

        /// JSON output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export every configured report into one workbook
    ExportAll {
        /// Directory holding the JSON dumps
        #[arg(long, value_name = "DIR", env = "ITSREPORT_DATA_DIR", default_value = ".")]
        data_dir: PathBuf,

        /// Output file (defaults to the configured output or its_report_all.xlsx)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::List => {
            cmd_list();
            Ok(())
        }
        Commands::Export {
            report,
            data,
            output,
        } => cmd_export(&report, data, output, &settings),
        Commands::Import {
            report,
            file,
            output,
        } => cmd_import(&report, &file, output),
        Commands::ExportAll { data_dir, output } => cmd_export_all(&data_dir, output, &settings),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn cmd_list() {
    println!("{:<18} {:<24} {}", "REPORT", "DATA FILE", "LAYOUT");
    for def in CATALOG.iter() {
        let layout = if def.is_calendar() { "calendar" } else { "table" };
        println!("{:<18} {:<24} {}", def.name, def.data_file, layout);
    }
}

fn cmd_export(
    report: &str,
    data: Option<PathBuf>,
    output: Option<PathBuf>,
    settings: &Settings,
) -> Result<()> {
    let def = find(report)
        .ok_or_else(|| anyhow!("Unknown report '{}' (see `itsreport list`)", report))?;
    let data = data.unwrap_or_else(|| PathBuf::from(def.data_file));

    let exporter = def
        .load(&data, settings)
        .with_context(|| format!("Failed to load {} from {}", def.name, data.display()))?;
    let bytes = export_standalone(exporter.as_ref())
        .with_context(|| format!("Failed to export {}", def.name))?;

    let file_name = def.file_name();
    let output = output.unwrap_or_else(|| PathBuf::from(&file_name));
    write_output(&output, &bytes)?;

    debug!(
        content_type = content_type(),
        disposition = %content_disposition(&file_name),
        "download headers"
    );
    println!("{} -> {}", def.name, output.display());
    Ok(())
}

fn cmd_import(report: &str, file: &Path, output: Option<PathBuf>) -> Result<()> {
    let def = find(report)
        .ok_or_else(|| anyhow!("Unknown report '{}' (see `itsreport list`)", report))?;
    let bytes =
        std::fs::read(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let imported = def
        .import(&bytes)
        .with_context(|| format!("Failed to import {} from {}", def.name, file.display()))?;

    match output {
        Some(path) => write_output(&path, imported.json.as_bytes())?,
        None => println!("{}", imported.json),
    }

    eprintln!(
        "{}: {} imported, {} skipped, {} rejected",
        def.name,
        imported.records,
        imported.skipped,
        imported.rejected.len()
    );
    for rejected in &imported.rejected {
        eprintln!("  row {}: {}", rejected.row, rejected.error);
    }
    Ok(())
}

fn cmd_export_all(data_dir: &Path, output: Option<PathBuf>, settings: &Settings) -> Result<()> {
    let entries = export_all_entries(&settings.export_all.reports, data_dir, settings)?;
    let bytes = export_combined(&entries)?;

    let output = settings.combined_output(output);
    write_output(&output, &bytes)?;

    info!(reports = entries.len(), "combined export finished");
    println!("{} reports -> {}", entries.len(), output.display());
    Ok(())
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), bytes = bytes.len(), "wrote workbook");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_export_with_defaults() {
        let cli = Cli::try_parse_from(["itsreport", "-vv", "export", "memo"]).unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Export { report, data, output } => {
                assert_eq!(report, "memo");
                assert!(data.is_none());
                assert!(output.is_none());
            }
            _ => panic!("expected export"),
        }
    }

    #[test]
    fn parses_import_with_output() {
        let cli = Cli::try_parse_from(["itsreport", "import", "surat-masuk", "in.xlsx", "-o", "out.json"])
            .unwrap();
        match cli.command {
            Commands::Import { report, file, output } => {
                assert_eq!(report, "surat-masuk");
                assert_eq!(file, PathBuf::from("in.xlsx"));
                assert_eq!(output, Some(PathBuf::from("out.json")));
            }
            _ => panic!("expected import"),
        }
    }

    #[test]
    fn write_output_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out.xlsx");
        write_output(&path, b"PK").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"PK");
    }
}
