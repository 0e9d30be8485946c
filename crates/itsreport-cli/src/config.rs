//! `itsreport.toml` settings
//!
//! ```toml
//! output = "out/its_report_all.xlsx"
//!
//! [calendar]
//! year = 2025
//! fill_policy = "first_event_every_day"
//!
//! [split]
//! primary = "SAG"
//! secondary = "ISO"
//! primary_label = "ITS-SAG"
//!
//! [export_all]
//! reports = ["MEMO", "SURAT", "PROJECT"]
//! ```
//!
//! Every key is optional. A missing file means built-in defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use itsreport_core::config::DEFAULT_CALENDAR_YEAR;
use itsreport_core::{FillPolicy, SplitCategories};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::reports::EXPORT_ALL_ORDER;

/// File name looked up in the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "itsreport.toml";

/// Output file of `export-all` when neither flag nor settings name one
pub const COMBINED_FILE_NAME: &str = "its_report_all.xlsx";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Output path of `export-all`
    pub output: Option<PathBuf>,
    pub calendar: CalendarSettings,
    pub split: SplitCategories,
    pub export_all: ExportAllSettings,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalendarSettings {
    pub year: i32,
    pub fill_policy: FillPolicy,
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self {
            year: DEFAULT_CALENDAR_YEAR,
            fill_policy: FillPolicy::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportAllSettings {
    /// Report names, in sheet order
    pub reports: Vec<String>,
}

impl Default for ExportAllSettings {
    fn default() -> Self {
        Self {
            reports: EXPORT_ALL_ORDER.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Settings {
    /// Load settings from `path`, or from `itsreport.toml` when it exists
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Self::from_file(default)
                } else {
                    debug!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let settings = Self::parse(&text)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// `--output` flag, else the configured output, else the default name
    pub fn combined_output(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.or_else(|| self.output.clone())
            .unwrap_or_else(|| PathBuf::from(COMBINED_FILE_NAME))
    }
}
