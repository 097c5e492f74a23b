use crate::export::ExportOptions;
use crate::schedule::row_filter::{RowFilter, DEFAULT_ALLOWED_STATUSES};
use anyhow::{anyhow, Context, Result};
use chrono_tz::Tz;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub filter: FilterConfig,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    pub calendar_name: Option<String>,
    /// IANA name, e.g. "America/Chicago". Unset means floating times.
    pub timezone: Option<String>,
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    #[serde(default = "default_allowed_statuses")]
    pub allowed_statuses: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self { allowed_statuses: default_allowed_statuses() }
    }
}

fn default_allowed_statuses() -> Vec<String> {
    DEFAULT_ALLOWED_STATUSES.iter().map(|s| s.to_string()).collect()
}

impl Config {
    /// Load from the user config directory. A missing file yields defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(&get_config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content).context("Failed to parse config file")
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).context("Failed to write config file")?;

        Ok(())
    }

    pub fn timezone(&self) -> Result<Option<Tz>> {
        self.export
            .timezone
            .as_deref()
            .map(|name| name.parse::<Tz>().map_err(|e| anyhow!("Invalid timezone '{}': {}", name, e)))
            .transpose()
    }

    pub fn export_options(&self) -> Result<ExportOptions> {
        Ok(ExportOptions {
            calendar_name: self.export.calendar_name.clone(),
            timezone: self.timezone()?,
            stamp: None,
        })
    }

    pub fn row_filter(&self) -> RowFilter {
        RowFilter::new(self.filter.allowed_statuses.iter().cloned())
    }
}

pub fn get_config_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("com", "schedule-export", "schedule-export")
        .context("Failed to determine config directory")?;

    Ok(proj_dirs.config_dir().join("config.toml"))
}
