use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "dashboard.toml";
const DATA_DIR_NAME: &str = "festa_dashboard";

#[derive(Parser, Debug, Default)]
#[command(name = "dashboard", about = "Festival dashboard with demo widgets")]
pub struct Args {
    /// Settings file (defaults to ./dashboard.toml when present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Base URL of the server exposing /api/*
    #[arg(long)]
    pub api_base_url: Option<String>,
    /// Directory holding local storage
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,
    /// Rows requested from the festival feed
    #[arg(long)]
    pub page_size: Option<u32>,
    /// Route to open first, e.g. /FestivalList
    #[arg(long, default_value = "/")]
    pub start_path: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_base_url: String,
    pub festival_page_size: u32,
    pub request_timeout_secs: u64,
    pub data_dir: Option<PathBuf>,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8000".into(),
            festival_page_size: 1000,
            request_timeout_secs: 10,
            data_dir: None,
            log_filter: "info".into(),
        }
    }
}

impl Settings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn resolve_data_dir(&self) -> anyhow::Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        let base = dirs::data_local_dir().context("unable to resolve local app data dir")?;
        Ok(base.join(DATA_DIR_NAME))
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileSettings {
    api_base_url: Option<String>,
    festival_page_size: Option<u32>,
    request_timeout_secs: Option<u64>,
    data_dir: Option<PathBuf>,
    log_filter: Option<String>,
}

/// Settings plus the problems met while layering them. Warnings are reported
/// once logging is up.
#[derive(Debug)]
pub struct LoadedSettings {
    pub settings: Settings,
    pub warnings: Vec<String>,
}

/// Defaults, then the TOML file, then environment, then command-line flags.
pub fn load_settings(args: &Args, env: impl Fn(&str) -> Option<String>) -> LoadedSettings {
    let mut settings = Settings::default();
    let mut warnings = Vec::new();

    let (config_path, explicit) = match &args.config {
        Some(path) => (path.clone(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };
    apply_file(&mut settings, &config_path, explicit, &mut warnings);
    apply_env(&mut settings, &env, &mut warnings);

    if let Some(v) = &args.api_base_url {
        settings.api_base_url = v.clone();
    }
    if let Some(v) = &args.data_dir {
        settings.data_dir = Some(v.clone());
    }
    if let Some(v) = args.page_size {
        settings.festival_page_size = v;
    }

    if settings.festival_page_size == 0 {
        warnings.push("festival page size must be at least 1; using 1".to_string());
        settings.festival_page_size = 1;
    }

    LoadedSettings { settings, warnings }
}

fn apply_file(settings: &mut Settings, path: &Path, explicit: bool, warnings: &mut Vec<String>) {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            if explicit {
                warnings.push(format!("could not read settings file '{}': {err}", path.display()));
            }
            return;
        }
    };

    let file_cfg: FileSettings = match toml::from_str(&raw) {
        Ok(cfg) => cfg,
        Err(err) => {
            warnings.push(format!("ignoring malformed settings file '{}': {err}", path.display()));
            return;
        }
    };

    if let Some(v) = file_cfg.api_base_url {
        settings.api_base_url = v;
    }
    if let Some(v) = file_cfg.festival_page_size {
        settings.festival_page_size = v;
    }
    if let Some(v) = file_cfg.request_timeout_secs {
        settings.request_timeout_secs = v;
    }
    if let Some(v) = file_cfg.data_dir {
        settings.data_dir = Some(v);
    }
    if let Some(v) = file_cfg.log_filter {
        settings.log_filter = v;
    }
}

fn parse_env_number<T: std::str::FromStr>(
    name: &str,
    raw: &str,
    warnings: &mut Vec<String>,
) -> Option<T> {
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warnings.push(format!("ignoring {name}={raw}: not a valid number"));
            None
        }
    }
}

fn apply_env(
    settings: &mut Settings,
    env: &impl Fn(&str) -> Option<String>,
    warnings: &mut Vec<String>,
) {
    if let Some(v) = env("DASHBOARD_API_BASE_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = env("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }

    if let Some(raw) = env("APP__FESTIVAL_PAGE_SIZE") {
        if let Some(v) = parse_env_number("APP__FESTIVAL_PAGE_SIZE", &raw, warnings) {
            settings.festival_page_size = v;
        }
    }
    if let Some(raw) = env("APP__REQUEST_TIMEOUT_SECS") {
        if let Some(v) = parse_env_number("APP__REQUEST_TIMEOUT_SECS", &raw, warnings) {
            settings.request_timeout_secs = v;
        }
    }

    if let Some(v) = env("APP__DATA_DIR") {
        settings.data_dir = Some(PathBuf::from(v));
    }
    if let Some(v) = env("APP__LOG_FILTER") {
        settings.log_filter = v;
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
