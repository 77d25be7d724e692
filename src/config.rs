// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Downline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Downline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Runtime configuration from the environment (and `.env`), with command-line overrides.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::DEFAULT_API_URL;

pub const API_URL_VAR: &str = "DOWNLINE_API_URL";
pub const TIMEOUT_VAR: &str = "DOWNLINE_REQUEST_TIMEOUT_SECS";
pub const LOG_FILE_VAR: &str = "DOWNLINE_LOG_FILE";

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid API url `{0}` (expected http:// or https://)")]
    InvalidApiUrl(String),
    #[error("invalid request timeout `{0}` (expected a positive number of seconds)")]
    InvalidTimeout(String),
    #[error("cannot open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("logger already initialized")]
    LoggerInstalled,
}

/// Values given on the command line; each one wins over its environment variable.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Overrides {
    pub api_url: Option<String>,
    pub log_file: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    api_url: String,
    request_timeout: Duration,
    log_file: Option<PathBuf>,
    env_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_owned(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            log_file: None,
            env_file: None,
        }
    }
}

impl Config {
    /// Loads `.env` (if present) and reads the process environment.
    pub fn from_env(overrides: Overrides) -> Result<Self, ConfigError> {
        let env_file = dotenvy::dotenv().ok();
        let config = Self::resolve(|name| std::env::var(name).ok(), overrides)?;
        Ok(config.with_env_file(env_file))
    }

    /// Builds the configuration from a variable lookup plus overrides.
    pub fn resolve(
        lookup: impl Fn(&str) -> Option<String>,
        overrides: Overrides,
    ) -> Result<Self, ConfigError> {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let api_url = overrides
            .api_url
            .or_else(|| non_empty(API_URL_VAR))
            .unwrap_or_else(|| DEFAULT_API_URL.to_owned());
        let api_url = normalize_api_url(&api_url)?;

        let timeout_secs = match overrides.timeout_secs {
            Some(secs) => secs,
            None => match non_empty(TIMEOUT_VAR) {
                Some(raw) => raw
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidTimeout(raw.clone()))?,
                None => DEFAULT_TIMEOUT_SECS,
            },
        };
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(timeout_secs.to_string()));
        }

        let log_file = overrides.log_file.or_else(|| non_empty(LOG_FILE_VAR).map(PathBuf::from));

        Ok(Self {
            api_url,
            request_timeout: Duration::from_secs(timeout_secs),
            log_file,
            env_file: None,
        })
    }

    /// Records the `.env` file the variables were read from.
    pub fn with_env_file(mut self, env_file: Option<PathBuf>) -> Self {
        self.env_file = env_file;
        self
    }

    /// Base URL without a trailing `/`.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    pub fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }

    pub fn env_file(&self) -> Option<&Path> {
        self.env_file.as_deref()
    }
}

fn normalize_api_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let has_host = ["http://", "https://"]
        .iter()
        .find_map(|scheme| trimmed.strip_prefix(scheme))
        .is_some_and(|rest| !rest.is_empty());
    if !has_host {
        return Err(ConfigError::InvalidApiUrl(raw.to_owned()));
    }
    Ok(trimmed.to_owned())
}

/// Installs the `env_logger` backend.
///
/// The terminal belongs to the TUI, so records go to `log_file` when one is configured. Without a
/// log file, logging to stderr is only enabled when `RUST_LOG` is set.
pub fn init_logging(log_file: Option<&Path>) -> Result<(), ConfigError> {
    let env = env_logger::Env::default().default_filter_or("info");
    let mut builder = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| ConfigError::LogFile {
                    path: path.to_owned(),
                    source,
                })?;
            let mut builder = env_logger::Builder::from_env(env);
            builder.target(env_logger::Target::Pipe(Box::new(file)));
            builder
        }
        None if std::env::var_os("RUST_LOG").is_some() => env_logger::Builder::from_env(env),
        None => return Ok(()),
    };
    builder.try_init().map_err(|_| ConfigError::LoggerInstalled)
}
