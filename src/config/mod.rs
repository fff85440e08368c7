mod file_config;

pub use file_config::FileConfig;

use crate::server::{RequestsLoggingLevel, ServerConfig, DEFAULT_ALLOWED_ORIGINS};
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::PathBuf;

/// Where course data lives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum StoreBackend {
    #[default]
    Memory,
    File,
}

/// CLI arguments that can be used for config resolution.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub store: StoreBackend,
    pub data_dir: Option<PathBuf>,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub seed: bool,
    pub allowed_origins: Vec<String>,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            store: StoreBackend::Memory,
            data_dir: None,
            port: 8080,
            logging_level: RequestsLoggingLevel::Path,
            seed: true,
            allowed_origins: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub store: StoreBackend,
    /// Only set for the file backend.
    pub data_dir: Option<PathBuf>,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub seed: bool,
    pub allowed_origins: Vec<String>,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let store = match file.store {
            Some(name) => match parse_store_backend(&name) {
                Some(store) => store,
                None => bail!("Unknown store backend in config file: {:?}", name),
            },
            None => cli.store,
        };

        let data_dir = file
            .data_dir
            .map(PathBuf::from)
            .or_else(|| cli.data_dir.clone());

        let data_dir = match store {
            StoreBackend::Memory => None,
            StoreBackend::File => {
                let dir = data_dir.ok_or_else(|| {
                    anyhow::anyhow!(
                        "data_dir must be specified via --data-dir or in config file when using the file store"
                    )
                })?;
                if dir.exists() && !dir.is_dir() {
                    bail!("data_dir is not a directory: {:?}", dir);
                }
                Some(dir)
            }
        };

        let port = file.port.unwrap_or(cli.port);

        let logging_level = file
            .logging_level
            .and_then(|s| parse_logging_level(&s))
            .unwrap_or_else(|| cli.logging_level.clone());

        let seed = file.seed.unwrap_or(cli.seed);

        let mut allowed_origins = file
            .allowed_origins
            .unwrap_or_else(|| cli.allowed_origins.clone());
        if allowed_origins.is_empty() {
            allowed_origins = DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|origin| origin.to_string())
                .collect();
        }

        Ok(AppConfig {
            store,
            data_dir,
            port,
            logging_level,
            seed,
            allowed_origins,
        })
    }

    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            requests_logging_level: self.logging_level.clone(),
            port: self.port,
            allowed_origins: self.allowed_origins.clone(),
        }
    }
}

fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}

fn parse_store_backend(s: &str) -> Option<StoreBackend> {
    StoreBackend::from_str(s, true).ok()
}
