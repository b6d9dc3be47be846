use std::fs;
use std::io;
use std::path::Path;

use anyhow::Context;
use engine_logging::{engine_info, engine_warn};
use serde::Deserialize;
use videomancer_core::SampleAssets;

use super::cli::Cli;
use super::logging::LogDestination;

/// Contents of the optional RON config file. Every field may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub sample_videos: Option<Vec<String>>,
    pub seed: Option<u64>,
    pub log: Option<LogDestination>,
}

/// Effective settings after merging the config file with the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub assets: SampleAssets,
    pub seed: Option<u64>,
    pub log: LogDestination,
}

/// Reads `path`. A missing file yields the defaults.
pub fn load_file_config(path: &Path) -> anyhow::Result<FileConfig> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Ok(FileConfig::default());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read config {:?}", path));
        }
    };
    ron::from_str(&content).with_context(|| format!("failed to parse config {:?}", path))
}

impl AppConfig {
    /// Command-line values win over the file. Invalid sample videos fall back to the defaults.
    pub fn resolve(cli: &Cli, file: FileConfig) -> Self {
        let assets = match file.sample_videos {
            Some(urls) => match SampleAssets::new(urls) {
                Ok(assets) => {
                    engine_info!("Using {} configured sample videos", assets.urls().len());
                    assets
                }
                Err(err) => {
                    engine_warn!("Ignoring configured sample videos: {}", err);
                    SampleAssets::default()
                }
            },
            None => SampleAssets::default(),
        };

        Self {
            assets,
            seed: cli.seed.or(file.seed),
            log: cli.log.or(file.log).unwrap_or_default(),
        }
    }
}
