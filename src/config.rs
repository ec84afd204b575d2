// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Alex Sizykh

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

const APP_DIR_NAME: &str = "scalex";
const CONFIG_FILE_NAME: &str = "scalex.toml";

pub const DEFAULT_CONDA_PATH: &str = "/working/guyer/mambaforge/bin/conda";
pub const DEFAULT_CONDA_ENV: &str = "fipy3k";

/// Optional site defaults; every field can be overridden on the command
/// line.
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub partition: Option<String>,
    pub conda_path: Option<String>,
    pub conda_env: Option<String>,
    pub results_root: Option<PathBuf>,
}

pub fn load(config_path_override: Option<PathBuf>) -> Result<FileConfig> {
    let required = config_path_override.is_some();
    let config_path = match config_path_override {
        Some(path) => Some(expand_path(path)),
        None => default_config_path().ok(),
    };

    match config_path.as_deref() {
        Some(path) => read_config_file(path, required),
        None => Ok(FileConfig::default()),
    }
}

fn read_config_file(path: &Path, required: bool) -> Result<FileConfig> {
    if !path.exists() {
        if required {
            anyhow::bail!("config file not found at {}", path.display());
        }
        return Ok(FileConfig::default());
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    toml::from_str(&contents)
        .with_context(|| format!("failed to parse config file {}", path.display()))
}

fn expand_path(path: PathBuf) -> PathBuf {
    let path_string = path.to_string_lossy().to_string();
    let expanded = shellexpand::tilde(&path_string);
    PathBuf::from(expanded.as_ref())
}

fn default_config_path() -> Result<PathBuf> {
    let base = dirs::config_dir().context("failed to resolve config directory")?;
    Ok(base.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_config_file() {
        let parsed: FileConfig = toml::from_str(
            r#"
            partition = "rack2"
            conda_path = "/opt/conda/bin/conda"
            conda_env = "fipy311"
            results_root = "/work/results"
            "#,
        )
        .unwrap();
        assert_eq!(parsed.partition.as_deref(), Some("rack2"));
        assert_eq!(parsed.conda_path.as_deref(), Some("/opt/conda/bin/conda"));
        assert_eq!(parsed.conda_env.as_deref(), Some("fipy311"));
        assert_eq!(parsed.results_root, Some(PathBuf::from("/work/results")));
    }

    #[test]
    fn every_field_is_optional() {
        let parsed: FileConfig = toml::from_str("").unwrap();
        assert!(parsed.partition.is_none());
        assert!(parsed.conda_path.is_none());
        assert!(parsed.conda_env.is_none());
        assert!(parsed.results_root.is_none());
    }
}
