//! Configuration types

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// incscan configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Project root path; relative include paths are taken from here
    pub project_root: PathBuf,

    /// Extra header search directories, in lookup order
    pub include_paths: Vec<PathBuf>,

    /// Scan configuration
    pub scan: ScanConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project_root: PathBuf::from("."),
            include_paths: Vec::new(),
            scan: ScanConfig::default(),
        }
    }
}

impl Config {
    /// Load a JSON configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a JSON configuration string
    pub fn from_json(content: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.scan.extensions.is_empty() {
            return Err(Error::Config("scan.extensions must not be empty".into()));
        }
        if let Some(ext) = self.scan.extensions.iter().find(|e| e.starts_with('.')) {
            return Err(Error::Config(format!(
                "extension {:?} should be given without a leading dot",
                ext
            )));
        }
        Ok(())
    }

    /// Include paths with relative entries joined onto the project root
    pub fn absolute_include_paths(&self) -> Vec<PathBuf> {
        self.include_paths
            .iter()
            .map(|p| {
                if p.is_absolute() {
                    p.clone()
                } else {
                    self.project_root.join(p)
                }
            })
            .collect()
    }
}

/// Directory scan configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// File extensions to scan
    pub extensions: Vec<String>,

    /// Directory names to skip
    pub exclude_dirs: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["c".into(), "h".into(), "cc".into(), "cpp".into(), "hpp".into()],
            exclude_dirs: vec![".git".into(), "build".into(), "target".into()],
        }
    }
}

impl ScanConfig {
    /// Whether `path` has one of the configured extensions
    pub fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.extensions.iter().any(|e| e == ext))
            .unwrap_or(false)
    }

    pub fn is_excluded_dir(&self, name: &str) -> bool {
        self.exclude_dirs.iter().any(|d| d == name)
    }
}
