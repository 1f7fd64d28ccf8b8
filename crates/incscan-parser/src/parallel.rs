//! Parallel file scanning using rayon
//!
//! Scans many independent files at once with progress reporting.

use crate::scanner::IncludeScanner;
use incscan_core::{Error, FileIncludes, Result, ScanConfig};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Progress callback type
pub type ProgressCallback = Box<dyn Fn(ProgressEvent) + Send + Sync>;

/// Progress event for tracking scan progress
#[derive(Debug, Clone)]
pub struct ProgressEvent {
    pub phase: ProgressPhase,
    pub current: usize,
    pub total: usize,
    pub message: String,
}

/// Scan phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressPhase {
    Discovering,
    Scanning,
    Complete,
}

/// Multi-file include scanner
pub struct ParallelScanner {
    config: ScanConfig,
    progress_callback: Option<Arc<ProgressCallback>>,
}

impl ParallelScanner {
    pub fn new() -> Self {
        Self::with_config(ScanConfig::default())
    }

    pub fn with_config(config: ScanConfig) -> Self {
        Self {
            config,
            progress_callback: None,
        }
    }

    /// Set progress callback
    pub fn with_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProgressEvent) + Send + Sync + 'static,
    {
        self.progress_callback = Some(Arc::new(Box::new(callback)));
        self
    }

    /// Scan multiple files in parallel; results keep the input order
    pub fn scan_files(&self, paths: &[PathBuf]) -> Vec<(PathBuf, Result<FileIncludes>)> {
        let total = paths.len();
        let processed = AtomicUsize::new(0);

        self.emit_progress(ProgressPhase::Scanning, 0, total, "Starting parallel scan...");

        let results: Vec<_> = paths
            .par_iter()
            .map(|path| {
                let result = scan_file(path);

                let current = processed.fetch_add(1, Ordering::SeqCst) + 1;
                if current % 10 == 0 || current == total {
                    self.emit_progress(
                        ProgressPhase::Scanning,
                        current,
                        total,
                        format!("Scanned {}/{} files", current, total),
                    );
                }

                (path.clone(), result)
            })
            .collect();

        self.emit_progress(ProgressPhase::Complete, total, total, "Scan complete");
        results
    }

    /// Collect the files under `dir` that match the configured extensions
    pub fn discover(&self, dir: &Path) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = WalkDir::new(dir)
            .into_iter()
            .filter_entry(|e| {
                e.depth() == 0
                    || !e.file_type().is_dir()
                    || !e
                        .file_name()
                        .to_str()
                        .map(|name| self.config.is_excluded_dir(name))
                        .unwrap_or(false)
            })
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| self.config.matches_extension(e.path()))
            .map(|e| e.path().to_path_buf())
            .collect();
        paths.sort();
        paths
    }

    /// Scan a directory recursively
    pub fn scan_directory(&self, dir: &Path) -> Vec<(PathBuf, Result<FileIncludes>)> {
        self.emit_progress(ProgressPhase::Discovering, 0, 0, "Walking directory...");

        let paths = self.discover(dir);

        info!("Found {} files to scan", paths.len());
        self.emit_progress(
            ProgressPhase::Discovering,
            paths.len(),
            paths.len(),
            format!("Found {} files", paths.len()),
        );

        self.scan_files(&paths)
    }

    fn emit_progress<S: Into<String>>(&self, phase: ProgressPhase, current: usize, total: usize, message: S) {
        if let Some(ref callback) = self.progress_callback {
            callback(ProgressEvent {
                phase,
                current,
                total,
                message: message.into(),
            });
        }
    }
}

impl Default for ParallelScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Read one file and extract its include directives
pub fn scan_file(path: &Path) -> Result<FileIncludes> {
    let content = std::fs::read_to_string(path)?;
    let name = path.to_string_lossy();
    let includes = scan_source(&content, &name)?;
    debug!("{} includes in {:?}", includes.includes.len(), path);
    Ok(includes)
}

/// Extract include directives from an in-memory buffer with a logical name
pub fn scan_source(source: &str, name: &str) -> Result<FileIncludes> {
    let includes = IncludeScanner::with_name(source, name)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|err| Error::scan(name, err))?;
    Ok(FileIncludes::new(name, includes))
}
