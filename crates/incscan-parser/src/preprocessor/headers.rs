//! Header File Resolver
//!
//! Looks up the file an include directive names. Lookups are single-hop:
//! the resolver never opens the headers it finds.

use incscan_core::{Config, IncludeDirective, IncludeKind, ResolvedInclude};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Header file resolver for C projects
#[derive(Debug, Clone)]
pub struct HeaderResolver {
    /// Project root directory
    root: PathBuf,
    /// Include search paths
    include_paths: Vec<PathBuf>,
}

impl HeaderResolver {
    /// Create a new header resolver
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            include_paths: Vec::new(),
        }
    }

    /// Create a resolver from the project configuration
    pub fn from_config(config: &Config) -> Self {
        let mut resolver = Self::new(config.project_root.clone());
        for path in config.absolute_include_paths() {
            resolver.add_include_path(path);
        }
        resolver
    }

    /// Add an include path
    pub fn add_include_path(&mut self, path: PathBuf) {
        if !self.include_paths.contains(&path) {
            self.include_paths.push(path);
        }
    }

    /// Get all include paths
    pub fn include_paths(&self) -> &[PathBuf] {
        &self.include_paths
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get include paths that actually exist
    pub fn existing_include_paths(&self) -> Vec<PathBuf> {
        self.include_paths
            .iter()
            .filter(|p| p.is_dir())
            .cloned()
            .collect()
    }

    /// Resolve a header file path
    ///
    /// Quoted includes are tried next to `from_file` first. After that the
    /// project root and then each include path are searched in order.
    pub fn resolve(&self, header: &str, kind: IncludeKind, from_file: Option<&Path>) -> Option<PathBuf> {
        if kind == IncludeKind::Quoted {
            if let Some(parent) = from_file.and_then(Path::parent) {
                let relative_path = parent.join(header);
                if relative_path.is_file() {
                    debug!("Resolved {} relative to {:?}", header, parent);
                    return Some(relative_path);
                }
            }
        }

        let root_relative = self.root.join(header);
        if root_relative.is_file() {
            debug!("Resolved {} relative to root", header);
            return Some(root_relative);
        }

        for include_path in &self.include_paths {
            let full_path = include_path.join(header);
            if full_path.is_file() {
                debug!("Resolved {} in {:?}", header, include_path);
                return Some(full_path);
            }
        }

        debug!("Failed to resolve header: {}", header);
        None
    }

    /// Resolve every directive of one file, keeping source order
    pub fn resolve_all(&self, directives: &[IncludeDirective], from_file: Option<&Path>) -> Vec<ResolvedInclude> {
        directives
            .iter()
            .map(|directive| ResolvedInclude {
                path: self.resolve(&directive.target, directive.kind, from_file),
                directive: directive.clone(),
            })
            .collect()
    }
}
