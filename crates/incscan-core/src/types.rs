//! Core type definitions

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::location::{Location, Span};

/// Delimiter style of an include directive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IncludeKind {
    /// `#include "path"`
    Quoted,
    /// `#include <path>`
    AngleBracket,
}

impl IncludeKind {
    /// Opening and closing delimiters
    pub fn delimiters(&self) -> (char, char) {
        match self {
            IncludeKind::Quoted => ('"', '"'),
            IncludeKind::AngleBracket => ('<', '>'),
        }
    }
}

/// An `#include` directive recognized in a source buffer
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IncludeDirective {
    /// Path text between the delimiters
    pub target: String,
    /// Delimiter style
    pub kind: IncludeKind,
    /// Physical line (1-based) of the directive's `#`
    pub source_line: u32,
    /// Bytes from the `#` through the closing delimiter
    pub span: Span,
}

impl IncludeDirective {
    pub fn new(target: impl Into<String>, kind: IncludeKind, source_line: u32, span: Span) -> Self {
        Self {
            target: target.into(),
            kind,
            source_line,
            span,
        }
    }

    pub fn is_quoted(&self) -> bool {
        self.kind == IncludeKind::Quoted
    }

    /// Location of this directive inside `file`
    pub fn location(&self, file: &str) -> Location {
        Location::new(file, self.source_line)
    }
}

impl std::fmt::Display for IncludeDirective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (open, close) = self.kind.delimiters();
        write!(f, "#include {}{}{}", open, self.target, close)
    }
}

/// Includes extracted from one file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileIncludes {
    /// Logical file name
    pub file: String,
    /// Directives in source order
    pub includes: Vec<IncludeDirective>,
}

impl FileIncludes {
    pub fn new(file: impl Into<String>, includes: Vec<IncludeDirective>) -> Self {
        Self {
            file: file.into(),
            includes,
        }
    }

    /// Targets in source order
    pub fn targets(&self) -> Vec<&str> {
        self.includes.iter().map(|d| d.target.as_str()).collect()
    }
}

/// A directive together with the header file it names, if one was found
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedInclude {
    pub directive: IncludeDirective,
    pub path: Option<PathBuf>,
}

impl ResolvedInclude {
    pub fn is_resolved(&self) -> bool {
        self.path.is_some()
    }
}
