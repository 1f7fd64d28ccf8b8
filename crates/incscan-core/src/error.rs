//! Error types for incscan

use thiserror::Error;

/// Lexical failure raised while extracting include directives.
///
/// Every variant carries the 1-based physical line where the offending
/// construct was opened.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanError {
    #[error("line {line}: unterminated string or character literal")]
    UnterminatedLiteral { line: u32 },

    #[error("line {line}: unterminated block comment")]
    UnterminatedComment { line: u32 },

    #[error("line {line}: malformed #include directive")]
    MalformedDirective { line: u32 },
}

impl ScanError {
    /// Line where the failing construct started
    pub fn line(&self) -> u32 {
        match self {
            ScanError::UnterminatedLiteral { line }
            | ScanError::UnterminatedComment { line }
            | ScanError::MalformedDirective { line } => *line,
        }
    }
}

/// incscan error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{file}: {source}")]
    Scan {
        file: String,
        #[source]
        source: ScanError,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("File not found: {0}")]
    FileNotFound(String),
}

impl Error {
    /// Attach a file name to a scan failure
    pub fn scan(file: impl Into<String>, source: ScanError) -> Self {
        Error::Scan {
            file: file.into(),
            source,
        }
    }
}

/// Result type alias for incscan
pub type Result<T> = std::result::Result<T, Error>;
