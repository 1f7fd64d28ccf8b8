//! incscan Parser
//!
//! Finds the `#include` directives a C preprocessor would act on, without
//! being fooled by look-alike text in literals or comments.
//!
//! ## Modules
//!
//! - `scanner` - Single-pass lexical scanner yielding include directives
//! - `preprocessor` - Header lookup against include search paths
//! - `parallel` - Parallel multi-file scanning using rayon

pub mod parallel;
pub mod preprocessor;
pub mod scanner;

pub use parallel::{scan_file, scan_source, ParallelScanner};
pub use preprocessor::HeaderResolver;
pub use scanner::{extract_includes, scan_includes, IncludeScanner};

#[cfg(test)]
mod tests;
