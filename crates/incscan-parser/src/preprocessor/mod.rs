//! Preprocessor Support
//!
//! Header lookup for the include directives found by the scanner.

pub mod headers;

pub use headers::HeaderResolver;
