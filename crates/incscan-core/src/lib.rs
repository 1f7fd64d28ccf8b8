//! incscan Core
//!
//! Core types shared by the include scanner, the header resolver and the CLI.

pub mod config;
pub mod error;
pub mod location;
pub mod types;

pub use config::{Config, ScanConfig};
pub use error::{Error, Result, ScanError};
pub use location::{Location, Span};
pub use types::*;
