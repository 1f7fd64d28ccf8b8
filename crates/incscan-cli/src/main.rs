//! incscan CLI
//!
//! Command-line interface for include-directive scanning.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use incscan_core::{Config, Error, FileIncludes, IncludeDirective};
use incscan_parser::{scan_file, HeaderResolver, ParallelScanner};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "incscan")]
#[command(author, version, about = "C/C++ include directive scanner", long_about = None)]
struct Cli {
    /// JSON configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the include directives of a file or directory tree
    Scan {
        /// Source file or directory
        #[arg(value_name = "PATH")]
        path: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format (json, text)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show which header each include of a file resolves to
    Resolve {
        /// Source file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Additional include directory (repeatable)
        #[arg(short = 'I', long = "include", value_name = "DIR")]
        include_paths: Vec<PathBuf>,
    },

    /// Fail if any file cannot be scanned cleanly
    Check {
        /// Source file or directory
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::default(),
    };
    debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Scan {
            path,
            output,
            format,
        } => cmd_scan(&config, &path, output.as_deref(), &format),
        Commands::Resolve {
            file,
            include_paths,
        } => cmd_resolve(&config, &file, include_paths),
        Commands::Check { path } => cmd_check(&config, &path),
    }
}

/// Scan a single file or every matching file below a directory
fn scan_path(config: &Config, path: &Path) -> Vec<(PathBuf, incscan_core::Result<FileIncludes>)> {
    if path.is_dir() {
        ParallelScanner::with_config(config.scan.clone()).scan_directory(path)
    } else {
        vec![(path.to_path_buf(), scan_file(path))]
    }
}

fn cmd_scan(config: &Config, path: &Path, output: Option<&Path>, format: &str) -> Result<()> {
    let results = scan_path(config, path);

    let mut scanned = Vec::with_capacity(results.len());
    for (file, result) in results {
        match result {
            Ok(includes) => scanned.push(includes),
            Err(err) => eprintln!("⚠️  {}", report(&file, &err)),
        }
    }
    info!("Scanned {} files", scanned.len());

    let rendered = match format {
        "json" => serde_json::to_string_pretty(&scanned)?,
        "text" => render_text(&scanned),
        other => bail!("Unknown format: {}", other),
    };

    if let Some(out_path) = output {
        std::fs::write(out_path, &rendered)?;
        println!("Output written to: {}", out_path.display());
    } else {
        println!("{}", rendered);
    }

    Ok(())
}

/// Scan errors already name their file
fn report(file: &Path, err: &Error) -> String {
    match err {
        Error::Scan { .. } => err.to_string(),
        _ => format!("{}: {}", file.display(), err),
    }
}

fn render_text(scanned: &[FileIncludes]) -> String {
    let mut out = String::new();
    for file in scanned {
        out.push_str(&format!("📂 {} ({} includes)\n", file.file, file.includes.len()));
        for directive in &file.includes {
            out.push_str(&format!("   L{:<5} {}\n", directive.source_line, describe(directive)));
        }
    }
    out
}

fn describe(directive: &IncludeDirective) -> String {
    let (open, close) = directive.kind.delimiters();
    format!("{}{}{}", open, directive.target, close)
}

fn cmd_resolve(config: &Config, file: &Path, include_paths: Vec<PathBuf>) -> Result<()> {
    let includes = scan_file(file)?;

    let mut resolver = HeaderResolver::from_config(config);
    for path in include_paths {
        resolver.add_include_path(path);
    }

    let existing = resolver.existing_include_paths();
    for path in resolver.include_paths() {
        if !existing.contains(path) {
            warn!("Include directory does not exist: {}", path.display());
        }
    }
    debug!("Resolving against root {}", resolver.root().display());

    println!("🔎 Includes of {}:", file.display());
    println!();

    let resolved = resolver.resolve_all(&includes.includes, Some(file));
    let mut missing = 0;
    for entry in &resolved {
        let location = entry.directive.location(&includes.file);
        match &entry.path {
            Some(path) => println!("  {} {} -> {}", location, describe(&entry.directive), path.display()),
            None => {
                missing += 1;
                println!("  {} {} (not found)", location, describe(&entry.directive));
            }
        }
    }

    println!();
    println!(
        "   {} resolved, {} not found",
        resolved.len() - missing,
        missing
    );

    Ok(())
}

fn cmd_check(config: &Config, path: &Path) -> Result<()> {
    let results = scan_path(config, path);
    let total = results.len();

    let mut failures = 0;
    for (file, result) in &results {
        if let Err(err) = result {
            failures += 1;
            eprintln!("❌ {}", report(file, err));
        }
    }

    if failures > 0 {
        bail!("{} of {} files failed to scan", failures, total);
    }

    println!("✅ {} files scanned cleanly", total);
    Ok(())
}
