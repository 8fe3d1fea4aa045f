#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
//! Command-line surface of the `protoc-gen-go-grpc` binary.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Parser;
use codegen::GeneratedFile;
use config::{Config, GenerationMode};
use thiserror::Error;

/// Errors raised by the command-line front end.
#[derive(Debug, Error)]
pub enum CliError {
    /// The configuration file could not be loaded.
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    /// Writing generated output failed.
    #[error("failed to write {path}: {source}")]
    Write {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O failure
        source: std::io::Error,
    },
}

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// Command-line arguments.
///
/// Without arguments the binary speaks the protoc plugin protocol on stdin and
/// stdout; protoc passes its options through the request parameter instead.
#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "protoc-gen-go-grpc",
    version,
    about = "Generates Go gRPC service code as a protoc plugin"
)]
pub struct Cli {
    /// Generate from a JSON IR file instead of a protoc request on stdin
    #[arg(long, value_name = "FILE")]
    pub ir: Option<PathBuf>,

    /// Omit client stubs and stream wrapper types
    #[arg(long, requires = "ir")]
    pub migration_mode: bool,

    /// Load generation settings from a TOML file
    #[arg(long, value_name = "FILE", requires = "ir")]
    pub config: Option<PathBuf>,

    /// Write generated files under this directory instead of printing them
    #[arg(long, value_name = "DIR", requires = "ir")]
    pub out_dir: Option<PathBuf>,
}

impl Cli {
    /// Effective configuration for `--ir` mode: the `--config` file (or defaults),
    /// with `--migration-mode` forcing the reduced output
    pub fn load_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };
        if self.migration_mode {
            config.generation.mode = GenerationMode::MigrationLite;
        }
        Ok(config)
    }
}

/// Print each file to `out`, preceded by a `==> <name> <==` banner
pub fn print_files<W: Write>(files: &[GeneratedFile], mut out: W) -> std::io::Result<()> {
    for (i, file) in files.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        writeln!(out, "==> {} <==", file.name)?;
        out.write_all(file.content.as_bytes())?;
    }
    out.flush()
}

/// Write each file under `dir`, creating directories as needed; returns the written paths
pub fn write_files(files: &[GeneratedFile], dir: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let path = dir.join(&file.name);
        let write = |path: &Path| -> std::io::Result<()> {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &file.content)
        };
        write(&path).map_err(|source| CliError::Write { path: path.clone(), source })?;
        written.push(path);
    }
    Ok(written)
}
