//! `protoc-gen-go-grpc`
//!
//! Invoked by protoc with no arguments, this binary reads a `CodeGeneratorRequest`
//! from stdin and writes the `CodeGeneratorResponse` to stdout. With `--ir` it
//! generates from a JSON IR file instead.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

use std::io;

use anyhow::Context;
use clap::Parser;
use grpcgen_cli::{print_files, write_files, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let Some(ir_path) = &cli.ir else {
        pipeline::run(io::stdin().lock(), io::stdout().lock())
            .context("protoc plugin protocol failed")?;
        return Ok(());
    };

    let config = cli.load_config()?;
    logging::init(&config.logging.level);
    let files = pipeline::compile_from_ir(ir_path, config)
        .with_context(|| format!("generation from {} failed", ir_path.display()))?;

    match &cli.out_dir {
        Some(dir) => {
            for path in write_files(&files, dir)? {
                eprintln!("wrote {}", path.display());
            }
        }
        None => print_files(&files, io::stdout().lock())?,
    }
    Ok(())
}
