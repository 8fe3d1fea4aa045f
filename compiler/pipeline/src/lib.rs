#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! High-level pipeline that turns a protoc request into generated `_grpc.pb.go` files.
//!
//! ## Module Organization
//!
//! - `generation_context` - Settings and resolved services for one run
//! - `orchestration` - Entry points: plugin requests, IR files, per-file generation
//! - `response` - Conversion of generated files into protoc response entries

use thiserror::Error;

/// Convenient result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors that can occur while running the codegen pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Generic message-based error.
    #[error("{0}")]
    Message(String),
    /// The plugin parameter or configuration file is invalid.
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    /// Request framing or descriptor resolution failed.
    #[error(transparent)]
    Plugin(#[from] plugin::PluginError),
    /// Error propagated from the codegen crate.
    #[error(transparent)]
    Codegen(#[from] codegen::CodegenError),
    /// I/O error while reading or writing files.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The IR file could not be loaded.
    #[error("failed to load IR from {path}: {message}")]
    IrLoad {
        /// IR file path
        path: String,
        /// Underlying failure
        message: String,
    },
}

// Module declarations
pub mod generation_context;
pub mod orchestration;
pub mod response;

pub use generation_context::GenerationContext;
pub use orchestration::{compile_from_ir, generate, handle_request, run, try_handle_request};
