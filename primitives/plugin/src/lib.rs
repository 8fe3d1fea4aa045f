#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! grpcgen Plugin
//!
//! The protoc side of the generator: decoding the `CodeGeneratorRequest` protoc
//! writes to the plugin's stdin, encoding the `CodeGeneratorResponse` it reads
//! back, and resolving the request's file descriptors into the service IR.

pub mod protocol;
pub mod resolver;

pub use prost_types::compiler::{code_generator_response, CodeGeneratorRequest, CodeGeneratorResponse};
pub use protocol::{error_response, read_request, write_response, SUPPORTED_FEATURES};
pub use resolver::Resolver;
use thiserror::Error;

/// Errors raised while talking to protoc or resolving descriptors
#[derive(Debug, Error)]
pub enum PluginError {
    /// Reading the request or writing the response failed
    #[error("plugin I/O failed: {0}")]
    Io(#[from] std::io::Error),
    /// The request bytes are not a valid `CodeGeneratorRequest`
    #[error("failed to decode CodeGeneratorRequest: {0}")]
    Decode(#[from] prost::DecodeError),
    /// The response could not be encoded
    #[error("failed to encode CodeGeneratorResponse: {0}")]
    Encode(#[from] prost::EncodeError),
    /// A file named in `file_to_generate` has no descriptor in the request
    #[error("no descriptor for file to generate {0:?}")]
    MissingFile(String),
    /// Neither an `M` override nor a `go_package` option gives the file an import path
    #[error(
        "unable to determine Go import path for {0:?}; add a go_package option or an M{0}=<path> parameter"
    )]
    MissingImportPath(String),
    /// A method refers to a message no descriptor in the request defines
    #[error("method {method} refers to unknown type {type_name}")]
    UnknownType {
        /// Fully-qualified method name
        method: String,
        /// Type name as written in the descriptor
        type_name: String,
    },
    /// `module=` was given but the output path lies outside it
    #[error("{file}: output path {prefix:?} does not begin with module {module:?}")]
    OutsideModule {
        /// Proto file path
        file: String,
        /// Computed output prefix
        prefix: String,
        /// Configured module
        module: String,
    },
    /// `module=` only applies with `paths=import`
    #[error("cannot use module= with paths=source_relative")]
    ModuleWithSourceRelative,
}

/// Result type for plugin operations
pub type Result<T> = std::result::Result<T, PluginError>;
