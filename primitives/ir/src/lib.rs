#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! grpcgen Intermediate Representation (IR)
//!
//! This crate defines the resolved service tree that the generators read. A
//! [`ServiceIR`] is built once per generation pass, either by the protoc plugin
//! resolver or by loading a JSON dump, and is never mutated afterwards.

pub mod service_ir;

#[cfg(feature = "test-utils")]
pub mod fixtures;

// Re-export the main IR types for convenience
pub use service_ir::*;
