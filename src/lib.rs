// SPDX-License-Identifier: CC0-1.0

//! grpcgen umbrella crate.
//!
//! This crate primarily serves as the workspace root.
//!
//! All functional code lives in the workspace member crates under
//! `primitives`, `compiler` and `cli`.

#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]
#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![warn(deprecated_in_future)]
#![doc(test(attr(warn(unused))))]

/// Miscellaneous metadata about the grpcgen workspace.
pub mod grpcgen_meta {
    /// Version string for the umbrella crate, as reported by Cargo.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// Name of the plugin binary protoc looks for with `--go-grpc_out`
    pub const PLUGIN_NAME: &str = "protoc-gen-go-grpc";

    /// Runtime compatibility constant asserted by every generated file
    pub const RUNTIME_ASSERTION: &str = "SupportPackageIsVersion7";
}
