#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Code generation for gRPC service stubs in Go.
//!
//! This crate turns resolved service definitions into `_grpc.pb.go` sources:
//! client interfaces and stubs, the server handler struct with its dispatch
//! adapters, stream wrapper types, the unstable interface, service registration
//! and a capability-checked constructor.
//!
//! Generation is two-phase. Builders in [`generators`] produce a [`go::Node`] tree,
//! and [`go::render`] turns that tree into formatted text. Descriptor parsing and
//! protoc framing live in companion crates.

pub mod generators;
pub mod go;
pub mod naming;
pub mod utils;

use config::GenerationMode;
use ir::ProtoFile;
use semantics::ServiceAnalyzer;
use thiserror::Error;

use crate::generators::{generate_service, BuildContext};
use crate::go::imports::GRPC_PACKAGE;
use crate::go::{Annotation, GoImports, Node};

/// Error type for code generation operations in this crate.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Formatting error when building generated source.
    #[error(transparent)]
    Fmt(#[from] std::fmt::Error),
    /// A service plan violated a generation invariant.
    #[error("invariant '{invariant}' violated by {methods}")]
    Invariant {
        /// Name of the violated invariant
        invariant: String,
        /// Offending methods, comma separated
        methods: String,
    },
    /// Generic message-based error.
    #[error("{0}")]
    Message(String),
}

impl From<String> for CodegenError {
    fn from(msg: String) -> Self { CodegenError::Message(msg) }
}

/// Convenient result type for codegen functions in this crate.
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Suffix appended to the generated filename prefix
pub const GENERATED_SUFFIX: &str = "_grpc.pb.go";

/// One generated source file
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedFile {
    /// Output path, relative to the output root
    pub name: String,
    /// Go source text
    pub content: String,
    /// Identifier ranges linked back to their source declarations
    pub annotations: Vec<Annotation>,
}

/// Defines the core interface for generating source files from resolved proto files.
/// Implementors produce one [`GeneratedFile`] per input file that needs output and may
/// optionally check their inputs first.
pub trait CodeGenerator {
    /// Generate source files for the provided proto files.
    fn generate(&self, files: &[ProtoFile]) -> Result<Vec<GeneratedFile>>;

    /// Optional validation step before generation (default is no-op).
    fn validate(&self, _files: &[ProtoFile]) -> Result<()> { Ok(()) }
}

/// Emits `_grpc.pb.go` files under one generation mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct GrpcGenerator {
    mode: GenerationMode,
}

impl GrpcGenerator {
    /// Create a generator for `mode`
    pub fn new(mode: GenerationMode) -> Self { Self { mode } }

    /// Generation mode
    pub fn mode(&self) -> GenerationMode { self.mode }
}

impl CodeGenerator for GrpcGenerator {
    fn generate(&self, files: &[ProtoFile]) -> Result<Vec<GeneratedFile>> {
        self.validate(files)?;
        let mut out = Vec::new();
        for file in files {
            if let Some(generated) = generate_go_file(self.mode, file)? {
                out.push(generated);
            }
        }
        Ok(out)
    }

    /// Checks every service plan against the default invariants
    fn validate(&self, files: &[ProtoFile]) -> Result<()> {
        let invariants = ServiceAnalyzer::default_invariants();
        for service in files.iter().flat_map(|f| &f.services) {
            let plan = ServiceAnalyzer::analyze(service, self.mode);
            if let Some(diagnostic) = plan.diagnostics_for_invariants(&invariants).into_iter().next()
            {
                return Err(CodegenError::Invariant {
                    invariant: diagnostic.invariant,
                    methods: diagnostic.related_methods.join(", "),
                });
            }
        }
        Ok(())
    }
}

/// Build the declaration nodes for every service in `file`, in declaration order.
///
/// Returns the nodes together with the import set they were qualified against, and
/// the qualified runtime assertion identifier.
pub fn build_file_nodes(mode: GenerationMode, file: &ProtoFile) -> (Vec<Node>, GoImports, String) {
    let mut imports = GoImports::new(file.go_import_path.clone());
    let assertion = imports.ident(GRPC_PACKAGE, "SupportPackageIsVersion7");
    let ctx = BuildContext::new(mode, file);
    let nodes =
        file.services.iter().flat_map(|service| generate_service(&ctx, service, &mut imports)).collect();
    (nodes, imports, assertion)
}

/// Generate the `_grpc.pb.go` file for `file`, or `None` when it declares no services
pub fn generate_go_file(mode: GenerationMode, file: &ProtoFile) -> Result<Option<GeneratedFile>> {
    if !file.has_services() {
        return Ok(None);
    }
    let (nodes, imports, assertion) = build_file_nodes(mode, file);
    let (content, annotations) =
        go::file::render_file(&file.go_package_name, &imports, &assertion, &nodes)?;
    Ok(Some(GeneratedFile {
        name: format!("{}{}", file.generated_filename_prefix, GENERATED_SUFFIX),
        content,
        annotations,
    }))
}
