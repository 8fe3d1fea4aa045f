//! grpcgen Intermediate Representation
//!
//! This module defines the resolved service tree: files declaring services,
//! services owning their methods, and the Go identifiers each method's request
//! and response types resolve to.

use serde::{Deserialize, Serialize};

/// The resolved input of one generation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceIR {
    /// IR format version (e.g., "0.1.0")
    version: String,
    /// Files to generate, in request order
    files: Vec<ProtoFile>,
}

/// A single interface-description file selected for generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtoFile {
    /// Path of the file as given to the compiler (e.g., "helloworld/helloworld.proto")
    pub path: String,
    /// Dotted proto package (may be empty)
    #[serde(default)]
    pub proto_package: String,
    /// Go package name written in the `package` clause
    pub go_package_name: String,
    /// Go import path of the package the generated file belongs to
    pub go_import_path: GoImportPath,
    /// Output path without the `_grpc.pb.go` suffix
    pub generated_filename_prefix: String,
    /// Services in declaration order
    #[serde(default)]
    pub services: Vec<ServiceDef>,
}

/// A service declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceDef {
    /// Proto name (e.g., "Greeter")
    pub name: String,
    /// Package-qualified proto name (e.g., "helloworld.Greeter")
    pub full_name: String,
    /// Exported Go identifier for the service
    pub go_name: String,
    /// Methods in declaration order
    #[serde(default)]
    pub methods: Vec<MethodDef>,
    /// Whether the service is marked deprecated
    #[serde(default)]
    pub deprecated: bool,
    /// Source location used for documentation linking
    #[serde(default)]
    pub location: Location,
}

/// A method declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDef {
    /// Proto name (e.g., "SayHello")
    pub name: String,
    /// Exported Go identifier for the method
    pub go_name: String,
    /// Request message type
    pub input: GoIdent,
    /// Response message type
    pub output: GoIdent,
    /// Whether the client sends a stream of requests
    #[serde(default)]
    pub client_streaming: bool,
    /// Whether the server sends a stream of responses
    #[serde(default)]
    pub server_streaming: bool,
    /// Whether the method is marked deprecated
    #[serde(default)]
    pub deprecated: bool,
    /// Raw leading comment text, as attached in the source file
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub leading_comments: String,
    /// Source location used for documentation linking
    #[serde(default)]
    pub location: Location,
}

/// A Go identifier qualified by the import path of its package.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GoIdent {
    /// Exported name within the package
    pub go_name: String,
    /// Import path of the declaring package
    pub import_path: GoImportPath,
}

/// A Go import path (e.g., "google.golang.org/grpc").
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GoImportPath(String);

/// Location of a declaration inside its source file, as a descriptor path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Source file the path refers to
    pub source_file: String,
    /// Descriptor field path (e.g., `[6, 0, 2, 1]` for the second method of the first service)
    pub path: Vec<i32>,
}

/// A method viewed together with its owning service.
#[derive(Debug, Clone, Copy)]
pub struct MethodRef<'a> {
    /// Owning service
    pub parent: &'a ServiceDef,
    /// The method itself
    pub method: &'a MethodDef,
}

impl ServiceIR {
    /// Create a new IR with the default format version
    pub fn new(files: Vec<ProtoFile>) -> Self { Self::new_with_version("0.1.0".to_string(), files) }

    /// Create a new IR with a specific format version
    pub fn new_with_version(version: String, files: Vec<ProtoFile>) -> Self {
        Self { version, files }
    }

    /// Load a ServiceIR from a JSON file
    pub fn from_file(path: &std::path::Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let ir: Self = serde_json::from_str(&content)?;
        Ok(ir)
    }

    /// Save the ServiceIR to a JSON file with pretty formatting
    pub fn to_file(&self, path: &std::path::Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(&mut file, self)?;
        // Ensure file ends with a newline (POSIX standard)
        use std::io::Write;
        writeln!(file)?;
        Ok(())
    }

    /// Get the IR format version
    pub fn version(&self) -> &str { &self.version }

    /// Get all files in request order
    pub fn files(&self) -> &[ProtoFile] { &self.files }

    /// Get a file by its source path
    pub fn get_file(&self, path: &str) -> Option<&ProtoFile> {
        self.files.iter().find(|f| f.path == path)
    }

    /// Total number of services across all files
    pub fn service_count(&self) -> usize { self.files.iter().map(|f| f.services.len()).sum() }
}

impl ProtoFile {
    /// Whether this file produces any output
    pub fn has_services(&self) -> bool { !self.services.is_empty() }
}

impl ServiceDef {
    /// Iterate the methods together with this service, in declaration order
    pub fn method_refs(&self) -> impl Iterator<Item = MethodRef<'_>> {
        self.methods.iter().map(move |method| MethodRef { parent: self, method })
    }
}

impl GoIdent {
    /// Create an identifier in the package at `import_path`
    pub fn new(go_name: impl Into<String>, import_path: impl Into<GoImportPath>) -> Self {
        Self { go_name: go_name.into(), import_path: import_path.into() }
    }
}

impl GoImportPath {
    /// Create a new import path
    pub fn new(path: impl Into<String>) -> Self { Self(path.into()) }

    /// Get the path as a string slice
    pub fn as_str(&self) -> &str { &self.0 }

    /// Build an identifier declared in this package
    pub fn ident(&self, go_name: impl Into<String>) -> GoIdent {
        GoIdent { go_name: go_name.into(), import_path: self.clone() }
    }
}

impl From<&str> for GoImportPath {
    fn from(path: &str) -> Self { Self(path.to_string()) }
}

impl From<String> for GoImportPath {
    fn from(path: String) -> Self { Self(path) }
}

impl std::fmt::Display for GoImportPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(&self.0) }
}

impl Location {
    /// Create a location in `source_file` at the given descriptor path
    pub fn new(source_file: impl Into<String>, path: Vec<i32>) -> Self {
        Self { source_file: source_file.into(), path }
    }
}
