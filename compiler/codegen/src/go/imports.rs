//! Import tracking and identifier qualification for one generated file.

use std::collections::{BTreeMap, HashMap, HashSet};

use ir::{GoIdent, GoImportPath};

/// `context`
pub const CONTEXT_PACKAGE: &str = "context";
/// `google.golang.org/grpc`
pub const GRPC_PACKAGE: &str = "google.golang.org/grpc";
/// `google.golang.org/grpc/codes`
pub const CODES_PACKAGE: &str = "google.golang.org/grpc/codes";
/// `google.golang.org/grpc/status`
pub const STATUS_PACKAGE: &str = "google.golang.org/grpc/status";

/// Predeclared Go identifiers; a package name never shadows one of these.
const PREDECLARED: &[&str] = &[
    "append", "bool", "byte", "cap", "close", "complex", "complex128", "complex64", "copy",
    "delete", "error", "false", "float32", "float64", "imag", "int", "int16", "int32", "int64",
    "int8", "iota", "len", "make", "new", "nil", "panic", "print", "println", "real", "recover",
    "rune", "string", "true", "uint", "uint16", "uint32", "uint64", "uint8", "uintptr",
];

/// The set of packages a generated file refers to.
///
/// Each import path gets a package name on first use, derived from its base name;
/// a name already taken by another path gets the first free numeric suffix.
#[derive(Debug, Clone)]
pub struct GoImports {
    local: GoImportPath,
    names: HashMap<GoImportPath, String>,
    used: HashSet<String>,
}

impl GoImports {
    /// Track imports for a file that belongs to the package at `local`
    pub fn new(local: GoImportPath) -> Self {
        Self {
            local,
            names: HashMap::new(),
            used: PREDECLARED.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Reference `ident`, importing its package when it is not the local one
    pub fn qualify(&mut self, ident: &GoIdent) -> String {
        if ident.import_path == self.local {
            return ident.go_name.clone();
        }
        format!("{}.{}", self.package_name(&ident.import_path), ident.go_name)
    }

    /// Reference `name` in the package at `import_path`
    pub fn ident(&mut self, import_path: &str, name: &str) -> String {
        self.qualify(&GoIdent::new(name, import_path))
    }

    /// Package name assigned to `import_path`, assigning one if needed
    pub fn package_name(&mut self, import_path: &GoImportPath) -> String {
        if let Some(name) = self.names.get(import_path) {
            return name.clone();
        }
        let base = names::package_name_for_import_path(import_path.as_str());
        let mut name = base.clone();
        let mut suffix = 1;
        while self.used.contains(&name) {
            name = format!("{}{}", base, suffix);
            suffix += 1;
        }
        self.used.insert(name.clone());
        self.names.insert(import_path.clone(), name.clone());
        name
    }

    /// Imported packages as `(name, path)` pairs, sorted by path
    pub fn imports(&self) -> Vec<(&str, &str)> {
        let sorted: BTreeMap<&str, &str> =
            self.names.iter().map(|(path, name)| (path.as_str(), name.as_str())).collect();
        sorted.into_iter().map(|(path, name)| (name, path)).collect()
    }

    /// Whether nothing has been imported yet
    pub fn is_empty(&self) -> bool { self.names.is_empty() }
}
