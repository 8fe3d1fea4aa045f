//! Whole-file layout: header, package clause, imports, runtime assertion, declarations.

use super::ast::Node;
use super::imports::GoImports;
use super::render::{Annotation, Renderer};
use crate::utils::go_quote;

/// First line of every generated file
pub const GENERATED_HEADER: &str = "// Code generated by protoc-gen-go-grpc. DO NOT EDIT.";

/// Render a complete Go source file.
///
/// `assertion` is the already-qualified `SupportPackageIsVersion7` identifier; qualifying
/// it before any declaration keeps the runtime package under its plain name.
pub fn render_file(
    package: &str,
    imports: &GoImports,
    assertion: &str,
    nodes: &[Node],
) -> std::result::Result<(String, Vec<Annotation>), std::fmt::Error> {
    let mut r = Renderer::new();
    r.line(0, GENERATED_HEADER)?;
    r.line(0, "")?;
    r.line(0, &format!("package {}", package))?;
    r.line(0, "")?;

    if !imports.is_empty() {
        r.line(0, "import (")?;
        for (name, path) in imports.imports() {
            r.line(1, &format!("{} {}", name, go_quote(path)))?;
        }
        r.line(0, ")")?;
        r.line(0, "")?;
    }

    r.line(0, "// This is a compile-time assertion to ensure that this generated file")?;
    r.line(0, "// is compatible with the grpc package it is being compiled against.")?;
    r.line(0, &format!("const _ = {}", assertion))?;
    r.line(0, "")?;

    for node in nodes {
        r.node(node)?;
    }
    Ok(r.finish())
}
