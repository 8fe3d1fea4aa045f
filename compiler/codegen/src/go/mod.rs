//! Go source model: declarations, imports and rendering.

pub mod ast;
pub mod file;
pub mod imports;
pub mod render;

pub use ast::{Decl, Member, Node, NodeKind, Stmt};
pub use imports::GoImports;
pub use render::{Annotation, Renderer};
