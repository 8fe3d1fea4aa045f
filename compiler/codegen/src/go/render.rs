//! Text rendering for [`Node`] trees.
//!
//! Produces gofmt-shaped output: tab indentation, one blank line between
//! top-level declarations, and column alignment for runs of struct fields and
//! runs of `key: value` elements. A comment line, a nested block or any other
//! statement ends a run.

use std::fmt::Write;

use ir::Location;

use super::ast::{Decl, Member, Node, Stmt};

/// A byte range of the output linked to a source location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    /// Source declaration
    pub location: Location,
    /// Offset of the first byte of the identifier
    pub begin: usize,
    /// Offset one past the last byte of the identifier
    pub end: usize,
}

/// Accumulates rendered text and the annotations recorded along the way.
#[derive(Debug, Default)]
pub struct Renderer {
    out: String,
    annotations: Vec<Annotation>,
}

impl Renderer {
    /// Create an empty renderer
    pub fn new() -> Self { Self::default() }

    /// Write one line at `depth` tabs; an empty line gets no indentation
    pub fn line(&mut self, depth: usize, text: &str) -> std::fmt::Result {
        if text.is_empty() {
            return self.out.write_char('\n');
        }
        for _ in 0..depth {
            self.out.write_char('\t')?;
        }
        writeln!(self.out, "{}", text)
    }

    /// Write comment lines at `depth`
    pub fn comments(&mut self, depth: usize, lines: &[String]) -> std::fmt::Result {
        lines.iter().try_for_each(|line| self.line(depth, line))
    }

    /// Write a top-level declaration followed by a blank line
    pub fn node(&mut self, node: &Node) -> std::fmt::Result {
        self.comments(0, &node.doc)?;
        match &node.decl {
            Decl::Interface(members) => {
                self.annotate_next(node.annotation.as_ref(), "type ".len(), &node.name);
                self.line(0, &format!("type {} interface {{", node.name))?;
                self.members(members)?;
                self.line(0, "}")?;
            }
            Decl::Struct(members) => {
                self.annotate_next(node.annotation.as_ref(), "type ".len(), &node.name);
                self.line(0, &format!("type {} struct {{", node.name))?;
                self.members(members)?;
                self.line(0, "}")?;
            }
            Decl::Func { receiver, signature, body } => {
                let head = match receiver {
                    Some(receiver) => format!("func ({}) ", receiver),
                    None => "func ".to_string(),
                };
                self.annotate_next(node.annotation.as_ref(), head.len(), &node.name);
                self.line(0, &format!("{}{}{} {{", head, node.name, signature))?;
                self.stmts(1, body)?;
                self.line(0, "}")?;
            }
            Decl::Var { value, fields } => {
                self.annotate_next(node.annotation.as_ref(), "var ".len(), &node.name);
                self.line(0, &format!("var {} = {}{{", node.name, value))?;
                self.stmts(1, fields)?;
                self.line(0, "}")?;
            }
        }
        self.line(0, "")
    }

    fn members(&mut self, members: &[Member]) -> std::fmt::Result {
        let widths = field_widths(members);
        for (member, width) in members.iter().zip(widths) {
            match member {
                Member::Method { doc, name, signature, annotation } => {
                    self.comments(1, doc)?;
                    self.annotate_next(annotation.as_ref(), 1, name);
                    self.line(1, &format!("{}{}", name, signature))?;
                }
                Member::Field { doc, name, ty, annotation } => {
                    self.comments(1, doc)?;
                    self.annotate_next(annotation.as_ref(), 1, name);
                    self.line(1, &format!("{:<width$} {}", name, ty, width = width))?;
                }
                Member::Embedded(ty) => self.line(1, ty)?,
            }
        }
        Ok(())
    }

    fn stmts(&mut self, depth: usize, stmts: &[Stmt]) -> std::fmt::Result {
        let widths = key_widths(stmts);
        for (stmt, width) in stmts.iter().zip(widths) {
            match stmt {
                Stmt::Line(text) => self.line(depth, text)?,
                Stmt::KeyValue { key, value } => {
                    let key = format!("{}:", key);
                    self.line(depth, &format!("{:<width$} {},", key, value, width = width + 1))?;
                }
                Stmt::Block { head, body, tail } => {
                    self.line(depth, head)?;
                    self.stmts(depth + 1, body)?;
                    self.line(depth, tail)?;
                }
                Stmt::Blank => self.line(depth, "")?,
            }
        }
        Ok(())
    }

    /// Record an annotation for `name`, which starts `offset` bytes into the next line
    fn annotate_next(&mut self, location: Option<&Location>, offset: usize, name: &str) {
        if let Some(location) = location {
            let begin = self.out.len() + offset;
            self.annotations.push(Annotation {
                location: location.clone(),
                begin,
                end: begin + name.len(),
            });
        }
    }

    /// Rendered text so far
    pub fn as_str(&self) -> &str { &self.out }

    /// Consume the renderer, trimming trailing blank lines so the text ends in one newline
    pub fn finish(mut self) -> (String, Vec<Annotation>) {
        while self.out.ends_with("\n\n") {
            self.out.pop();
        }
        (self.out, self.annotations)
    }
}

/// Alignment width for each member: the longest field name in its run.
/// A run is broken by a commented field or any non-field member.
fn field_widths(members: &[Member]) -> Vec<usize> {
    let runs = members.iter().map(|m| match m {
        Member::Field { doc, name, .. } => Some((doc.is_empty(), name.len())),
        _ => None,
    });
    run_widths(runs)
}

/// Alignment width for each statement: the longest key in its run of `key: value` lines.
fn key_widths(stmts: &[Stmt]) -> Vec<usize> {
    let runs = stmts.iter().map(|s| match s {
        Stmt::KeyValue { key, .. } => Some((true, key.len())),
        _ => None,
    });
    run_widths(runs)
}

/// `items` yields `Some((continues_run, len))` for alignable entries and `None` for breaks.
fn run_widths(items: impl Iterator<Item = Option<(bool, usize)>>) -> Vec<usize> {
    let items: Vec<_> = items.collect();
    let mut widths = vec![0; items.len()];
    let mut start = 0;
    while start < items.len() {
        if items[start].is_none() {
            start += 1;
            continue;
        }
        let mut end = start + 1;
        while let Some(Some((true, _))) = items.get(end) {
            end += 1;
        }
        let width = items[start..end].iter().flatten().map(|(_, len)| *len).max().unwrap_or(0);
        widths[start..end].iter_mut().for_each(|w| *w = width);
        start = end;
    }
    widths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::go::ast::NodeKind;

    fn render(node: &Node) -> String {
        let mut renderer = Renderer::new();
        renderer.node(node).expect("rendering into a String cannot fail");
        renderer.finish().0
    }

    #[test]
    fn test_struct_fields_align_until_a_comment() {
        let node = Node::new(
            NodeKind::ServiceStruct,
            "S",
            Decl::Struct(vec![
                Member::field("A", "int"),
                Member::field("Longer", "string"),
                Member::field("B", "bool").with_doc(vec!["// B".to_string()]),
                Member::field("CC", "error"),
            ]),
        );
        assert_eq!(
            render(&node),
            "type S struct {\n\tA      int\n\tLonger string\n\t// B\n\tB  bool\n\tCC error\n}\n"
        );
    }

    #[test]
    fn test_key_values_align_within_blocks() {
        let node = Node::new(
            NodeKind::ClientStreamDesc,
            "desc",
            Decl::Var {
                value: "&grpc.StreamDesc".to_string(),
                fields: vec![Stmt::kv("StreamName", "\"Chat\""), Stmt::kv("ServerStreams", "true")],
            },
        );
        assert_eq!(
            render(&node),
            "var desc = &grpc.StreamDesc{\n\tStreamName:    \"Chat\",\n\tServerStreams: true,\n}\n"
        );
    }

    #[test]
    fn test_nested_blocks_indent_and_blank_lines_are_bare() {
        let node = Node::new(
            NodeKind::Registration,
            "F",
            Decl::Func {
                receiver: Some("s *T".to_string()),
                signature: "()".to_string(),
                body: vec![Stmt::if_return("x == nil", "nil"), Stmt::Blank, Stmt::line("done()")],
            },
        );
        assert_eq!(
            render(&node),
            "func (s *T) F() {\n\tif x == nil {\n\t\treturn nil\n\t}\n\n\tdone()\n}\n"
        );
    }

    #[test]
    fn test_annotation_offsets_cover_names() {
        let location = Location::new("a.proto", vec![6, 0]);
        let node = Node::new(
            NodeKind::UnstableInterface,
            "UnstableSvc",
            Decl::Interface(vec![
                Member::method("Do", "()").with_annotation(Location::new("a.proto", vec![6, 0, 2, 0]))
            ]),
        )
        .with_doc(vec!["// doc".to_string()])
        .with_annotation(location.clone());

        let mut renderer = Renderer::new();
        renderer.node(&node).expect("rendering into a String cannot fail");
        let (text, annotations) = renderer.finish();

        assert_eq!(annotations.len(), 2);
        assert_eq!(&text[annotations[0].begin..annotations[0].end], "UnstableSvc");
        assert_eq!(annotations[0].location, location);
        assert_eq!(&text[annotations[1].begin..annotations[1].end], "Do");
        assert_eq!(annotations[1].location.path, vec![6, 0, 2, 0]);
    }
}
