//! Structured Go declarations.
//!
//! Builders describe what they emit as a list of [`Node`]s; nothing here knows
//! about indentation or alignment. [`super::render`] turns nodes into text.

use ir::Location;

/// What a top-level declaration is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// `type <Svc>Client interface`
    ClientInterface,
    /// `type <svc>Client struct`
    ClientStruct,
    /// `func New<Svc>Client`
    ClientConstructor,
    /// `var <svc><Method>StreamDesc`
    ClientStreamDesc,
    /// Method on the client struct
    ClientMethod,
    /// `type <Svc>_<Method>Client interface`
    ClientStreamInterface,
    /// `type <svc><Method>Client struct`
    ClientStreamStruct,
    /// Method on the client stream struct
    ClientStreamMethod,
    /// `type <Svc>Service struct`
    ServiceStruct,
    /// Unexported adapter method on the service struct
    ServerAdapter,
    /// `type <Svc>_<Method>Server interface`
    ServerStreamInterface,
    /// `type <svc><Method>Server struct`
    ServerStreamStruct,
    /// Method on the server stream struct
    ServerStreamMethod,
    /// `type Unstable<Svc>Service interface`
    UnstableInterface,
    /// `func Register<Svc>Service`
    Registration,
    /// `func New<Svc>Service`
    ServiceConstructor,
}

impl NodeKind {
    /// Kinds that only exist in full mode
    pub fn is_client_or_stream(self) -> bool {
        matches!(
            self,
            Self::ClientInterface
                | Self::ClientStruct
                | Self::ClientConstructor
                | Self::ClientStreamDesc
                | Self::ClientMethod
                | Self::ClientStreamInterface
                | Self::ClientStreamStruct
                | Self::ClientStreamMethod
                | Self::ServerStreamInterface
                | Self::ServerStreamStruct
                | Self::ServerStreamMethod
        )
    }
}

/// A top-level declaration
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Role of the declaration
    pub kind: NodeKind,
    /// Declared identifier
    pub name: String,
    /// Proto name of the method this node was emitted for, if any
    pub method: Option<String>,
    /// Comment lines, each starting with `//`
    pub doc: Vec<String>,
    /// Source location the declared name is linked to
    pub annotation: Option<Location>,
    /// The declaration itself
    pub decl: Decl,
}

/// Declaration forms
#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    /// `type <name> interface { ... }`
    Interface(Vec<Member>),
    /// `type <name> struct { ... }`
    Struct(Vec<Member>),
    /// `func [(<receiver>)] <name><signature> { ... }`
    Func {
        /// Receiver, without parentheses (e.g. `c *greeterClient`)
        receiver: Option<String>,
        /// Parameters and results (e.g. `(cc grpc.ClientConnInterface) GreeterClient`)
        signature: String,
        /// Body statements
        body: Vec<Stmt>,
    },
    /// `var <name> = <value>{ ... }`
    Var {
        /// Composite literal type, including any `&`
        value: String,
        /// Literal elements
        fields: Vec<Stmt>,
    },
}

/// An interface or struct member
#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    /// Interface method
    Method {
        /// Comment lines
        doc: Vec<String>,
        /// Method name
        name: String,
        /// Parameters and results
        signature: String,
        /// Source location the name is linked to
        annotation: Option<Location>,
    },
    /// Named struct field
    Field {
        /// Comment lines
        doc: Vec<String>,
        /// Field name
        name: String,
        /// Field type
        ty: String,
        /// Source location the name is linked to
        annotation: Option<Location>,
    },
    /// Embedded interface or struct type
    Embedded(String),
}

/// A statement or literal element inside a body
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// A single line, verbatim
    Line(String),
    /// `<key>: <value>,` inside a composite literal
    KeyValue {
        /// Field name
        key: String,
        /// Value expression
        value: String,
    },
    /// A line opening a nested block, its body, and the closing line
    Block {
        /// Opening line, ending in `{`
        head: String,
        /// Nested statements
        body: Vec<Stmt>,
        /// Closing line (e.g. `}` or `},`)
        tail: String,
    },
    /// An empty line
    Blank,
}

impl Node {
    /// A node that is not tied to a single method
    pub fn new(kind: NodeKind, name: impl Into<String>, decl: Decl) -> Self {
        Self { kind, name: name.into(), method: None, doc: Vec::new(), annotation: None, decl }
    }

    /// Attach the proto method the node belongs to
    pub fn for_method(mut self, method: &str) -> Self {
        self.method = Some(method.to_string());
        self
    }

    /// Attach comment lines
    pub fn with_doc(mut self, doc: Vec<String>) -> Self {
        self.doc = doc;
        self
    }

    /// Attach a source annotation for the declared name
    pub fn with_annotation(mut self, location: Location) -> Self {
        self.annotation = Some(location);
        self
    }

    /// Names of interface methods or struct fields, in order; embedded types are skipped
    pub fn member_names(&self) -> Vec<&str> {
        match &self.decl {
            Decl::Interface(members) | Decl::Struct(members) => members
                .iter()
                .filter_map(|m| match m {
                    Member::Method { name, .. } | Member::Field { name, .. } => Some(name.as_str()),
                    Member::Embedded(_) => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Members of an interface or struct
    pub fn members(&self) -> &[Member] {
        match &self.decl {
            Decl::Interface(members) | Decl::Struct(members) => members,
            _ => &[],
        }
    }

    /// Body of a function, or the elements of a var literal, flattened depth-first
    /// into their text lines (without indentation or alignment)
    pub fn body_lines(&self) -> Vec<String> {
        let stmts = match &self.decl {
            Decl::Func { body, .. } => body,
            Decl::Var { fields, .. } => fields,
            _ => return Vec::new(),
        };
        let mut lines = Vec::new();
        flatten(stmts, &mut lines);
        lines
    }
}

fn flatten(stmts: &[Stmt], out: &mut Vec<String>) {
    for stmt in stmts {
        match stmt {
            Stmt::Line(line) => out.push(line.clone()),
            Stmt::KeyValue { key, value } => out.push(format!("{}: {},", key, value)),
            Stmt::Block { head, body, tail } => {
                out.push(head.clone());
                flatten(body, out);
                out.push(tail.clone());
            }
            Stmt::Blank => out.push(String::new()),
        }
    }
}

impl Member {
    /// Interface method member
    pub fn method(name: impl Into<String>, signature: impl Into<String>) -> Self {
        Self::Method {
            doc: Vec::new(),
            name: name.into(),
            signature: signature.into(),
            annotation: None,
        }
    }

    /// Struct field member
    pub fn field(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self::Field { doc: Vec::new(), name: name.into(), ty: ty.into(), annotation: None }
    }

    /// Attach comment lines to a method or field; embedded members are unchanged
    pub fn with_doc(mut self, lines: Vec<String>) -> Self {
        if let Self::Method { doc, .. } | Self::Field { doc, .. } = &mut self {
            *doc = lines;
        }
        self
    }

    /// Attach a source annotation to a method or field
    pub fn with_annotation(mut self, location: Location) -> Self {
        if let Self::Method { annotation, .. } | Self::Field { annotation, .. } = &mut self {
            *annotation = Some(location);
        }
        self
    }
}

impl Stmt {
    /// A verbatim line
    pub fn line(text: impl Into<String>) -> Self { Self::Line(text.into()) }

    /// A `key: value,` element
    pub fn kv(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::KeyValue { key: key.into(), value: value.into() }
    }

    /// A block closed by `}`
    pub fn block(head: impl Into<String>, body: Vec<Stmt>) -> Self {
        Self::Block { head: head.into(), body, tail: "}".to_string() }
    }

    /// `if <cond> { return <values> }`
    pub fn if_return(cond: impl Into<String>, values: &str) -> Self {
        Self::block(format!("if {} {{", cond.into()), vec![Self::line(format!("return {}", values))])
    }
}
