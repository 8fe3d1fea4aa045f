//! Client stub builder.

use ir::{MethodRef, ServiceDef};
use semantics::{client_stream_ops, ArtifactKind, MethodPlan, RpcShape, StreamOp};

use super::doc_comment::{client_interface_doc, deprecation, member_doc};
use super::signatures::client_signature;
use super::{BuildContext, ServiceBuilder};
use crate::go::imports::GRPC_PACKAGE;
use crate::go::{Decl, GoImports, Member, Node, NodeKind, Stmt};
use crate::naming::{MethodNames, ServiceNames};
use crate::utils::go_quote;

/// Emits `<Svc>Client`, its implementation and constructor, per-method call bodies,
/// and the client-side stream wrapper types. Emits nothing in migration mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClientBuilder;

impl ServiceBuilder for ClientBuilder {
    fn name(&self) -> &'static str { "client" }

    fn build(
        &self,
        ctx: &BuildContext<'_>,
        service: &ServiceDef,
        imports: &mut GoImports,
    ) -> Vec<Node> {
        if !ctx.mode().emits_client_and_streams() {
            return Vec::new();
        }
        let names = ServiceNames::new(service);
        let plan = ctx.plan(service);
        let mut nodes = Vec::new();

        let members = service
            .method_refs()
            .zip(&plan.methods)
            .filter(|(_, p)| p.has(ArtifactKind::ClientInterfaceMethod))
            .map(|(m, _)| {
                Member::method(&m.method.go_name, client_signature(m, imports))
                    .with_doc(member_doc(m.method.deprecated, &m.method.leading_comments))
                    .with_annotation(m.method.location.clone())
            })
            .collect();
        nodes.push(
            Node::new(NodeKind::ClientInterface, &names.client, Decl::Interface(members))
                .with_doc(client_interface_doc(service, &names))
                .with_annotation(service.location.clone()),
        );

        let conn = imports.ident(GRPC_PACKAGE, "ClientConnInterface");
        nodes.push(Node::new(
            NodeKind::ClientStruct,
            &names.client_impl,
            Decl::Struct(vec![Member::field("cc", conn.clone())]),
        ));
        nodes.push(
            Node::new(NodeKind::ClientConstructor, &names.client_constructor, Decl::Func {
                receiver: None,
                signature: format!("(cc {}) {}", conn, names.client),
                body: vec![Stmt::line(format!("return &{}{{cc}}", names.client_impl))],
            })
            .with_doc(deprecation(service.deprecated)),
        );

        for (method, method_plan) in service.method_refs().zip(&plan.methods) {
            nodes.extend(method_nodes(method, method_plan, &names, imports));
        }
        nodes
    }
}

fn method_nodes(
    method: MethodRef<'_>,
    plan: &MethodPlan,
    service_names: &ServiceNames,
    imports: &mut GoImports,
) -> Vec<Node> {
    let names = MethodNames::new(method);
    let def = method.method;
    let mut nodes = Vec::new();

    if plan.has(ArtifactKind::ClientStreamDescriptor) {
        let mut fields = vec![Stmt::kv("StreamName", go_quote(&def.name))];
        if plan.shape.server_streams() {
            fields.push(Stmt::kv("ServerStreams", "true"));
        }
        if plan.shape.client_streams() {
            fields.push(Stmt::kv("ClientStreams", "true"));
        }
        nodes.push(
            Node::new(NodeKind::ClientStreamDesc, &names.stream_desc, Decl::Var {
                value: format!("&{}", imports.ident(GRPC_PACKAGE, "StreamDesc")),
                fields,
            })
            .for_method(&def.name),
        );
    }

    if plan.has(ArtifactKind::ClientImplMethod) {
        let body = if plan.shape == RpcShape::Unary {
            vec![
                Stmt::line(format!("out := new({})", imports.qualify(&def.output))),
                Stmt::line(format!(
                    "err := c.cc.Invoke(ctx, {}, in, out, opts...)",
                    go_quote(&names.full_method)
                )),
                Stmt::if_return("err != nil", "nil, err"),
                Stmt::line("return out, nil"),
            ]
        } else {
            let mut body = vec![
                Stmt::line(format!(
                    "stream, err := c.cc.NewStream(ctx, {}, {}, opts...)",
                    names.stream_desc,
                    go_quote(&names.full_method)
                )),
                Stmt::if_return("err != nil", "nil, err"),
                Stmt::line(format!("x := &{}{{stream}}", names.client_stream_impl)),
            ];
            if !plan.shape.client_streams() {
                body.push(Stmt::if_return("err := x.ClientStream.SendMsg(in); err != nil", "nil, err"));
                body.push(Stmt::if_return("err := x.ClientStream.CloseSend(); err != nil", "nil, err"));
            }
            body.push(Stmt::line("return x, nil"));
            body
        };
        nodes.push(
            Node::new(NodeKind::ClientMethod, &def.go_name, Decl::Func {
                receiver: Some(format!("c *{}", service_names.client_impl)),
                signature: client_signature(method, imports),
                body,
            })
            .for_method(&def.name)
            .with_doc(deprecation(def.deprecated)),
        );
    }

    if plan.has(ArtifactKind::ClientStreamType) {
        nodes.extend(stream_type_nodes(method, plan.shape, &names, imports));
    }
    nodes
}

fn stream_type_nodes(
    method: MethodRef<'_>,
    shape: RpcShape,
    names: &MethodNames,
    imports: &mut GoImports,
) -> Vec<Node> {
    let def = method.method;
    let input = imports.qualify(&def.input);
    let output = imports.qualify(&def.output);
    let embedded = imports.ident(GRPC_PACKAGE, "ClientStream");
    let ops = client_stream_ops(shape);

    let mut members: Vec<Member> = ops
        .iter()
        .map(|op| match op {
            StreamOp::Send => Member::method("Send", format!("(*{}) error", input)),
            _ => Member::method(op.method_name(), format!("() (*{}, error)", output)),
        })
        .collect();
    members.push(Member::Embedded(embedded.clone()));

    let mut nodes = vec![
        Node::new(NodeKind::ClientStreamInterface, &names.client_stream, Decl::Interface(members))
            .for_method(&def.name),
        Node::new(
            NodeKind::ClientStreamStruct,
            &names.client_stream_impl,
            Decl::Struct(vec![Member::Embedded(embedded)]),
        )
        .for_method(&def.name),
    ];

    let receive = |body: &mut Vec<Stmt>| {
        body.push(Stmt::line(format!("m := new({})", output)));
        body.push(Stmt::if_return("err := x.ClientStream.RecvMsg(m); err != nil", "nil, err"));
        body.push(Stmt::line("return m, nil"));
    };
    for op in ops {
        let (signature, body) = match op {
            StreamOp::Send => (
                format!("(m *{}) error", input),
                vec![Stmt::line("return x.ClientStream.SendMsg(m)")],
            ),
            StreamOp::Recv => {
                let mut body = Vec::new();
                receive(&mut body);
                (format!("() (*{}, error)", output), body)
            }
            StreamOp::CloseAndRecv => {
                let mut body =
                    vec![Stmt::if_return("err := x.ClientStream.CloseSend(); err != nil", "nil, err")];
                receive(&mut body);
                (format!("() (*{}, error)", output), body)
            }
            StreamOp::SendAndClose => continue,
        };
        nodes.push(
            Node::new(NodeKind::ClientStreamMethod, op.method_name(), Decl::Func {
                receiver: Some(format!("x *{}", names.client_stream_impl)),
                signature,
                body,
            })
            .for_method(&def.name),
        );
    }
    nodes
}
