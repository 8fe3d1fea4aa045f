//! Server dispatch builder.

use ir::{MethodRef, ServiceDef};
use semantics::{adapter_form, server_stream_ops, AdapterForm, ArtifactKind, RpcShape, StreamOp};

use super::doc_comment::{member_doc, service_struct_doc};
use super::signatures::{handler_field_type, stream_adapter_signature, unary_adapter_signature};
use super::{BuildContext, ServiceBuilder};
use crate::go::imports::{CODES_PACKAGE, CONTEXT_PACKAGE, GRPC_PACKAGE, STATUS_PACKAGE};
use crate::go::{Decl, GoImports, Member, Node, NodeKind, Stmt};
use crate::naming::{MethodNames, ServiceNames};
use crate::utils::go_quote;

/// Emits the `<Svc>Service` handler struct, one adapter per method bridging the
/// runtime's generic handler to the struct field, and the server-side stream
/// wrapper types. The struct and adapters are emitted in every mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServerBuilder;

impl ServiceBuilder for ServerBuilder {
    fn name(&self) -> &'static str { "server" }

    fn build(
        &self,
        ctx: &BuildContext<'_>,
        service: &ServiceDef,
        imports: &mut GoImports,
    ) -> Vec<Node> {
        let names = ServiceNames::new(service);
        let plan = ctx.plan(service);
        let planned: Vec<_> = service.method_refs().zip(&plan.methods).collect();

        let fields = planned
            .iter()
            .filter(|(_, p)| p.has(ArtifactKind::ServerHandlerField))
            .map(|(m, _)| {
                Member::field(&m.method.go_name, handler_field_type(*m, imports))
                    .with_doc(member_doc(m.method.deprecated, &m.method.leading_comments))
                    .with_annotation(m.method.location.clone())
            })
            .collect();
        let mut nodes = vec![Node::new(NodeKind::ServiceStruct, &names.service, Decl::Struct(fields))
            .with_doc(service_struct_doc(service, &names))
            .with_annotation(service.location.clone())];

        for (method, method_plan) in &planned {
            if method_plan.has(ArtifactKind::ServerAdapter) {
                nodes.push(adapter_node(*method, &names, imports));
            }
        }
        for (method, method_plan) in &planned {
            if method_plan.has(ArtifactKind::ServerStreamType) {
                nodes.extend(stream_type_nodes(*method, method_plan.shape, imports));
            }
        }
        nodes
    }
}

fn adapter_node(
    method: MethodRef<'_>,
    service_names: &ServiceNames,
    imports: &mut GoImports,
) -> Node {
    let def = method.method;
    let names = MethodNames::new(method);
    let form = adapter_form(RpcShape::of(def));

    let unimplemented = format!(
        "{}({}, {})",
        imports.ident(STATUS_PACKAGE, "Errorf"),
        imports.ident(CODES_PACKAGE, "Unimplemented"),
        go_quote(&format!("method {} not implemented", def.go_name))
    );
    let (signature, nil_check) = match form {
        AdapterForm::Unary => (unary_adapter_signature(imports), format!("nil, {}", unimplemented)),
        _ => (stream_adapter_signature(imports), unimplemented),
    };

    let mut body = vec![Stmt::if_return(format!("s.{} == nil", def.go_name), &nil_check)];
    match form {
        AdapterForm::Unary => {
            let input = imports.qualify(&def.input);
            body.push(Stmt::line(format!("in := new({})", input)));
            body.push(Stmt::if_return("err := dec(in); err != nil", "nil, err"));
            body.push(Stmt::if_return("interceptor == nil", &format!("s.{}(ctx, in)", def.go_name)));
            body.push(Stmt::block(
                format!("info := &{}{{", imports.ident(GRPC_PACKAGE, "UnaryServerInfo")),
                vec![Stmt::kv("Server", "s"), Stmt::kv("FullMethod", go_quote(&names.full_method))],
            ));
            body.push(Stmt::block(
                format!(
                    "handler := func(ctx {}, req interface{{}}) (interface{{}}, error) {{",
                    imports.ident(CONTEXT_PACKAGE, "Context")
                ),
                vec![Stmt::line(format!("return s.{}(ctx, req.(*{}))", def.go_name, input))],
            ));
            body.push(Stmt::line("return interceptor(ctx, in, info, handler)"));
        }
        AdapterForm::PreReceive => {
            body.push(Stmt::line(format!("m := new({})", imports.qualify(&def.input))));
            body.push(Stmt::if_return("err := stream.RecvMsg(m); err != nil", "err"));
            body.push(Stmt::line(format!(
                "return s.{}(m, &{}{{stream}})",
                def.go_name, names.server_stream_impl
            )));
        }
        AdapterForm::StreamOnly => {
            body.push(Stmt::line(format!(
                "return s.{}(&{}{{stream}})",
                def.go_name, names.server_stream_impl
            )));
        }
    }

    Node::new(NodeKind::ServerAdapter, &names.adapter, Decl::Func {
        receiver: Some(format!("s *{}", service_names.service)),
        signature,
        body,
    })
    .for_method(&def.name)
}

fn stream_type_nodes(
    method: MethodRef<'_>,
    shape: RpcShape,
    imports: &mut GoImports,
) -> Vec<Node> {
    let def = method.method;
    let names = MethodNames::new(method);
    let input = imports.qualify(&def.input);
    let output = imports.qualify(&def.output);
    let embedded = imports.ident(GRPC_PACKAGE, "ServerStream");
    let ops = server_stream_ops(shape);

    let mut members: Vec<Member> = ops
        .iter()
        .map(|op| match op {
            StreamOp::Recv => Member::method("Recv", format!("() (*{}, error)", input)),
            _ => Member::method(op.method_name(), format!("(*{}) error", output)),
        })
        .collect();
    members.push(Member::Embedded(embedded.clone()));

    let mut nodes = vec![
        Node::new(NodeKind::ServerStreamInterface, &names.server_stream, Decl::Interface(members))
            .for_method(&def.name),
        Node::new(
            NodeKind::ServerStreamStruct,
            &names.server_stream_impl,
            Decl::Struct(vec![Member::Embedded(embedded)]),
        )
        .for_method(&def.name),
    ];

    for op in ops {
        let (signature, body) = match op {
            StreamOp::Send | StreamOp::SendAndClose => (
                format!("(m *{}) error", output),
                vec![Stmt::line("return x.ServerStream.SendMsg(m)")],
            ),
            StreamOp::Recv => (format!("() (*{}, error)", input), vec![
                Stmt::line(format!("m := new({})", input)),
                Stmt::if_return("err := x.ServerStream.RecvMsg(m); err != nil", "nil, err"),
                Stmt::line("return m, nil"),
            ]),
            StreamOp::CloseAndRecv => continue,
        };
        nodes.push(
            Node::new(NodeKind::ServerStreamMethod, op.method_name(), Decl::Func {
                receiver: Some(format!("x *{}", names.server_stream_impl)),
                signature,
                body,
            })
            .for_method(&def.name),
        );
    }
    nodes
}
