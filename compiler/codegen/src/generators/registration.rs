//! Registration builder.

use ir::ServiceDef;
use semantics::{registration_group, ArtifactKind, RegistrationGroup};

use super::doc_comment::register_doc;
use super::{BuildContext, ServiceBuilder};
use crate::go::imports::GRPC_PACKAGE;
use crate::go::{Decl, GoImports, Node, NodeKind, Stmt};
use crate::naming::{MethodNames, ServiceNames};
use crate::utils::go_quote;

/// Emits `Register<Svc>Service`, which builds the service descriptor and hands it
/// to the runtime's registrar with a nil implementation pointer.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegistrationBuilder;

impl ServiceBuilder for RegistrationBuilder {
    fn name(&self) -> &'static str { "registration" }

    fn build(
        &self,
        ctx: &BuildContext<'_>,
        service: &ServiceDef,
        imports: &mut GoImports,
    ) -> Vec<Node> {
        let names = ServiceNames::new(service);
        let plan = ctx.plan(service);

        let registrar = imports.ident(GRPC_PACKAGE, "ServiceRegistrar");
        let desc = imports.ident(GRPC_PACKAGE, "ServiceDesc");
        let method_desc = imports.ident(GRPC_PACKAGE, "MethodDesc");
        let stream_desc = imports.ident(GRPC_PACKAGE, "StreamDesc");

        let mut methods = Vec::new();
        let mut streams = Vec::new();
        for (method, method_plan) in service.method_refs().zip(&plan.methods) {
            if !method_plan.has(ArtifactKind::RegistrationEntry) {
                continue;
            }
            let def = method.method;
            let handler = format!("srv.{}", MethodNames::new(method).adapter);
            match registration_group(method_plan.shape) {
                RegistrationGroup::Methods => methods.push(entry(vec![
                    Stmt::kv("MethodName", go_quote(&def.name)),
                    Stmt::kv("Handler", handler),
                ])),
                RegistrationGroup::Streams { server_streams, client_streams } => {
                    let mut fields = vec![
                        Stmt::kv("StreamName", go_quote(&def.name)),
                        Stmt::kv("Handler", handler),
                    ];
                    if server_streams {
                        fields.push(Stmt::kv("ServerStreams", "true"));
                    }
                    if client_streams {
                        fields.push(Stmt::kv("ClientStreams", "true"));
                    }
                    streams.push(entry(fields));
                }
            }
        }

        let descriptor = vec![
            Stmt::kv("ServiceName", go_quote(&service.full_name)),
            table("Methods", &method_desc, methods),
            table("Streams", &stream_desc, streams),
            Stmt::kv("Metadata", go_quote(&ctx.file().path)),
        ];
        let body = vec![
            Stmt::Block { head: format!("sd := {}{{", desc), body: descriptor, tail: "}".into() },
            Stmt::Blank,
            Stmt::line("s.RegisterService(&sd, nil)"),
        ];

        vec![Node::new(NodeKind::Registration, &names.register, Decl::Func {
            receiver: None,
            signature: format!("(s {}, srv *{})", registrar, names.service),
            body,
        })
        .with_doc(register_doc(service, &names))]
    }
}

fn entry(fields: Vec<Stmt>) -> Stmt { Stmt::Block { head: "{".into(), body: fields, tail: "},".into() } }

/// `<key>: []<ty>{ ... },`, collapsed onto one line when there are no entries
fn table(key: &str, ty: &str, entries: Vec<Stmt>) -> Stmt {
    if entries.is_empty() {
        return Stmt::kv(key, format!("[]{}{{}}", ty));
    }
    Stmt::Block { head: format!("{}: []{}{{", key, ty), body: entries, tail: "},".into() }
}
