//! Service constructor builder.

use ir::ServiceDef;
use semantics::ArtifactKind;

use super::doc_comment::service_constructor_doc;
use super::signatures::handler_signature;
use super::{BuildContext, ServiceBuilder};
use crate::go::{Decl, GoImports, Node, NodeKind, Stmt};
use crate::naming::ServiceNames;

/// Emits `New<Svc>Service(s interface{})`, which fills each handler field only when
/// `s` has a method with exactly that handler's signature. Every check is a
/// single-method interface assertion, so one mismatched method leaves only its
/// own field nil.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstructorBuilder;

impl ServiceBuilder for ConstructorBuilder {
    fn name(&self) -> &'static str { "constructor" }

    fn build(
        &self,
        ctx: &BuildContext<'_>,
        service: &ServiceDef,
        imports: &mut GoImports,
    ) -> Vec<Node> {
        let names = ServiceNames::new(service);
        let plan = ctx.plan(service);

        let mut body = vec![Stmt::line(format!("ns := &{}{{}}", names.service))];
        for (method, method_plan) in service.method_refs().zip(&plan.methods) {
            if !method_plan.has(ArtifactKind::ConstructorAssignment) {
                continue;
            }
            let go_name = &method.method.go_name;
            let signature = handler_signature(method, imports);
            body.push(Stmt::block(
                format!("if h, ok := s.(interface{{ {}{} }}); ok {{", go_name, signature),
                vec![Stmt::line(format!("ns.{} = h.{}", go_name, go_name))],
            ));
        }
        body.push(Stmt::line("return ns"));

        vec![Node::new(NodeKind::ServiceConstructor, &names.service_constructor, Decl::Func {
            receiver: None,
            signature: format!("(s interface{{}}) *{}", names.service),
            body,
        })
        .with_doc(service_constructor_doc(service, &names))]
    }
}
