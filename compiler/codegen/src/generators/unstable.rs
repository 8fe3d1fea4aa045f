//! Unstable interface builder.

use ir::ServiceDef;
use semantics::ArtifactKind;

use super::doc_comment::{member_doc, unstable_interface_doc};
use super::signatures::handler_signature;
use super::{BuildContext, ServiceBuilder};
use crate::go::{Decl, GoImports, Member, Node, NodeKind};
use crate::naming::ServiceNames;

/// Emits `Unstable<Svc>Service`, an interface listing every handler signature.
///
/// Runs in every mode, including migration mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnstableInterfaceBuilder;

impl ServiceBuilder for UnstableInterfaceBuilder {
    fn name(&self) -> &'static str { "unstable" }

    fn build(
        &self,
        ctx: &BuildContext<'_>,
        service: &ServiceDef,
        imports: &mut GoImports,
    ) -> Vec<Node> {
        let names = ServiceNames::new(service);
        let plan = ctx.plan(service);

        let members = service
            .method_refs()
            .zip(&plan.methods)
            .filter(|(_, p)| p.has(ArtifactKind::UnstableInterfaceMethod))
            .map(|(m, _)| {
                Member::method(&m.method.go_name, handler_signature(m, imports))
                    .with_doc(member_doc(m.method.deprecated, &m.method.leading_comments))
                    .with_annotation(m.method.location.clone())
            })
            .collect();

        vec![Node::new(NodeKind::UnstableInterface, &names.unstable, Decl::Interface(members))
            .with_doc(unstable_interface_doc(service, &names))
            .with_annotation(service.location.clone())]
    }
}
