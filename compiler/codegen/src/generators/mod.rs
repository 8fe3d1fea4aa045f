//! Builders that turn one service into Go declarations.
//!
//! Each builder covers one part of the generated API and runs in a fixed order
//! per service: client stubs, server dispatch, unstable interface, registration,
//! constructor. Builders share nothing but the import set they qualify through.

use config::GenerationMode;
use ir::{ProtoFile, ServiceDef};
use semantics::{ServiceAnalyzer, ServicePlan};

use crate::go::{GoImports, Node};

/// Produces comment text for generated declarations
pub mod doc_comment;
/// Method signatures shared by the builders
pub mod signatures;

/// Client interface, implementation, constructor and client stream types
pub mod client;
/// Capability-checked `New<Svc>Service` constructor
pub mod constructor;
/// `Register<Svc>Service` and its service descriptor
pub mod registration;
/// Service struct, adapters and server stream types
pub mod server;
/// `Unstable<Svc>Service` interface
pub mod unstable;

pub use client::ClientBuilder;
pub use constructor::ConstructorBuilder;
pub use registration::RegistrationBuilder;
pub use server::ServerBuilder;
pub use unstable::UnstableInterfaceBuilder;

/// Read-only inputs shared by every builder during one file's generation
#[derive(Debug, Clone, Copy)]
pub struct BuildContext<'a> {
    mode: GenerationMode,
    file: &'a ProtoFile,
}

impl<'a> BuildContext<'a> {
    /// Create a context for `file` under `mode`
    pub fn new(mode: GenerationMode, file: &'a ProtoFile) -> Self { Self { mode, file } }

    /// Generation mode
    pub fn mode(&self) -> GenerationMode { self.mode }

    /// File being generated
    pub fn file(&self) -> &'a ProtoFile { self.file }

    /// Plan `service` under this context's mode
    pub fn plan(&self, service: &ServiceDef) -> ServicePlan {
        ServiceAnalyzer::analyze(service, self.mode)
    }
}

/// One stage of per-service generation
pub trait ServiceBuilder {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Emit this stage's declarations for `service`
    fn build(&self, ctx: &BuildContext<'_>, service: &ServiceDef, imports: &mut GoImports)
        -> Vec<Node>;
}

/// The builders in emission order
pub fn builders() -> Vec<Box<dyn ServiceBuilder>> {
    vec![
        Box::new(ClientBuilder),
        Box::new(ServerBuilder),
        Box::new(UnstableInterfaceBuilder),
        Box::new(RegistrationBuilder),
        Box::new(ConstructorBuilder),
    ]
}

/// Run every builder over `service`, concatenating their output
pub fn generate_service(
    ctx: &BuildContext<'_>,
    service: &ServiceDef,
    imports: &mut GoImports,
) -> Vec<Node> {
    logging::trace(
        "codegen",
        &format!("{}: methods by shape {:?}", service.full_name, ctx.plan(service).shape_counts()),
    );
    let mut nodes = Vec::new();
    for builder in builders() {
        let emitted = builder.build(ctx, service, imports);
        logging::trace(
            "codegen",
            &format!(
                "{}: {} built {} declarations",
                service.full_name,
                builder.name(),
                emitted.len()
            ),
        );
        nodes.extend(emitted);
    }
    nodes
}
