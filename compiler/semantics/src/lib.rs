#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Semantic analysis for gRPC service IR.
//!
//! Classifies each method's streaming shape and plans the artifacts it contributes
//! under a generation mode. The resulting plans are checked against a set of
//! invariants before any code is generated.

use std::collections::{BTreeMap, BTreeSet};

use config::GenerationMode;
use ir::ServiceDef;

/// Artifact planning per (shape, mode)
pub mod artifacts;
/// Streaming shape classification
pub mod shape;

pub use artifacts::{
    adapter_form, client_stream_ops, plan, registration_group, server_stream_ops, AdapterForm,
    ArtifactKind, RegistrationGroup, StreamOp,
};
pub use shape::RpcShape;

/// An invariant that can be checked against a ServicePlan
#[derive(Clone)]
pub struct PlanInvariant {
    /// The name of the invariant.
    pub name: String,
    /// Human-readable description of what the invariant checks.
    pub description: String,
    /// Function that validates the invariant against a plan.
    pub check: fn(&MethodPlan, GenerationMode) -> bool,
}

/// A structured diagnostic emitted by semantic analysis
#[derive(Debug, Clone)]
pub struct PlanDiagnostic {
    /// Name of the invariant that failed.
    pub invariant: String,
    /// Human-readable error message.
    pub message: String,
    /// Methods that violate the invariant.
    pub related_methods: Vec<String>,
}

/// Planned output for one service.
#[derive(Debug, Clone, PartialEq)]
pub struct ServicePlan {
    /// Package-qualified service name
    pub service: String,
    /// Mode the plan was made for
    pub mode: GenerationMode,
    /// One entry per method, in declaration order
    pub methods: Vec<MethodPlan>,
}

/// Planned output for one method.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodPlan {
    /// Proto method name
    pub name: String,
    /// Streaming shape
    pub shape: RpcShape,
    /// Artifacts the method contributes
    pub artifacts: BTreeSet<ArtifactKind>,
}

impl MethodPlan {
    /// Whether the plan includes `kind`
    pub fn has(&self, kind: ArtifactKind) -> bool { self.artifacts.contains(&kind) }
}

/// Analyzer for building service plans from the IR.
pub struct ServiceAnalyzer;

impl ServiceAnalyzer {
    /// Plans every method of `service` under `mode`.
    pub fn analyze(service: &ServiceDef, mode: GenerationMode) -> ServicePlan {
        let methods = service
            .methods
            .iter()
            .map(|method| {
                let shape = RpcShape::of(method);
                MethodPlan { name: method.name.clone(), shape, artifacts: plan(shape, mode) }
            })
            .collect();
        ServicePlan { service: service.full_name.clone(), mode, methods }
    }

    /// Returns the default set of plan invariants
    pub fn default_invariants() -> Vec<PlanInvariant> {
        vec![
            PlanInvariant {
                name: "Server dispatch is always planned".into(),
                description: "Every method needs a handler field, an adapter and a registration entry"
                    .into(),
                check: |m, _| {
                    m.has(ArtifactKind::ServerHandlerField)
                        && m.has(ArtifactKind::ServerAdapter)
                        && m.has(ArtifactKind::RegistrationEntry)
                },
            },
            PlanInvariant {
                name: "Unstable interface covers every method".into(),
                description: "The unstable interface and constructor list every method in any mode"
                    .into(),
                check: |m, _| {
                    m.has(ArtifactKind::UnstableInterfaceMethod)
                        && m.has(ArtifactKind::ConstructorAssignment)
                },
            },
            PlanInvariant {
                name: "Migration mode emits no client or stream types".into(),
                description: "Client stubs and stream wrappers are reserved for full mode".into(),
                check: |m, mode| {
                    mode.emits_client_and_streams()
                        || m.artifacts.iter().all(|a| !a.requires_full_mode())
                },
            },
            PlanInvariant {
                name: "Unary methods have no stream types".into(),
                description: "Stream descriptors and wrappers exist only for streaming shapes".into(),
                check: |m, _| {
                    m.shape.is_streaming() || m.artifacts.iter().all(|a| !a.requires_streaming())
                },
            },
        ]
    }
}

impl ServicePlan {
    /// Validate the plan and return detailed diagnostics
    pub fn diagnostics_for_invariants(&self, invariants: &[PlanInvariant]) -> Vec<PlanDiagnostic> {
        invariants
            .iter()
            .filter_map(|inv| {
                let related: Vec<String> = self
                    .methods
                    .iter()
                    .filter(|m| !(inv.check)(m, self.mode))
                    .map(|m| format!("{}/{}", self.service, m.name))
                    .collect();
                (!related.is_empty()).then(|| PlanDiagnostic {
                    invariant: inv.name.clone(),
                    message: inv.description.clone(),
                    related_methods: related,
                })
            })
            .collect()
    }

    /// Number of methods of each shape
    pub fn shape_counts(&self) -> BTreeMap<RpcShape, usize> {
        let mut counts = BTreeMap::new();
        for method in &self.methods {
            *counts.entry(method.shape).or_insert(0) += 1;
        }
        counts
    }
}
