//! Generation context for code generation pipeline.
//!
//! This module provides a unified context that encapsulates everything one
//! generation run needs: the effective configuration and the resolved services.

use codegen::GrpcGenerator;
use config::{Config, GenerationMode};
use ir::{ProtoFile, ServiceIR};

use crate::PipelineError;

/// Context containing all inputs needed for code generation
#[derive(Debug, Clone)]
pub struct GenerationContext {
    /// Effective configuration
    pub config: Config,
    /// Resolved files and services
    pub service_ir: ServiceIR,
}

impl GenerationContext {
    /// Create a new builder for GenerationContext
    pub fn builder() -> GenerationContextBuilder { GenerationContextBuilder::default() }

    /// Generation mode in effect
    pub fn mode(&self) -> GenerationMode { self.config.generation.mode }

    /// Whether generated files carry source annotations
    pub fn annotate_code(&self) -> bool { self.config.generation.annotate_code }

    /// Files to generate, in request order
    pub fn files(&self) -> &[ProtoFile] { self.service_ir.files() }

    /// Generator configured for this context
    pub fn generator(&self) -> GrpcGenerator { GrpcGenerator::new(self.mode()) }
}

#[derive(Debug, Default)]
/// Builder for GenerationContext
pub struct GenerationContextBuilder {
    /// Effective configuration (defaults when unset)
    config: Option<Config>,
    /// Resolved files and services
    service_ir: Option<ServiceIR>,
}

impl GenerationContextBuilder {
    /// Set the configuration
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the resolved service IR
    pub fn service_ir(mut self, ir: ServiceIR) -> Self {
        self.service_ir = Some(ir);
        self
    }

    /// Build the GenerationContext
    pub fn build(self) -> Result<GenerationContext, PipelineError> {
        Ok(GenerationContext {
            config: self.config.unwrap_or_default(),
            service_ir: self
                .service_ir
                .ok_or_else(|| PipelineError::Message("service_ir is required".to_string()))?,
        })
    }
}
