//! Pipeline orchestration for the main entry points.
//!
//! This module coordinates configuration, descriptor resolution and code
//! generation for one protoc invocation, or for an IR file loaded from disk.

use std::io::{Read, Write};
use std::path::Path;

use codegen::{CodeGenerator, GeneratedFile};
use config::Config;
use ir::ServiceIR;
use plugin::{
    error_response, read_request, write_response, CodeGeneratorRequest, CodeGeneratorResponse,
    Resolver, SUPPORTED_FEATURES,
};

use crate::generation_context::GenerationContext;
use crate::response::response_file;
use crate::{PipelineError, Result};

/// Generate every file in `ctx`, skipping files that declare no services
pub fn generate(ctx: &GenerationContext) -> Result<Vec<GeneratedFile>> {
    let generator = ctx.generator();
    let mut generated = Vec::new();
    for file in ctx.files() {
        if !file.has_services() {
            logging::debug("pipeline", &format!("{}: no services, skipping", file.path));
            continue;
        }
        let mut out = generator.generate(std::slice::from_ref(file))?;
        for g in &out {
            logging::debug(
                "pipeline",
                &format!(
                    "{}: {} services -> {} ({} bytes)",
                    file.path,
                    file.services.len(),
                    g.name,
                    g.content.len()
                ),
            );
        }
        generated.append(&mut out);
    }
    Ok(generated)
}

/// Handle one request, reporting failures in the response's `error` field
pub fn handle_request(request: &CodeGeneratorRequest) -> CodeGeneratorResponse {
    match try_handle_request(request) {
        Ok(response) => response,
        Err(e) => error_response(e.to_string()),
    }
}

/// Handle one request, returning failures to the caller
pub fn try_handle_request(request: &CodeGeneratorRequest) -> Result<CodeGeneratorResponse> {
    let config = Config::from_parameter(request.parameter.as_deref().unwrap_or_default())?;
    logging::init(&config.logging.level);
    logging::trace(
        "pipeline",
        &format!(
            "request: {} files to generate, {} descriptors",
            request.file_to_generate.len(),
            request.proto_file.len()
        ),
    );

    let service_ir = Resolver::new(request, &config).resolve(request)?;
    let ctx = GenerationContext::builder().config(config).service_ir(service_ir).build()?;
    let annotate = ctx.annotate_code();
    let files = generate(&ctx)?;

    Ok(CodeGeneratorResponse {
        supported_features: Some(SUPPORTED_FEATURES),
        file: files.iter().map(|f| response_file(f, annotate)).collect(),
        ..Default::default()
    })
}

/// Run the plugin protocol: read a request from `reader`, write the response to `writer`.
///
/// Generation failures are reported to protoc inside the response; only framing
/// failures are returned as errors.
pub fn run<R: Read, W: Write>(reader: R, writer: W) -> Result<()> {
    let request = read_request(reader)?;
    let response = handle_request(&request);
    write_response(writer, &response)?;
    Ok(())
}

/// Generate from a JSON IR file instead of a protoc request
pub fn compile_from_ir(path: &Path, config: Config) -> Result<Vec<GeneratedFile>> {
    let service_ir = ServiceIR::from_file(path).map_err(|e| PipelineError::IrLoad {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    logging::trace(
        "pipeline",
        &format!("loaded {} services from {}", service_ir.service_count(), path.display()),
    );
    let ctx = GenerationContext::builder().config(config).service_ir(service_ir).build()?;
    generate(&ctx)
}
