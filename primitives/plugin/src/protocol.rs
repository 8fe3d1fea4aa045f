//! protoc plugin framing.
//!
//! protoc writes one encoded `CodeGeneratorRequest` to the plugin's stdin and
//! closes it, then reads one encoded `CodeGeneratorResponse` from its stdout.

use std::io::{Read, Write};

use prost::Message;
use prost_types::compiler::code_generator_response::Feature;
use prost_types::compiler::{CodeGeneratorRequest, CodeGeneratorResponse};

use crate::Result;

/// Feature bits advertised in every response
pub const SUPPORTED_FEATURES: u64 = Feature::Proto3Optional as u64;

/// Decode a request from everything remaining in `reader`
pub fn read_request<R: Read>(mut reader: R) -> Result<CodeGeneratorRequest> {
    let mut input = Vec::new();
    reader.read_to_end(&mut input)?;
    Ok(CodeGeneratorRequest::decode(input.as_slice())?)
}

/// Encode `response` and write it to `writer`
pub fn write_response<W: Write>(mut writer: W, response: &CodeGeneratorResponse) -> Result<()> {
    let mut output = Vec::with_capacity(response.encoded_len());
    response.encode(&mut output)?;
    writer.write_all(&output)?;
    writer.flush()?;
    Ok(())
}

/// A response carrying only an error message; protoc reports it and fails the build
pub fn error_response(message: impl Into<String>) -> CodeGeneratorResponse {
    CodeGeneratorResponse {
        error: Some(message.into()),
        supported_features: Some(SUPPORTED_FEATURES),
        ..Default::default()
    }
}
