//! Conversion of generated files into protoc response entries.

use codegen::GeneratedFile;
use prost_types::compiler::code_generator_response::File;
use prost_types::generated_code_info::Annotation;
use prost_types::GeneratedCodeInfo;

/// Build the response entry for `file`; annotations are attached only when `annotate` is set
pub fn response_file(file: &GeneratedFile, annotate: bool) -> File {
    File {
        name: Some(file.name.clone()),
        content: Some(file.content.clone()),
        generated_code_info: annotate.then(|| code_info(file)),
        ..Default::default()
    }
}

fn code_info(file: &GeneratedFile) -> GeneratedCodeInfo {
    GeneratedCodeInfo {
        annotation: file
            .annotations
            .iter()
            .map(|a| Annotation {
                path: a.location.path.clone(),
                source_file: Some(a.location.source_file.clone()),
                begin: Some(a.begin as i32),
                end: Some(a.end as i32),
                ..Default::default()
            })
            .collect(),
    }
}
