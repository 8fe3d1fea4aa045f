//! Hand-built descriptors shared by the plugin tests

#![allow(dead_code)]

use grpcgen_plugin::CodeGeneratorRequest;
use prost_types::source_code_info::Location;
use prost_types::{
    DescriptorProto, FileDescriptorProto, FileOptions, MethodDescriptorProto, MethodOptions,
    ServiceDescriptorProto, ServiceOptions, SourceCodeInfo,
};

pub fn message(name: &str) -> DescriptorProto {
    DescriptorProto { name: Some(name.to_string()), ..Default::default() }
}

pub fn rpc(name: &str, input: &str, output: &str, cs: bool, ss: bool) -> MethodDescriptorProto {
    MethodDescriptorProto {
        name: Some(name.to_string()),
        input_type: Some(input.to_string()),
        output_type: Some(output.to_string()),
        client_streaming: Some(cs),
        server_streaming: Some(ss),
        ..Default::default()
    }
}

pub fn deprecated_rpc(name: &str, input: &str, output: &str) -> MethodDescriptorProto {
    MethodDescriptorProto {
        options: Some(MethodOptions { deprecated: Some(true), ..Default::default() }),
        ..rpc(name, input, output, false, false)
    }
}

pub fn service(name: &str, methods: Vec<MethodDescriptorProto>) -> ServiceDescriptorProto {
    ServiceDescriptorProto { name: Some(name.to_string()), method: methods, ..Default::default() }
}

pub fn deprecated_service(name: &str, methods: Vec<MethodDescriptorProto>) -> ServiceDescriptorProto {
    ServiceDescriptorProto {
        options: Some(ServiceOptions { deprecated: Some(true), ..Default::default() }),
        ..service(name, methods)
    }
}

pub fn comment(path: Vec<i32>, text: &str) -> Location {
    Location { path, leading_comments: Some(text.to_string()), ..Default::default() }
}

pub fn file(name: &str, package: &str, go_package: Option<&str>) -> FileDescriptorProto {
    FileDescriptorProto {
        name: Some(name.to_string()),
        package: Some(package.to_string()),
        options: go_package
            .map(|p| FileOptions { go_package: Some(p.to_string()), ..Default::default() }),
        ..Default::default()
    }
}

/// `helloworld/helloworld.proto` with a commented unary `SayHello`
pub fn helloworld() -> FileDescriptorProto {
    FileDescriptorProto {
        message_type: vec![message("HelloRequest"), message("HelloReply")],
        service: vec![service("Greeter", vec![rpc(
            "SayHello",
            ".helloworld.HelloRequest",
            ".helloworld.HelloReply",
            false,
            false,
        )])],
        source_code_info: Some(SourceCodeInfo {
            location: vec![
                comment(vec![6, 0], " The greeting service definition.\n"),
                comment(vec![6, 0, 2, 0], " Sends a greeting\n"),
            ],
        }),
        ..file(
            "helloworld/helloworld.proto",
            "helloworld",
            Some("google.golang.org/grpc/examples/helloworld/helloworld"),
        )
    }
}

pub fn request(files: Vec<FileDescriptorProto>, generate: &[&str], parameter: &str) -> CodeGeneratorRequest {
    CodeGeneratorRequest {
        file_to_generate: generate.iter().map(|s| s.to_string()).collect(),
        parameter: if parameter.is_empty() { None } else { Some(parameter.to_string()) },
        proto_file: files,
        ..Default::default()
    }
}
