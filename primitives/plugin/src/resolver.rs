//! Descriptor resolution.
//!
//! Turns the file descriptors of a `CodeGeneratorRequest` into the service IR:
//! Go import paths and package names per file, Go identifiers for every message a
//! method refers to, and the comments and deprecation flags attached to services
//! and methods.

use std::collections::HashMap;

use config::{Config, PathsMode};
use ir::{GoIdent, GoImportPath, Location, MethodDef, ProtoFile, ServiceDef, ServiceIR};
use names::{go_camel_case, package_name_for_import_path};
use prost_types::compiler::CodeGeneratorRequest;
use prost_types::{DescriptorProto, FileDescriptorProto, ServiceDescriptorProto};

use crate::{PluginError, Result};

/// `FileDescriptorProto.service`
const SERVICE_FIELD: i32 = 6;
/// `ServiceDescriptorProto.method`
const METHOD_FIELD: i32 = 2;

/// Where a message is declared
#[derive(Debug, Clone)]
struct MessageEntry<'a> {
    file: &'a FileDescriptorProto,
    go_name: String,
}

/// Index over every descriptor in one request.
#[derive(Debug)]
pub struct Resolver<'a> {
    config: &'a Config,
    files: HashMap<&'a str, &'a FileDescriptorProto>,
    messages: HashMap<String, MessageEntry<'a>>,
}

impl<'a> Resolver<'a> {
    /// Index every file and message in `request`
    pub fn new(request: &'a CodeGeneratorRequest, config: &'a Config) -> Self {
        let mut files = HashMap::new();
        let mut messages = HashMap::new();
        for file in &request.proto_file {
            files.insert(file.name(), file);
            let scope =
                if file.package().is_empty() { String::new() } else { format!(".{}", file.package()) };
            index_messages(file, &scope, "", &file.message_type, &mut messages);
        }
        Self { config, files, messages }
    }

    /// Resolve every file protoc asked for, in request order
    pub fn resolve(&self, request: &CodeGeneratorRequest) -> Result<ServiceIR> {
        let files = request
            .file_to_generate
            .iter()
            .map(|name| self.resolve_file(name))
            .collect::<Result<Vec<_>>>()?;
        Ok(ServiceIR::new(files))
    }

    /// Resolve a single file by its proto path
    pub fn resolve_file(&self, name: &str) -> Result<ProtoFile> {
        let file = *self.files.get(name).ok_or_else(|| PluginError::MissingFile(name.to_string()))?;
        let import_path = self.import_path(file)?;
        let package_name = self.go_package_name(file, &import_path);
        let prefix = self.filename_prefix(file, &import_path)?;

        let services = file
            .service
            .iter()
            .enumerate()
            .map(|(index, service)| self.resolve_service(file, index, service))
            .collect::<Result<Vec<_>>>()?;

        Ok(ProtoFile {
            path: file.name().to_string(),
            proto_package: file.package().to_string(),
            go_package_name: package_name,
            go_import_path: import_path,
            generated_filename_prefix: prefix,
            services,
        })
    }

    /// Import path of `file`: an `M` override, else the `go_package` option before any `;`
    pub fn import_path(&self, file: &FileDescriptorProto) -> Result<GoImportPath> {
        if let Some(path) = self.config.import_path_for(file.name()) {
            return Ok(GoImportPath::new(path));
        }
        let go_package = file.options.as_ref().map(|o| o.go_package()).unwrap_or_default();
        match go_package.split(';').next() {
            Some(path) if !path.is_empty() => Ok(GoImportPath::new(path)),
            _ => Err(PluginError::MissingImportPath(file.name().to_string())),
        }
    }

    /// Package name: an `M` override, else the `go_package` portion after `;`, else
    /// derived from the import path
    pub fn go_package_name(&self, file: &FileDescriptorProto, import_path: &GoImportPath) -> String {
        self.config
            .package_name_for(file.name())
            .or_else(|| go_package_suffix(file))
            .map(str::to_string)
            .unwrap_or_else(|| package_name_for_import_path(import_path.as_str()))
    }

    fn filename_prefix(&self, file: &FileDescriptorProto, import_path: &GoImportPath) -> Result<String> {
        let name = file.name();
        let stem = match name.rfind('.') {
            Some(dot) if !name[dot..].contains('/') => &name[..dot],
            _ => name,
        };
        match (self.config.output.paths, self.config.output.module.as_deref()) {
            (PathsMode::SourceRelative, None) => Ok(stem.to_string()),
            (PathsMode::SourceRelative, Some(_)) => Err(PluginError::ModuleWithSourceRelative),
            (PathsMode::Import, module) => {
                let base = stem.rsplit('/').next().unwrap_or(stem);
                let prefix = format!("{}/{}", import_path.as_str().trim_end_matches('/'), base);
                let Some(module) = module else {
                    return Ok(prefix);
                };
                prefix
                    .strip_prefix(module)
                    .and_then(|rest| rest.strip_prefix('/'))
                    .map(str::to_string)
                    .ok_or_else(|| PluginError::OutsideModule {
                        file: name.to_string(),
                        prefix: prefix.clone(),
                        module: module.to_string(),
                    })
            }
        }
    }

    fn resolve_service(
        &self,
        file: &FileDescriptorProto,
        index: usize,
        service: &ServiceDescriptorProto,
    ) -> Result<ServiceDef> {
        let full_name = if file.package().is_empty() {
            service.name().to_string()
        } else {
            format!("{}.{}", file.package(), service.name())
        };
        let service_path = vec![SERVICE_FIELD, index as i32];

        let methods = service
            .method
            .iter()
            .enumerate()
            .map(|(m, method)| -> Result<MethodDef> {
                let mut path = service_path.clone();
                path.extend([METHOD_FIELD, m as i32]);
                let method_name = format!("{}.{}", full_name, method.name());
                Ok(MethodDef {
                    name: method.name().to_string(),
                    go_name: go_camel_case(method.name()),
                    input: self.message_ident(&method_name, method.input_type())?,
                    output: self.message_ident(&method_name, method.output_type())?,
                    client_streaming: method.client_streaming(),
                    server_streaming: method.server_streaming(),
                    deprecated: method.options.as_ref().is_some_and(|o| o.deprecated()),
                    leading_comments: leading_comments(file, &path),
                    location: Location::new(file.name(), path),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(ServiceDef {
            name: service.name().to_string(),
            full_name,
            go_name: go_camel_case(service.name()),
            methods,
            deprecated: service.options.as_ref().is_some_and(|o| o.deprecated()),
            location: Location::new(file.name(), service_path),
        })
    }

    /// Go identifier of the message `type_name` (e.g. `.helloworld.HelloRequest`)
    pub fn message_ident(&self, method: &str, type_name: &str) -> Result<GoIdent> {
        let unknown =
            || PluginError::UnknownType { method: method.to_string(), type_name: type_name.to_string() };
        let key = if type_name.starts_with('.') { type_name.to_string() } else { format!(".{}", type_name) };
        let entry = self.messages.get(&key).ok_or_else(unknown)?;
        let import_path = self.import_path(entry.file)?;
        Ok(GoIdent::new(entry.go_name.clone(), import_path))
    }
}

/// Record `messages` and their nested types under `scope` (the dotted full name of the
/// enclosing package or message); `local` is the name relative to the package.
fn index_messages<'a>(
    file: &'a FileDescriptorProto,
    scope: &str,
    local: &str,
    messages: &'a [DescriptorProto],
    index: &mut HashMap<String, MessageEntry<'a>>,
) {
    for message in messages {
        let full = format!("{}.{}", scope, message.name());
        let relative =
            if local.is_empty() { message.name().to_string() } else { format!("{}.{}", local, message.name()) };
        index_messages(file, &full, &relative, &message.nested_type, index);
        index.insert(full, MessageEntry { file, go_name: go_camel_case(&relative) });
    }
}

/// The `go_package` portion after `;`, if present
fn go_package_suffix(file: &FileDescriptorProto) -> Option<&str> {
    file.options
        .as_ref()
        .and_then(|o| o.go_package.as_deref())
        .and_then(|p| p.split_once(';'))
        .map(|(_, name)| name)
        .filter(|name| !name.is_empty())
}

/// Leading comment attached to the declaration at `path`, or empty
fn leading_comments(file: &FileDescriptorProto, path: &[i32]) -> String {
    file.source_code_info
        .as_ref()
        .and_then(|info| info.location.iter().find(|l| l.path == path))
        .map(|l| l.leading_comments().to_string())
        .unwrap_or_default()
}
