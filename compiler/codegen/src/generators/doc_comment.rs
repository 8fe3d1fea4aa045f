//! Comment text attached to generated declarations.

use ir::ServiceDef;

use crate::naming::ServiceNames;

/// Notice placed before any deprecated declaration
pub const DEPRECATION_COMMENT: &str = "// Deprecated: Do not use.";

/// Render a leading comment from the source file as `//`-prefixed lines.
///
/// The text is split on newlines after dropping one trailing newline; each line is
/// kept verbatim, including its leading space.
pub fn comment_lines(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    let text = text.strip_suffix('\n').unwrap_or(text);
    text.split('\n').map(|line| format!("//{}", line)).collect()
}

/// Deprecation notice followed by the leading comment, for an interface or struct member
pub fn member_doc(deprecated: bool, leading_comments: &str) -> Vec<String> {
    let mut doc = Vec::new();
    if deprecated {
        doc.push(DEPRECATION_COMMENT.to_string());
    }
    doc.extend(comment_lines(leading_comments));
    doc
}

/// Just the deprecation notice, when applicable
pub fn deprecation(deprecated: bool) -> Vec<String> {
    if deprecated {
        vec![DEPRECATION_COMMENT.to_string()]
    } else {
        Vec::new()
    }
}

fn with_service_deprecation(service: &ServiceDef, mut doc: Vec<String>) -> Vec<String> {
    if service.deprecated {
        doc.push("//".to_string());
        doc.push(DEPRECATION_COMMENT.to_string());
    }
    doc
}

/// Doc for the `<Svc>Client` interface
pub fn client_interface_doc(service: &ServiceDef, names: &ServiceNames) -> Vec<String> {
    with_service_deprecation(service, vec![
        format!("// {} is the client API for {} service.", names.client, service.go_name),
        "//".to_string(),
        "// For semantics around ctx use and closing/ending streaming RPCs, please refer to \
         https://pkg.go.dev/google.golang.org/grpc/?tab=doc#ClientConn.NewStream."
            .to_string(),
    ])
}

/// Doc for the `<Svc>Service` struct
pub fn service_struct_doc(service: &ServiceDef, names: &ServiceNames) -> Vec<String> {
    with_service_deprecation(service, vec![
        format!("// {} is the service API for {} service.", names.service, service.go_name),
        "// Fields should be assigned to their respective handler implementations only before"
            .to_string(),
        format!(
            "// {} is called.  Any unassigned fields will result in the",
            names.register
        ),
        "// handler for that method returning an Unimplemented error.".to_string(),
    ])
}

/// Doc for the `Unstable<Svc>Service` interface
pub fn unstable_interface_doc(service: &ServiceDef, names: &ServiceNames) -> Vec<String> {
    with_service_deprecation(service, vec![
        format!("// {} is the service API for {} service.", names.unstable, service.go_name),
        "// New methods may be added to this interface if they are added to the service"
            .to_string(),
        "// definition, which is not a backward-compatible change.  For this reason,".to_string(),
        "// use of this type is not recommended.".to_string(),
    ])
}

/// Doc for `Register<Svc>Service`
pub fn register_doc(service: &ServiceDef, names: &ServiceNames) -> Vec<String> {
    with_service_deprecation(service, vec![format!(
        "// {} registers a service implementation with a gRPC server.",
        names.register
    )])
}

/// Doc for `New<Svc>Service`
pub fn service_constructor_doc(service: &ServiceDef, names: &ServiceNames) -> Vec<String> {
    vec![
        format!(
            "// {} creates a new {} containing the",
            names.service_constructor, names.service
        ),
        format!(
            "// implemented methods of the {} service in s.  Any unimplemented",
            service.go_name
        ),
        "// methods will result in the gRPC server returning an UNIMPLEMENTED status to the client."
            .to_string(),
        "// This includes situations where the method handler is misspelled or has the wrong"
            .to_string(),
        "// signature.  For this reason, this function should be used with great care and"
            .to_string(),
        "// is not recommended to be used by most users.".to_string(),
    ]
}
