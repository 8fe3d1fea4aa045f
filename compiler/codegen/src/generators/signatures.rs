//! Method signatures shared by several builders.
//!
//! Signatures are strings of parameters and results only; the caller puts the
//! method name, `func` keyword or field name in front.

use ir::MethodRef;
use semantics::RpcShape;

use crate::go::imports::{CONTEXT_PACKAGE, GRPC_PACKAGE};
use crate::go::GoImports;
use crate::naming::MethodNames;
use crate::utils::param_list;

/// Client call signature, e.g. `(ctx context.Context, in *Req, opts ...grpc.CallOption) (*Resp, error)`
pub fn client_signature(method: MethodRef<'_>, imports: &mut GoImports) -> String {
    let shape = RpcShape::of(method.method);
    let mut params = vec![format!("ctx {}", imports.ident(CONTEXT_PACKAGE, "Context"))];
    if !shape.client_streams() {
        params.push(format!("in *{}", imports.qualify(&method.method.input)));
    }
    params.push(format!("opts ...{}", imports.ident(GRPC_PACKAGE, "CallOption")));

    let result = if shape.is_streaming() {
        MethodNames::new(method).client_stream
    } else {
        format!("*{}", imports.qualify(&method.method.output))
    };
    format!("{} ({}, error)", param_list(&params), result)
}

/// Handler signature without names, e.g. `(context.Context, *Req) (*Resp, error)`.
///
/// Shared by the service struct fields, the unstable interface and the
/// constructor's capability checks.
pub fn handler_signature(method: MethodRef<'_>, imports: &mut GoImports) -> String {
    let shape = RpcShape::of(method.method);
    let mut params = Vec::with_capacity(2);
    if !shape.is_streaming() {
        params.push(imports.ident(CONTEXT_PACKAGE, "Context"));
    }
    if !shape.client_streams() {
        params.push(format!("*{}", imports.qualify(&method.method.input)));
    }
    if shape.is_streaming() {
        params.push(MethodNames::new(method).server_stream);
    }

    let result = if shape.is_streaming() {
        "error".to_string()
    } else {
        format!("(*{}, error)", imports.qualify(&method.method.output))
    };
    format!("{} {}", param_list(&params), result)
}

/// Function type of a service struct field, e.g. `func(context.Context, *Req) (*Resp, error)`
pub fn handler_field_type(method: MethodRef<'_>, imports: &mut GoImports) -> String {
    format!("func{}", handler_signature(method, imports))
}

/// Signature of a unary adapter, matching `grpc.MethodDesc.Handler` minus the receiver
pub fn unary_adapter_signature(imports: &mut GoImports) -> String {
    format!(
        "(_ interface{{}}, ctx {}, dec func(interface{{}}) error, interceptor {}) (interface{{}}, error)",
        imports.ident(CONTEXT_PACKAGE, "Context"),
        imports.ident(GRPC_PACKAGE, "UnaryServerInterceptor"),
    )
}

/// Signature of a stream adapter, matching `grpc.StreamDesc.Handler` minus the receiver
pub fn stream_adapter_signature(imports: &mut GoImports) -> String {
    format!("(_ interface{{}}, stream {}) error", imports.ident(GRPC_PACKAGE, "ServerStream"))
}
