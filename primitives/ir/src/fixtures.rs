//! Ready-made IR trees for tests in this and downstream crates.

use crate::{GoIdent, GoImportPath, Location, MethodDef, ProtoFile, ServiceDef};

/// Import path used by every fixture file
pub const FIXTURE_IMPORT_PATH: &str = "example.com/helloworld";

/// Build a method whose types live in the fixture package
pub fn method(
    name: &str,
    input: &str,
    output: &str,
    client_streaming: bool,
    server_streaming: bool,
) -> MethodDef {
    let local = GoImportPath::new(FIXTURE_IMPORT_PATH);
    MethodDef {
        name: name.to_string(),
        go_name: name.to_string(),
        input: local.ident(input),
        output: local.ident(output),
        client_streaming,
        server_streaming,
        deprecated: false,
        leading_comments: String::new(),
        location: Location::default(),
    }
}

/// Build a method whose types are declared in another Go package
pub fn foreign_method(name: &str, input: GoIdent, output: GoIdent) -> MethodDef {
    MethodDef { input, output, ..method(name, "", "", false, false) }
}

/// Build a service in `package` owning `methods`
pub fn service(name: &str, package: &str, methods: Vec<MethodDef>) -> ServiceDef {
    let full_name =
        if package.is_empty() { name.to_string() } else { format!("{}.{}", package, name) };
    ServiceDef {
        name: name.to_string(),
        full_name,
        go_name: name.to_string(),
        methods,
        deprecated: false,
        location: Location::default(),
    }
}

/// Build a file holding `services`, filling in descriptor locations
pub fn proto_file(path: &str, package: &str, mut services: Vec<ServiceDef>) -> ProtoFile {
    for (s, service) in services.iter_mut().enumerate() {
        service.location = Location::new(path, vec![6, s as i32]);
        for (m, method) in service.methods.iter_mut().enumerate() {
            method.location = Location::new(path, vec![6, s as i32, 2, m as i32]);
        }
    }
    let stem = path.strip_suffix(".proto").unwrap_or(path);
    let base = stem.rsplit('/').next().unwrap_or(stem);
    ProtoFile {
        path: path.to_string(),
        proto_package: package.to_string(),
        go_package_name: "helloworld".to_string(),
        go_import_path: GoImportPath::new(FIXTURE_IMPORT_PATH),
        generated_filename_prefix: format!("{}/{}", FIXTURE_IMPORT_PATH, base),
        services,
    }
}

/// `helloworld.Greeter` with a single unary `SayHello` method
pub fn greeter_file() -> ProtoFile {
    let mut say_hello = method("SayHello", "HelloRequest", "HelloReply", false, false);
    say_hello.leading_comments = " Sends a greeting\n".to_string();
    proto_file("helloworld.proto", "helloworld", vec![service("Greeter", "helloworld", vec![
        say_hello,
    ])])
}

/// `routeguide.RouteGuide` with one method of every shape, in the order
/// unary, server-streaming, client-streaming, bidi-streaming
pub fn route_guide_file() -> ProtoFile {
    proto_file("route_guide.proto", "routeguide", vec![service("RouteGuide", "routeguide", vec![
        method("GetFeature", "Point", "Feature", false, false),
        method("ListFeatures", "Rectangle", "Feature", false, true),
        method("RecordRoute", "Point", "RouteSummary", true, false),
        method("RouteChat", "RouteNote", "RouteNote", true, true),
    ])])
}
