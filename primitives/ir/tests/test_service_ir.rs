//! Unit tests for the grpcgen IR module

use grpcgen_ir::fixtures::{greeter_file, method, route_guide_file, service};
use grpcgen_ir::*;
use tempfile::TempDir;

#[test]
fn test_service_ir_new() {
    let ir = ServiceIR::new(vec![greeter_file(), route_guide_file()]);

    assert_eq!(ir.version(), "0.1.0");
    assert_eq!(ir.files().len(), 2);
    assert_eq!(ir.service_count(), 2);
}

#[test]
fn test_service_ir_get_file() {
    let ir = ServiceIR::new(vec![greeter_file(), route_guide_file()]);

    let greeter = ir.get_file("helloworld.proto").expect("helloworld.proto should exist");
    assert_eq!(greeter.services[0].full_name, "helloworld.Greeter");
    assert!(ir.get_file("missing.proto").is_none());
}

#[test]
fn test_method_refs_preserve_declaration_order() {
    let file = route_guide_file();
    let svc = &file.services[0];

    let names: Vec<&str> = svc.method_refs().map(|m| m.method.name.as_str()).collect();
    assert_eq!(names, ["GetFeature", "ListFeatures", "RecordRoute", "RouteChat"]);
    assert!(svc.method_refs().all(|m| std::ptr::eq(m.parent, svc)));
}

#[test]
fn test_fixture_locations() {
    let file = route_guide_file();
    let svc = &file.services[0];

    assert_eq!(svc.location, Location::new("route_guide.proto", vec![6, 0]));
    assert_eq!(svc.methods[3].location.path, vec![6, 0, 2, 3]);
    assert_eq!(file.generated_filename_prefix, "example.com/helloworld/route_guide");
}

#[test]
fn test_service_without_package_uses_bare_full_name() {
    let svc = service("Echo", "", vec![method("Echo", "Req", "Resp", false, false)]);
    assert_eq!(svc.full_name, "Echo");
}

#[test]
fn test_has_services() {
    let mut file = greeter_file();
    assert!(file.has_services());
    file.services.clear();
    assert!(!file.has_services());
}

#[test]
fn test_file_round_trip() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("nested").join("routes.ir.json");
    let ir = ServiceIR::new(vec![route_guide_file()]);

    ir.to_file(&path).expect("Failed to write IR");
    let contents = std::fs::read_to_string(&path).expect("Failed to read IR file");
    assert!(contents.ends_with('\n'));

    let loaded = ServiceIR::from_file(&path).expect("Failed to load IR");
    assert_eq!(loaded, ir);
}

#[test]
fn test_minimal_json_uses_defaults() {
    let json = r#"{
        "version": "0.1.0",
        "files": [{
            "path": "echo.proto",
            "go_package_name": "echo",
            "go_import_path": "example.com/echo",
            "generated_filename_prefix": "example.com/echo/echo",
            "services": [{
                "name": "Echo",
                "full_name": "Echo",
                "go_name": "Echo",
                "methods": [{
                    "name": "Ping",
                    "go_name": "Ping",
                    "input": { "go_name": "Ping", "import_path": "example.com/echo" },
                    "output": { "go_name": "Pong", "import_path": "example.com/echo" }
                }]
            }]
        }]
    }"#;

    let ir: ServiceIR = serde_json::from_str(json).expect("minimal IR should parse");
    let method = &ir.files()[0].services[0].methods[0];
    assert!(!method.client_streaming);
    assert!(!method.server_streaming);
    assert!(!method.deprecated);
    assert!(method.leading_comments.is_empty());
    assert_eq!(method.input.import_path.as_str(), "example.com/echo");
}
