//! Server dispatch builder tests

use config::GenerationMode;
use grpcgen_codegen::go::{Decl, Member, Node, NodeKind};
use grpcgen_codegen::{build_file_nodes, generate_go_file};
use ir::fixtures::{method, proto_file, route_guide_file, service};

fn find<'a>(nodes: &'a [Node], kind: NodeKind, name: &str) -> &'a Node {
    nodes
        .iter()
        .find(|n| n.kind == kind && n.name == name)
        .unwrap_or_else(|| panic!("missing {:?} {}", kind, name))
}

#[test]
fn test_service_struct_fields_follow_shapes() {
    let (nodes, _, _) = build_file_nodes(GenerationMode::Full, &route_guide_file());
    let svc = find(&nodes, NodeKind::ServiceStruct, "RouteGuideService");

    let fields: Vec<(&str, &str)> = svc
        .members()
        .iter()
        .filter_map(|m| match m {
            Member::Field { name, ty, .. } => Some((name.as_str(), ty.as_str())),
            _ => None,
        })
        .collect();
    assert_eq!(fields, [
        ("GetFeature", "func(context.Context, *Point) (*Feature, error)"),
        ("ListFeatures", "func(*Rectangle, RouteGuide_ListFeaturesServer) error"),
        ("RecordRoute", "func(RouteGuide_RecordRouteServer) error"),
        ("RouteChat", "func(RouteGuide_RouteChatServer) error"),
    ]);
}

#[test]
fn test_every_adapter_checks_for_a_missing_handler_first() {
    for mode in [GenerationMode::Full, GenerationMode::MigrationLite] {
        let (nodes, _, _) = build_file_nodes(mode, &route_guide_file());
        let adapters: Vec<&Node> =
            nodes.iter().filter(|n| n.kind == NodeKind::ServerAdapter).collect();
        assert_eq!(adapters.len(), 4);

        for adapter in adapters {
            let method = adapter.method.as_deref().expect("adapter belongs to a method");
            let body = adapter.body_lines();
            assert_eq!(body[0], format!("if s.{} == nil {{", method));
            let expected_error = format!(
                "status.Errorf(codes.Unimplemented, \"method {} not implemented\")",
                method
            );
            if method == "GetFeature" {
                assert_eq!(body[1], format!("return nil, {}", expected_error));
            } else {
                assert_eq!(body[1], format!("return {}", expected_error));
            }
        }
    }
}

#[test]
fn test_unary_adapter_uses_interceptor() {
    let (nodes, _, _) = build_file_nodes(GenerationMode::Full, &route_guide_file());
    let adapter = find(&nodes, NodeKind::ServerAdapter, "getFeature");
    match &adapter.decl {
        Decl::Func { receiver, signature, .. } => {
            assert_eq!(receiver.as_deref(), Some("s *RouteGuideService"));
            assert!(signature.starts_with("(_ interface{}, ctx context.Context, dec func(interface{}) error"));
        }
        other => panic!("expected func, got {:?}", other),
    }
    assert_eq!(adapter.body_lines()[3..], [
        "in := new(Point)",
        "if err := dec(in); err != nil {",
        "return nil, err",
        "}",
        "if interceptor == nil {",
        "return s.GetFeature(ctx, in)",
        "}",
        "info := &grpc.UnaryServerInfo{",
        "Server: s,",
        "FullMethod: \"/routeguide.RouteGuide/GetFeature\",",
        "}",
        "handler := func(ctx context.Context, req interface{}) (interface{}, error) {",
        "return s.GetFeature(ctx, req.(*Point))",
        "}",
        "return interceptor(ctx, in, info, handler)",
    ]);
}

#[test]
fn test_snake_case_method_keeps_proto_name_on_the_wire() {
    let mut say_hello = method("say_hello", "HelloRequest", "HelloReply", false, false);
    say_hello.go_name = "SayHello".to_string();
    let file = proto_file("greet.proto", "greet", vec![service("Greeter", "greet", vec![say_hello])]);

    let (nodes, _, _) = build_file_nodes(GenerationMode::Full, &file);
    let adapter = find(&nodes, NodeKind::ServerAdapter, "sayHello");
    assert!(adapter.body_lines().contains(&"FullMethod: \"/greet.Greeter/say_hello\",".to_string()));

    let text = generate_go_file(GenerationMode::Full, &file)
        .expect("generation should succeed")
        .expect("file declares services")
        .content;
    assert!(text.contains("c.cc.Invoke(ctx, \"/greet.Greeter/say_hello\", in, out, opts...)"));
    assert!(text.contains("FullMethod: \"/greet.Greeter/say_hello\","));
    assert!(text.contains("MethodName: \"say_hello\","));
    assert!(text.contains("SayHello func(context.Context, *HelloRequest) (*HelloReply, error)"));
    assert!(!text.contains("/greet.Greeter/SayHello"));
}

#[test]
fn test_streaming_adapters() {
    let (nodes, _, _) = build_file_nodes(GenerationMode::Full, &route_guide_file());

    let list = find(&nodes, NodeKind::ServerAdapter, "listFeatures");
    assert_eq!(list.body_lines()[3..], [
        "m := new(Rectangle)",
        "if err := stream.RecvMsg(m); err != nil {",
        "return err",
        "}",
        "return s.ListFeatures(m, &routeGuideListFeaturesServer{stream})",
    ]);

    let record = find(&nodes, NodeKind::ServerAdapter, "recordRoute");
    assert_eq!(record.body_lines()[3..], ["return s.RecordRoute(&routeGuideRecordRouteServer{stream})"]);

    let chat = find(&nodes, NodeKind::ServerAdapter, "routeChat");
    assert_eq!(chat.body_lines()[3..], ["return s.RouteChat(&routeGuideRouteChatServer{stream})"]);
    match &chat.decl {
        Decl::Func { signature, .. } => {
            assert_eq!(signature, "(_ interface{}, stream grpc.ServerStream) error")
        }
        other => panic!("expected func, got {:?}", other),
    }
}

#[test]
fn test_server_stream_types() {
    let (nodes, _, _) = build_file_nodes(GenerationMode::Full, &route_guide_file());

    let list = find(&nodes, NodeKind::ServerStreamInterface, "RouteGuide_ListFeaturesServer");
    assert_eq!(list.member_names(), ["Send"]);
    let record = find(&nodes, NodeKind::ServerStreamInterface, "RouteGuide_RecordRouteServer");
    assert_eq!(record.member_names(), ["SendAndClose", "Recv"]);
    let chat = find(&nodes, NodeKind::ServerStreamInterface, "RouteGuide_RouteChatServer");
    assert_eq!(chat.member_names(), ["Send", "Recv"]);
    assert_eq!(chat.members().last(), Some(&Member::Embedded("grpc.ServerStream".into())));

    let recv: Vec<&Node> = nodes
        .iter()
        .filter(|n| n.kind == NodeKind::ServerStreamMethod && n.name == "Recv")
        .collect();
    assert_eq!(recv.len(), 2);
    assert_eq!(recv[0].body_lines(), [
        "m := new(Point)",
        "if err := x.ServerStream.RecvMsg(m); err != nil {",
        "return nil, err",
        "}",
        "return m, nil",
    ]);

    let send_and_close = nodes
        .iter()
        .find(|n| n.kind == NodeKind::ServerStreamMethod && n.name == "SendAndClose")
        .expect("SendAndClose is emitted");
    assert_eq!(send_and_close.body_lines(), ["return x.ServerStream.SendMsg(m)"]);
}

#[test]
fn test_dispatch_order_is_struct_adapters_then_stream_types() {
    let (nodes, _, _) = build_file_nodes(GenerationMode::Full, &route_guide_file());
    let server_kinds: Vec<NodeKind> = nodes
        .iter()
        .map(|n| n.kind)
        .filter(|k| {
            matches!(
                k,
                NodeKind::ServiceStruct | NodeKind::ServerAdapter | NodeKind::ServerStreamInterface
            )
        })
        .collect();
    assert_eq!(server_kinds, [
        NodeKind::ServiceStruct,
        NodeKind::ServerAdapter,
        NodeKind::ServerAdapter,
        NodeKind::ServerAdapter,
        NodeKind::ServerAdapter,
        NodeKind::ServerStreamInterface,
        NodeKind::ServerStreamInterface,
        NodeKind::ServerStreamInterface,
    ]);
}
