//! Migration mode and deprecation tests

use config::GenerationMode;
use grpcgen_codegen::generators::doc_comment::DEPRECATION_COMMENT;
use grpcgen_codegen::go::{Member, NodeKind};
use grpcgen_codegen::{build_file_nodes, generate_go_file};
use ir::fixtures::{greeter_file, method, proto_file, route_guide_file, service};

#[test]
fn test_migration_mode_has_no_client_or_stream_types() {
    let (nodes, _, _) = build_file_nodes(GenerationMode::MigrationLite, &route_guide_file());
    assert!(nodes.iter().all(|n| !n.kind.is_client_or_stream()), "{:?}", nodes
        .iter()
        .map(|n| (n.kind, n.name.as_str()))
        .collect::<Vec<_>>());

    let kinds: Vec<NodeKind> = nodes.iter().map(|n| n.kind).collect();
    assert_eq!(kinds.iter().filter(|k| **k == NodeKind::ServerAdapter).count(), 4);
    assert!(kinds.contains(&NodeKind::UnstableInterface));
    assert!(kinds.contains(&NodeKind::Registration));
    assert!(kinds.contains(&NodeKind::ServiceConstructor));
}

#[test]
fn test_migration_mode_text() {
    let text = generate_go_file(GenerationMode::MigrationLite, &route_guide_file())
        .expect("generation should succeed")
        .expect("file declares services")
        .content;
    assert!(!text.contains("RouteGuideClient"));
    assert!(!text.contains("StreamDesc{\n\tStreamName"));
    assert!(!text.contains("type RouteGuide_RouteChatServer interface"));
    // Adapters still reference the stream implementations generated by the previous version.
    assert!(text.contains("return s.RouteChat(&routeGuideRouteChatServer{stream})"));
    assert!(text.contains("type UnstableRouteGuideService interface {"));
}

#[test]
fn test_full_mode_is_a_superset_of_migration_mode() {
    let file = route_guide_file();
    let (full, _, _) = build_file_nodes(GenerationMode::Full, &file);
    let (lite, _, _) = build_file_nodes(GenerationMode::MigrationLite, &file);
    for node in &lite {
        assert!(full.contains(node), "{:?} {} missing from full mode", node.kind, node.name);
    }
    assert!(full.len() > lite.len());
}

#[test]
fn test_deprecated_method() {
    let mut old = method("OldCall", "Req", "Resp", false, false);
    old.deprecated = true;
    old.leading_comments = " Use NewCall instead.\n".to_string();
    let file = proto_file("legacy.proto", "legacy", vec![service("Legacy", "legacy", vec![
        old,
        method("NewCall", "Req", "Resp", false, false),
    ])]);
    let (nodes, _, _) = build_file_nodes(GenerationMode::Full, &file);

    let client = nodes.iter().find(|n| n.kind == NodeKind::ClientInterface).expect("client");
    match &client.members()[0] {
        Member::Method { doc, signature, .. } => {
            assert_eq!(doc, &[DEPRECATION_COMMENT, "// Use NewCall instead."]);
            assert_eq!(
                signature,
                "(ctx context.Context, in *Req, opts ...grpc.CallOption) (*Resp, error)"
            );
        }
        other => panic!("expected method, got {:?}", other),
    }
    match &client.members()[1] {
        Member::Method { doc, .. } => assert!(doc.is_empty()),
        other => panic!("expected method, got {:?}", other),
    }

    let call = nodes
        .iter()
        .find(|n| n.kind == NodeKind::ClientMethod && n.name == "OldCall")
        .expect("client method");
    assert_eq!(call.doc, [DEPRECATION_COMMENT]);

    let server = nodes.iter().find(|n| n.kind == NodeKind::ServiceStruct).expect("service struct");
    match &server.members()[0] {
        Member::Field { doc, name, ty, .. } => {
            assert_eq!(name, "OldCall");
            assert_eq!(doc, &[DEPRECATION_COMMENT, "// Use NewCall instead."]);
            assert_eq!(ty, "func(context.Context, *Req) (*Resp, error)");
        }
        other => panic!("expected field, got {:?}", other),
    }
    match &server.members()[1] {
        Member::Field { doc, name, .. } => {
            assert_eq!(name, "NewCall");
            assert!(doc.is_empty());
        }
        other => panic!("expected field, got {:?}", other),
    }

    let unstable = nodes.iter().find(|n| n.kind == NodeKind::UnstableInterface).expect("unstable");
    match &unstable.members()[0] {
        Member::Method { doc, .. } => assert_eq!(doc, &[DEPRECATION_COMMENT, "// Use NewCall instead."]),
        other => panic!("expected method, got {:?}", other),
    }
    assert!(!client.doc.contains(&DEPRECATION_COMMENT.to_string()));
    assert!(!server.doc.contains(&DEPRECATION_COMMENT.to_string()));
}

#[test]
fn test_deprecated_service() {
    let mut file = greeter_file();
    file.services[0].deprecated = true;
    let text = generate_go_file(GenerationMode::Full, &file)
        .expect("generation should succeed")
        .expect("file declares services")
        .content;

    assert!(text.contains(&format!("//\n{}\ntype GreeterClient interface {{", DEPRECATION_COMMENT)));
    assert!(text.contains(&format!("{}\nfunc NewGreeterClient(", DEPRECATION_COMMENT)));
    assert!(text.contains(&format!("//\n{}\ntype GreeterService struct {{", DEPRECATION_COMMENT)));
    assert!(text.contains(&format!("//\n{}\ntype UnstableGreeterService interface {{", DEPRECATION_COMMENT)));
    assert!(text.contains(&format!("//\n{}\nfunc RegisterGreeterService(", DEPRECATION_COMMENT)));
    assert!(text.contains("func NewGreeterService(s interface{}) *GreeterService {"));
}
