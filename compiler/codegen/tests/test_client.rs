//! Client stub builder tests

use config::GenerationMode;
use grpcgen_codegen::build_file_nodes;
use grpcgen_codegen::go::{Decl, Node, NodeKind};
use ir::fixtures::{method, proto_file, route_guide_file, service};

fn nodes_of(nodes: &[Node], kind: NodeKind) -> Vec<&Node> {
    nodes.iter().filter(|n| n.kind == kind).collect()
}

fn find<'a>(nodes: &'a [Node], kind: NodeKind, name: &str) -> &'a Node {
    nodes
        .iter()
        .find(|n| n.kind == kind && n.name == name)
        .unwrap_or_else(|| panic!("missing {:?} {}", kind, name))
}

#[test]
fn test_client_interface_lists_every_method() {
    let (nodes, _, _) = build_file_nodes(GenerationMode::Full, &route_guide_file());
    let client = find(&nodes, NodeKind::ClientInterface, "RouteGuideClient");
    assert_eq!(client.member_names(), ["GetFeature", "ListFeatures", "RecordRoute", "RouteChat"]);

    let ctor = find(&nodes, NodeKind::ClientConstructor, "NewRouteGuideClient");
    assert_eq!(ctor.body_lines(), ["return &routeGuideClient{cc}"]);
    match &ctor.decl {
        Decl::Func { receiver, signature, .. } => {
            assert!(receiver.is_none());
            assert_eq!(signature, "(cc grpc.ClientConnInterface) RouteGuideClient");
        }
        other => panic!("constructor should be a func, got {:?}", other),
    }
}

#[test]
fn test_unary_call_body() {
    let (nodes, _, _) = build_file_nodes(GenerationMode::Full, &route_guide_file());
    let call = find(&nodes, NodeKind::ClientMethod, "GetFeature");
    assert_eq!(call.body_lines(), [
        "out := new(Feature)",
        "err := c.cc.Invoke(ctx, \"/routeguide.RouteGuide/GetFeature\", in, out, opts...)",
        "if err != nil {",
        "return nil, err",
        "}",
        "return out, nil",
    ]);
    assert!(nodes_of(&nodes, NodeKind::ClientStreamDesc)
        .iter()
        .all(|n| n.method.as_deref() != Some("GetFeature")));
}

#[test]
fn test_server_streaming_call_sends_and_closes() {
    let (nodes, _, _) = build_file_nodes(GenerationMode::Full, &route_guide_file());
    let call = find(&nodes, NodeKind::ClientMethod, "ListFeatures");
    let body = call.body_lines();
    assert_eq!(
        body[0],
        "stream, err := c.cc.NewStream(ctx, routeGuideListFeaturesStreamDesc, \"/routeguide.RouteGuide/ListFeatures\", opts...)"
    );
    assert!(body.contains(&"x := &routeGuideListFeaturesClient{stream}".to_string()));
    assert!(body.contains(&"if err := x.ClientStream.SendMsg(in); err != nil {".to_string()));
    assert!(body.contains(&"if err := x.ClientStream.CloseSend(); err != nil {".to_string()));
    assert_eq!(body.last().map(String::as_str), Some("return x, nil"));

    let desc = find(&nodes, NodeKind::ClientStreamDesc, "routeGuideListFeaturesStreamDesc");
    assert_eq!(desc.body_lines(), ["StreamName: \"ListFeatures\",", "ServerStreams: true,"]);
}

#[test]
fn test_bidi_chat_client() {
    let file = proto_file("chat.proto", "chat", vec![service("Chat", "chat", vec![method(
        "Converse", "Msg", "Msg", true, true,
    )])]);
    let (nodes, _, _) = build_file_nodes(GenerationMode::Full, &file);

    let call = find(&nodes, NodeKind::ClientMethod, "Converse");
    let body = call.body_lines();
    assert!(!body.iter().any(|l| l.contains("SendMsg(in)")), "bidi calls send nothing upfront");
    assert!(!body.iter().any(|l| l.contains("CloseSend")));

    let desc = find(&nodes, NodeKind::ClientStreamDesc, "chatConverseStreamDesc");
    assert_eq!(desc.body_lines(), [
        "StreamName: \"Converse\",",
        "ServerStreams: true,",
        "ClientStreams: true,",
    ]);

    let stream = find(&nodes, NodeKind::ClientStreamInterface, "Chat_ConverseClient");
    assert_eq!(stream.member_names(), ["Send", "Recv"]);
    let methods: Vec<&str> =
        nodes_of(&nodes, NodeKind::ClientStreamMethod).iter().map(|n| n.name.as_str()).collect();
    assert_eq!(methods, ["Send", "Recv"]);
}

#[test]
fn test_client_streaming_upload() {
    let file = proto_file("upload.proto", "files", vec![service("Files", "files", vec![method(
        "Upload", "Chunk", "Summary", true, false,
    )])]);
    let (nodes, _, _) = build_file_nodes(GenerationMode::Full, &file);

    let stream = find(&nodes, NodeKind::ClientStreamInterface, "Files_UploadClient");
    assert_eq!(stream.member_names(), ["Send", "CloseAndRecv"]);

    let close_and_recv = nodes_of(&nodes, NodeKind::ClientStreamMethod)
        .into_iter()
        .find(|n| n.name == "CloseAndRecv")
        .expect("CloseAndRecv is emitted");
    assert_eq!(close_and_recv.body_lines(), [
        "if err := x.ClientStream.CloseSend(); err != nil {",
        "return nil, err",
        "}",
        "m := new(Summary)",
        "if err := x.ClientStream.RecvMsg(m); err != nil {",
        "return nil, err",
        "}",
        "return m, nil",
    ]);
    match &close_and_recv.decl {
        Decl::Func { receiver, signature, .. } => {
            assert_eq!(receiver.as_deref(), Some("x *filesUploadClient"));
            assert_eq!(signature, "() (*Summary, error)");
        }
        other => panic!("expected func, got {:?}", other),
    }

    let server_stream = find(&nodes, NodeKind::ServerStreamInterface, "Files_UploadServer");
    assert_eq!(server_stream.member_names(), ["SendAndClose", "Recv"]);
}

#[test]
fn test_stream_wrappers_embed_runtime_stream() {
    let (nodes, _, _) = build_file_nodes(GenerationMode::Full, &route_guide_file());
    for node in nodes_of(&nodes, NodeKind::ClientStreamInterface) {
        let last = node.members().last().expect("stream interface has members");
        assert_eq!(last, &grpcgen_codegen::go::Member::Embedded("grpc.ClientStream".into()));
    }
    assert_eq!(nodes_of(&nodes, NodeKind::ClientStreamInterface).len(), 3);
    assert_eq!(nodes_of(&nodes, NodeKind::ClientStreamStruct).len(), 3);
}
