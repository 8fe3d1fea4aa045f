//! Artifact planning
//!
//! Decides which declarations a method contributes to the generated file,
//! as a pure function of its shape and the generation mode. Builders ask the
//! plan instead of re-deriving the rules from streaming flags.

use std::collections::BTreeSet;

use config::GenerationMode;

use crate::RpcShape;

/// A declaration (or part of one) a method can contribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ArtifactKind {
    /// Method in the `<Svc>Client` interface
    ClientInterfaceMethod,
    /// Method on the unexported client struct
    ClientImplMethod,
    /// `<svc><Method>StreamDesc` variable used to open the stream
    ClientStreamDescriptor,
    /// `<Svc>_<Method>Client` interface and its implementation
    ClientStreamType,
    /// Function-typed field on the `<Svc>Service` struct
    ServerHandlerField,
    /// Unexported adapter from the runtime's generic handler to the field
    ServerAdapter,
    /// `<Svc>_<Method>Server` interface and its implementation
    ServerStreamType,
    /// Method in the `Unstable<Svc>Service` interface
    UnstableInterfaceMethod,
    /// Capability-checked assignment in `New<Svc>Service`
    ConstructorAssignment,
    /// Entry in the registered service descriptor
    RegistrationEntry,
}

impl ArtifactKind {
    /// Artifacts that exist only in full mode
    pub fn requires_full_mode(self) -> bool {
        matches!(
            self,
            Self::ClientInterfaceMethod
                | Self::ClientImplMethod
                | Self::ClientStreamDescriptor
                | Self::ClientStreamType
                | Self::ServerStreamType
        )
    }

    /// Artifacts that exist only for streaming shapes
    pub fn requires_streaming(self) -> bool {
        matches!(self, Self::ClientStreamDescriptor | Self::ClientStreamType | Self::ServerStreamType)
    }
}

/// The artifact set for one method
pub fn plan(shape: RpcShape, mode: GenerationMode) -> BTreeSet<ArtifactKind> {
    use ArtifactKind::*;

    let mut set: BTreeSet<ArtifactKind> = [
        ServerHandlerField,
        ServerAdapter,
        UnstableInterfaceMethod,
        ConstructorAssignment,
        RegistrationEntry,
    ]
    .into_iter()
    .collect();

    if mode.emits_client_and_streams() {
        set.insert(ClientInterfaceMethod);
        set.insert(ClientImplMethod);
        if shape.is_streaming() {
            set.extend([ClientStreamDescriptor, ClientStreamType, ServerStreamType]);
        }
    }
    set
}

/// An operation exposed by a stream wrapper type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamOp {
    /// Send one message
    Send,
    /// Receive one message
    Recv,
    /// Close the send side, then receive the single response
    CloseAndRecv,
    /// Send the single response and finish the call
    SendAndClose,
}

impl StreamOp {
    /// Go method name
    pub fn method_name(self) -> &'static str {
        match self {
            Self::Send => "Send",
            Self::Recv => "Recv",
            Self::CloseAndRecv => "CloseAndRecv",
            Self::SendAndClose => "SendAndClose",
        }
    }
}

/// Operations on the client-side stream wrapper, in declaration order.
///
/// `Send` iff the client streams; exactly one of `Recv` and `CloseAndRecv`.
pub fn client_stream_ops(shape: RpcShape) -> Vec<StreamOp> {
    let mut ops = Vec::with_capacity(2);
    if shape.client_streams() {
        ops.push(StreamOp::Send);
    }
    if shape.server_streams() {
        ops.push(StreamOp::Recv);
    } else {
        ops.push(StreamOp::CloseAndRecv);
    }
    ops
}

/// Operations on the server-side stream wrapper, in declaration order.
///
/// Exactly one of `Send` and `SendAndClose`; `Recv` iff the client streams.
pub fn server_stream_ops(shape: RpcShape) -> Vec<StreamOp> {
    let mut ops = Vec::with_capacity(2);
    if shape.server_streams() {
        ops.push(StreamOp::Send);
    } else {
        ops.push(StreamOp::SendAndClose);
    }
    if shape.client_streams() {
        ops.push(StreamOp::Recv);
    }
    ops
}

/// Which table of the service descriptor a method is registered in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationGroup {
    /// `Methods`: unary handlers
    Methods,
    /// `Streams`: stream handlers with their direction flags
    Streams {
        /// Server sends a stream
        server_streams: bool,
        /// Client sends a stream
        client_streams: bool,
    },
}

/// Registration table for a shape
pub fn registration_group(shape: RpcShape) -> RegistrationGroup {
    if shape.is_streaming() {
        RegistrationGroup::Streams {
            server_streams: shape.server_streams(),
            client_streams: shape.client_streams(),
        }
    } else {
        RegistrationGroup::Methods
    }
}

/// How a server adapter reaches the handler field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterForm {
    /// Decode the request, then call directly or through the interceptor
    Unary,
    /// Receive the single request from the stream, then call with a stream wrapper
    PreReceive,
    /// Call with a stream wrapper only
    StreamOnly,
}

/// Adapter form for a shape
pub fn adapter_form(shape: RpcShape) -> AdapterForm {
    match shape {
        RpcShape::Unary => AdapterForm::Unary,
        RpcShape::ServerStreaming => AdapterForm::PreReceive,
        RpcShape::ClientStreaming | RpcShape::BidiStreaming => AdapterForm::StreamOnly,
    }
}
