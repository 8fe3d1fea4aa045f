//! RPC shape classification
//!
//! Every method falls into exactly one of four shapes, decided by its two
//! streaming flags. Everything downstream keys off the shape, never the raw flags.

use ir::MethodDef;

/// The streaming shape of a method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RpcShape {
    /// One request, one response
    Unary,
    /// One request, a stream of responses
    ServerStreaming,
    /// A stream of requests, one response
    ClientStreaming,
    /// Streams in both directions
    BidiStreaming,
}

impl RpcShape {
    /// All four shapes, in flag order
    pub const ALL: [RpcShape; 4] =
        [Self::Unary, Self::ServerStreaming, Self::ClientStreaming, Self::BidiStreaming];

    /// Classify a `(client_streaming, server_streaming)` flag pair
    pub fn classify(client_streaming: bool, server_streaming: bool) -> Self {
        match (client_streaming, server_streaming) {
            (false, false) => Self::Unary,
            (false, true) => Self::ServerStreaming,
            (true, false) => Self::ClientStreaming,
            (true, true) => Self::BidiStreaming,
        }
    }

    /// Shape of a method definition
    pub fn of(method: &MethodDef) -> Self {
        Self::classify(method.client_streaming, method.server_streaming)
    }

    /// Whether requests arrive as a stream
    pub fn client_streams(self) -> bool {
        matches!(self, Self::ClientStreaming | Self::BidiStreaming)
    }

    /// Whether responses leave as a stream
    pub fn server_streams(self) -> bool {
        matches!(self, Self::ServerStreaming | Self::BidiStreaming)
    }

    /// Anything but unary
    pub fn is_streaming(self) -> bool { self != Self::Unary }

    /// Lower-case label used in logs
    pub fn label(self) -> &'static str {
        match self {
            Self::Unary => "unary",
            Self::ServerStreaming => "server-streaming",
            Self::ClientStreaming => "client-streaming",
            Self::BidiStreaming => "bidi-streaming",
        }
    }
}

impl std::fmt::Display for RpcShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.label()) }
}
