use lupus_protocol::ProtocolError;

/// Errors that can occur in the transport layer.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The connection was closed where a message was still expected.
    #[error("connection closed: {0}")]
    ConnectionClosed(String),

    /// Sending data failed.
    #[error("send failed: {0}")]
    SendFailed(#[source] std::io::Error),

    /// Receiving data failed.
    #[error("receive failed: {0}")]
    ReceiveFailed(#[source] std::io::Error),

    /// The peer sent something that isn't a valid frame.
    #[error("malformed frame: {0}")]
    MalformedFrame(#[source] ProtocolError),

    /// An outgoing message was refused before anything was written.
    #[error("message rejected: {0}")]
    MessageRejected(#[source] ProtocolError),

    /// Binding or accepting connections failed.
    #[error("accept failed: {0}")]
    AcceptFailed(#[source] std::io::Error),
}

impl TransportError {
    /// Returns `true` if the connection can no longer be used.
    ///
    /// Only [`TransportError::MessageRejected`] leaves the connection
    /// intact: the message was refused locally and nothing hit the wire.
    pub fn is_connection_lost(&self) -> bool {
        !matches!(self, TransportError::MessageRejected(_))
    }
}
