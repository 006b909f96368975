//! Error types for the protocol layer.
//!
//! Each crate in Lupus defines its own error enum. When you see a
//! `ProtocolError`, you know the problem is in framing (a length header
//! or payload broke the rules), not in networking or game logic.

/// Errors that can occur while encoding or decoding a frame.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// The payload is longer than the protocol allows.
    ///
    /// Raised on encode (nothing is written) and on decode when a length
    /// header announces more than the limit. In the decode case the stream
    /// can no longer be trusted, since we'd have to guess where the next
    /// frame starts.
    #[error("message too large: {len} bytes (max {max})")]
    MessageTooLarge { len: usize, max: usize },

    /// The payload was delimited correctly but isn't UTF-8 text.
    #[error("message is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}
