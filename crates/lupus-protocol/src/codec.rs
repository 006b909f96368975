//! Length-delimited framing for text messages.
//!
//! Every message on the wire is a 4-byte big-endian payload length followed
//! by exactly that many bytes of UTF-8 text:
//!
//! ```text
//! ┌──────────────┬──────────────────────────────┐
//! │ len: u32 BE  │ payload: len bytes of UTF-8  │
//! └──────────────┴──────────────────────────────┘
//! ```
//!
//! Because the header self-describes the frame, a receiver can read exactly
//! one logical message without over- or under-reading, and a payload may
//! contain anything, newlines included.
//!
//! The codec works on in-memory buffers only. Reading from a socket and
//! accumulating bytes is the transport's job; this module just says
//! "here is one complete frame" or "not yet".

use crate::ProtocolError;

/// Maximum payload length in bytes (the header is not counted).
pub const MAX_MESSAGE_LENGTH: usize = 2048;

/// Size of the length header in bytes.
pub const HEADER_LENGTH: usize = 4;

/// Encoder/decoder for length-prefixed text frames.
///
/// Stateless; transports hold one as a field.
///
/// ## Example
///
/// ```rust
/// use lupus_protocol::FrameCodec;
///
/// let codec = FrameCodec;
/// let mut buffer = codec.encode("Player 3").unwrap();
///
/// assert_eq!(codec.decode(&mut buffer).unwrap().as_deref(), Some("Player 3"));
/// assert!(buffer.is_empty());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameCodec;

impl FrameCodec {
    /// Encodes `message` as one frame.
    ///
    /// # Errors
    /// Returns [`ProtocolError::MessageTooLarge`] if the payload exceeds
    /// [`MAX_MESSAGE_LENGTH`].
    pub fn encode(&self, message: &str) -> Result<Vec<u8>, ProtocolError> {
        let payload = message.as_bytes();
        if payload.len() > MAX_MESSAGE_LENGTH {
            return Err(ProtocolError::MessageTooLarge {
                len: payload.len(),
                max: MAX_MESSAGE_LENGTH,
            });
        }

        let mut frame = Vec::with_capacity(HEADER_LENGTH + payload.len());
        // Fits: checked against MAX_MESSAGE_LENGTH above.
        frame.extend_from_slice(&(payload.len() as u32).to_be_bytes());
        frame.extend_from_slice(payload);
        Ok(frame)
    }

    /// Takes one complete frame off the front of `buffer`.
    ///
    /// Returns `Ok(None)` if the buffer doesn't hold a whole frame yet; the
    /// buffer is left untouched so the caller can read more bytes and try
    /// again. On success the frame's bytes are removed from the buffer.
    ///
    /// # Errors
    /// - [`ProtocolError::MessageTooLarge`]: the header announces more than
    ///   [`MAX_MESSAGE_LENGTH`]. Nothing is consumed.
    /// - [`ProtocolError::InvalidUtf8`]: the frame is consumed (so the
    ///   stream stays aligned) but its payload isn't text.
    pub fn decode(
        &self,
        buffer: &mut Vec<u8>,
    ) -> Result<Option<String>, ProtocolError> {
        let Some(header) = buffer.get(..HEADER_LENGTH) else {
            return Ok(None);
        };

        let mut len_bytes = [0u8; HEADER_LENGTH];
        len_bytes.copy_from_slice(header);
        let len = u32::from_be_bytes(len_bytes) as usize;
        if len > MAX_MESSAGE_LENGTH {
            return Err(ProtocolError::MessageTooLarge {
                len,
                max: MAX_MESSAGE_LENGTH,
            });
        }

        let frame_len = HEADER_LENGTH + len;
        if buffer.len() < frame_len {
            return Ok(None);
        }

        let payload: Vec<u8> = buffer.drain(..frame_len).skip(HEADER_LENGTH).collect();
        Ok(Some(String::from_utf8(payload)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_prefixes_big_endian_length() {
        let frame = FrameCodec.encode("hi").unwrap();
        assert_eq!(frame, vec![0, 0, 0, 2, b'h', b'i']);
    }

    #[test]
    fn test_decode_keeps_newlines_inside_payload() {
        let mut buffer = FrameCodec.encode("line one\nline two\n").unwrap();
        let decoded = FrameCodec.decode(&mut buffer).unwrap();
        assert_eq!(decoded.as_deref(), Some("line one\nline two\n"));
    }

    #[test]
    fn test_decode_empty_payload() {
        let mut buffer = FrameCodec.encode("").unwrap();
        assert_eq!(FrameCodec.decode(&mut buffer).unwrap().as_deref(), Some(""));
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_decode_waits_for_partial_header() {
        let mut buffer = vec![0, 0];
        assert!(FrameCodec.decode(&mut buffer).unwrap().is_none());
        assert_eq!(buffer, vec![0, 0], "partial header must not be consumed");
    }

    #[test]
    fn test_decode_waits_for_partial_payload() {
        let full = FrameCodec.encode("Player 5").unwrap();
        let mut buffer = full[..full.len() - 1].to_vec();

        assert!(FrameCodec.decode(&mut buffer).unwrap().is_none());
        assert_eq!(buffer.len(), full.len() - 1);

        buffer.push(*full.last().unwrap());
        assert_eq!(
            FrameCodec.decode(&mut buffer).unwrap().as_deref(),
            Some("Player 5")
        );
    }

    #[test]
    fn test_decode_leaves_following_frame_in_buffer() {
        let mut buffer = FrameCodec.encode("first").unwrap();
        buffer.extend(FrameCodec.encode("second").unwrap());

        assert_eq!(FrameCodec.decode(&mut buffer).unwrap().as_deref(), Some("first"));
        assert_eq!(FrameCodec.decode(&mut buffer).unwrap().as_deref(), Some("second"));
        assert!(FrameCodec.decode(&mut buffer).unwrap().is_none());
    }

    #[test]
    fn test_encode_accepts_exactly_max_length() {
        let message = "a".repeat(MAX_MESSAGE_LENGTH);
        let frame = FrameCodec.encode(&message).unwrap();
        assert_eq!(frame.len(), HEADER_LENGTH + MAX_MESSAGE_LENGTH);
    }

    #[test]
    fn test_encode_rejects_oversized_payload() {
        let message = "a".repeat(MAX_MESSAGE_LENGTH + 1);
        let err = FrameCodec.encode(&message).unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::MessageTooLarge { len, max }
                if len == MAX_MESSAGE_LENGTH + 1 && max == MAX_MESSAGE_LENGTH
        ));
    }

    #[test]
    fn test_decode_rejects_oversized_header() {
        let mut buffer = ((MAX_MESSAGE_LENGTH + 1) as u32).to_be_bytes().to_vec();
        let err = FrameCodec.decode(&mut buffer).unwrap_err();
        assert!(matches!(err, ProtocolError::MessageTooLarge { .. }));
    }

    #[test]
    fn test_decode_consumes_non_utf8_frame() {
        let mut buffer = vec![0, 0, 0, 2, 0xff, 0xfe];
        buffer.extend(FrameCodec.encode("next").unwrap());

        let err = FrameCodec.decode(&mut buffer).unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidUtf8(_)));
        assert_eq!(FrameCodec.decode(&mut buffer).unwrap().as_deref(), Some("next"));
    }
}
