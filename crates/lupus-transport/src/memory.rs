//! In-process connections.
//!
//! [`pair`] returns two framed connections wired to each other through
//! `tokio::io::duplex`, so one side can play the referee and the other a
//! player without any sockets. Dropping one side makes the other side's
//! `recv` return `Ok(None)` and its `send` fail.

use tokio::io::{DuplexStream, ReadHalf, WriteHalf};

use crate::FramedConnection;

/// One end of an in-memory connection pair.
pub type MemoryConnection = FramedConnection<ReadHalf<DuplexStream>, WriteHalf<DuplexStream>>;

/// Default per-direction buffer, large enough for a full night of prompts
/// to queue up while a player isn't reading.
pub const DEFAULT_CAPACITY: usize = 64 * 1024;

/// Creates a connected pair with the given per-direction buffer size.
pub fn pair_with_capacity(capacity: usize) -> (MemoryConnection, MemoryConnection) {
    let (left, right) = tokio::io::duplex(capacity);
    let (left_read, left_write) = tokio::io::split(left);
    let (right_read, right_write) = tokio::io::split(right);
    (
        FramedConnection::new(left_read, left_write),
        FramedConnection::new(right_read, right_write),
    )
}

/// Creates a connected pair with [`DEFAULT_CAPACITY`].
pub fn pair() -> (MemoryConnection, MemoryConnection) {
    pair_with_capacity(DEFAULT_CAPACITY)
}
