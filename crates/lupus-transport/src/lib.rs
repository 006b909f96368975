//! Transport abstraction layer for Lupus.
//!
//! Provides the [`Transport`] and [`Connection`] traits plus two
//! implementations of the message channel:
//!
//! - [`TcpTransport`] / [`TcpConnection`]: length-framed text over TCP
//! - [`memory::pair`]: an in-process connected pair, for tests and bots
//!
//! Both are the same [`FramedConnection`] over different byte streams.

mod error;
mod framed;
pub mod memory;
mod tcp;

pub use error::TransportError;
pub use framed::FramedConnection;
pub use tcp::{TcpConnection, TcpTransport};

use std::fmt;
use std::future::Future;
use std::net::SocketAddr;

/// Opaque identifier for a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Creates a new `ConnectionId` from a raw `u64`.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying `u64` value.
    pub fn into_inner(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Accepts new incoming connections.
pub trait Transport: Send + 'static {
    /// The connection type produced by this transport.
    type Connection: Connection;

    /// Waits for and accepts the next incoming connection.
    fn accept(
        &mut self,
    ) -> impl Future<Output = Result<Self::Connection, TransportError>> + Send;

    /// The address this transport is listening on.
    fn local_addr(&self) -> Result<SocketAddr, TransportError>;
}

/// A single connection that sends and receives whole text messages.
///
/// The futures are `Send` so the game can move a receive loop onto its own
/// Tokio task.
pub trait Connection: Send + Sync + 'static {
    /// Sends one message to the remote peer.
    fn send(
        &self,
        message: &str,
    ) -> impl Future<Output = Result<(), TransportError>> + Send;

    /// Receives the next complete message from the remote peer.
    ///
    /// Returns `Ok(None)` when the connection is cleanly closed between
    /// messages. Implementations must be cancel-safe: dropping the future
    /// before it resolves must not lose or split a message.
    fn recv(
        &self,
    ) -> impl Future<Output = Result<Option<String>, TransportError>> + Send;

    /// Closes the sending half of the connection.
    fn close(&self) -> impl Future<Output = Result<(), TransportError>> + Send;

    /// Returns the unique identifier for this connection.
    fn id(&self) -> ConnectionId;
}
