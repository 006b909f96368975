//! `LupusServer` builder and the seating loop.
//!
//! This is the entry point for running a game. It ties the layers
//! together: transport → session (seating and roles) → game.

use std::net::SocketAddr;
use std::sync::Arc;

use lupus_game::{Game, GameConfig, Outcome};
use lupus_protocol::{Status, text};
use lupus_session::{Deck, Roster, SessionError};
use lupus_transport::{Connection, TcpTransport, Transport};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::LupusError;

/// Any interface, OS-assigned port.
pub const DEFAULT_BIND: &str = "0.0.0.0:0";

/// Builder for configuring and starting a Lupus server.
///
/// # Example
///
/// ```rust,ignore
/// let server = LupusServer::builder()
///     .bind("127.0.0.1:0")
///     .seed(42)
///     .build()
///     .await?;
/// server.run().await
/// ```
pub struct LupusServerBuilder {
    bind_addr: String,
    config: GameConfig,
    seed: Option<u64>,
}

impl LupusServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            bind_addr: DEFAULT_BIND.to_string(),
            config: GameConfig::default(),
            seed: None,
        }
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Sets discussion lengths and drain timing.
    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Deals roles from a deck shuffled with this seed instead of OS
    /// randomness.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Binds the listening socket.
    pub async fn build(self) -> Result<LupusServer, LupusError> {
        let transport = TcpTransport::bind(&self.bind_addr).await?;
        Ok(LupusServer {
            transport,
            config: self.config,
            seed: self.seed,
        })
    }
}

impl Default for LupusServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A bound Lupus server.
///
/// Call [`run()`](Self::run) to seat players and play one game.
pub struct LupusServer {
    transport: TcpTransport,
    config: GameConfig,
    seed: Option<u64>,
}

impl LupusServer {
    /// Creates a new builder.
    pub fn builder() -> LupusServerBuilder {
        LupusServerBuilder::new()
    }

    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr, LupusError> {
        Ok(self.transport.local_addr()?)
    }

    /// Seats seven players, plays one game, then closes every connection.
    ///
    /// The listening socket is closed as soon as the table is full, so
    /// late arrivals are refused by the OS.
    pub async fn run(self) -> Result<Outcome, LupusError> {
        let Self {
            transport,
            config,
            seed,
        } = self;

        let roster = seat_players(transport, deal(seed)).await?;
        let mut game = Game::new(roster, config);
        let outcome = game.run().await;
        game.shutdown().await;

        let outcome = outcome?;
        tracing::info!(%outcome, "game finished");
        Ok(outcome)
    }
}

fn deal(seed: Option<u64>) -> Deck {
    match seed {
        Some(seed) => Deck::shuffled(&mut StdRng::seed_from_u64(seed)),
        None => Deck::shuffled(&mut rand::rng()),
    }
}

/// Accepts connections until the roster is full, welcoming each with its
/// name and role. The transport is dropped on return.
///
/// # Errors
/// A failed accept ends seating with [`LupusError::Transport`]; the
/// listening socket is no longer trusted to produce players.
async fn seat_players<T: Transport>(
    mut transport: T,
    mut deck: Deck,
) -> Result<Roster<T::Connection>, LupusError> {
    tracing::info!(addr = ?transport.local_addr().ok(), "waiting for players");
    let mut roster = Roster::new();

    while !roster.is_full() {
        let connection = match transport.accept().await {
            Ok(connection) => Arc::new(connection),
            Err(e) => {
                tracing::error!(error = %e, seated = roster.len(), "accept failed");
                return Err(e.into());
            }
        };

        let role = deck
            .deal()
            .ok_or(SessionError::RosterFull(roster.len()))?;
        let id = roster.seat(Arc::clone(&connection), role)?;
        let Some(name) = roster.get(id).map(|p| p.name()) else {
            return Err(SessionError::NotFound(id).into());
        };
        tracing::info!(player = %id, conn = %connection.id(), name, %role, "player seated");

        if let Err(e) = connection.send(&text::welcome(name, role)).await {
            tracing::warn!(player = %id, error = %e, "welcome not delivered");
            roster.mark_status(id, Status::Disconnected)?;
        }
    }

    tracing::info!(players = roster.len(), "table full");
    Ok(roster)
}
