//! # Lupus
//!
//! An authoritative referee for seven-player games of Werewolf over TCP.
//!
//! The server seats seven connections, deals each a secret role, then
//! drives nights and days until one side wins. Clients are thin: they
//! print whatever arrives and send back whatever the player types.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lupus::prelude::*;
//!
//! # async fn start() -> Result<(), LupusError> {
//! let server = LupusServer::builder()
//!     .bind("0.0.0.0:7777")
//!     .config(GameConfig::default())
//!     .build()
//!     .await?;
//! println!("SERVER PORT: {}", server.local_addr()?.port());
//! let outcome = server.run().await?;
//! # let _ = outcome;
//! # Ok(())
//! # }
//! ```

mod error;
mod server;

pub use error::LupusError;
pub use server::{DEFAULT_BIND, LupusServer, LupusServerBuilder};

pub mod prelude {
    pub use crate::{LupusError, LupusServer, LupusServerBuilder};
    pub use lupus_game::{GameConfig, Outcome};
    pub use lupus_protocol::{PlayerId, Role, Status};
}
