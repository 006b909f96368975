//! The Werewolf engine for Lupus.
//!
//! A single [`Game`] owns everything that changes during play: the roster,
//! the communication scope and the witch's potions. It runs on one control
//! task and drives the phases in order:
//!
//! ```text
//! ┌──────────┐   ┌───────┐   ┌──────────┐   ┌─────┐
//! │ win check│ → │ night │ → │ win check│ → │ day │ ─┐
//! └──────────┘   └───────┘   └──────────┘   └─────┘  │
//!      ↑                                             │
//!      └─────────────────────────────────────────────┘
//! ```
//!
//! # Key types
//!
//! - [`Game`]: the engine; [`Game::run`] plays until someone wins
//! - [`Window`]: a set of listener tasks relaying chatter for a while
//! - [`NightReport`] / [`DayReport`]: what each phase resolved to
//! - [`Outcome`]: the win-condition verdict
//! - [`GameConfig`]: discussion lengths and drain timing

mod broadcast;
mod config;
mod day;
mod error;
mod game;
mod listener;
mod night;
mod outcome;

pub use config::GameConfig;
pub use day::{DayReport, Verdict};
pub use error::GameError;
pub use game::Game;
pub use listener::{Chatter, Window};
pub use night::{NightReport, WitchPotions};
pub use outcome::Outcome;
