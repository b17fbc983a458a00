//! Detective Quest
//!
//! A text adventure in a fixed mansion: walk the rooms, pick up the clues
//! left behind and, in the final chapter, accuse the suspect the evidence
//! points to.
//!
//! # Game Mechanics
//!
//! - **Exploration**: The mansion is a binary tree; from each room you turn
//!   left, turn right or leave
//! - **Clues**: Every clue found is kept in alphabetical order, with repeats
//!   counted
//! - **Judgment**: Each clue incriminates one suspect; two or more clue
//!   sightings against the accused sustain the accusation
//!
//! # Architecture
//!
//! - `data` - The mansion map, the clue store and the suspect index
//! - `game` - Investigation state machine, chapters and verdicts
//! - `tui` - Terminal user interface with ratatui
//! - `observability` - Logging setup

pub mod data;
pub mod game;
pub mod observability;
pub mod tui;

pub use data::*;
pub use game::Investigation;

/// Game version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type for the binary
pub type Result<T> = anyhow::Result<T>;

/// Custom error types
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("investigation already started")]
    AlreadyStarted,

    #[error("investigation has not started yet")]
    NotStarted,

    #[error("investigation is over")]
    InvestigationClosed,

    #[error("player is still exploring the mansion")]
    StillExploring,

    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    #[error("logging setup failed: {0}")]
    Logging(String),
}
