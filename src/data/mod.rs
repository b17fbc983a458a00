//! Data structures for the game world
//!
//! The mansion map, the collected clues and the clue/suspect associations.

pub mod clues;
pub mod room;
pub mod suspects;

pub use clues::*;
pub use room::*;
pub use suspects::*;

use serde::{Deserialize, Serialize};

/// How a message should stand out in the log
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Discovery,
    Warning,
    Verdict,
}

impl Severity {
    pub fn symbol(&self) -> &'static str {
        match self {
            Severity::Info => "·",
            Severity::Discovery => "🔎",
            Severity::Warning => "⚠",
            Severity::Verdict => "⚖",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "INFO"),
            Severity::Discovery => write!(f, "PISTA"),
            Severity::Warning => write!(f, "AVISO"),
            Severity::Verdict => write!(f, "VEREDITO"),
        }
    }
}
