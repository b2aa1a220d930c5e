//! # Keepsake Rules
//!
//! The "rule book" crate - content model, progress flags, unlock policy and the
//! small shared mechanics (shuffling, session clock, deferred timeline).
//! This crate is the single source of truth for what the page contains and what
//! is unlocked; it does not drive any of the mini-games itself.

pub mod content;
pub mod mechanics;
pub mod progress;
pub mod visibility;

pub use content::*;
pub use mechanics::*;
pub use progress::*;
pub use visibility::*;
