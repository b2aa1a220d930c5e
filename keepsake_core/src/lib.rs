//! # Keepsake Core
//!
//! The engines behind the anniversary page. This crate drives the access gate,
//! the three mini-games and the quiz, and wires their outcomes into the
//! progress flags owned by `keepsake_rules`.
//!
//! ## Core Components
//!
//! - **gate**: 4-digit PIN boxes and rotary dials in front of all content
//! - **puzzle**: 4x4 tile board whose completion unlocks the bottle and the quiz
//! - **quiz**: two-question form that unlocks everything after the puzzle
//! - **cards**: 8-pair memory match with a single-flight match check
//! - **bottle**: paper collection gated on the puzzle
//! - **journey**: the session orchestrator tying the above to progress
//! - **loader**: content fetch with fallback substitution

pub mod bottle;
pub mod cards;
pub mod gate;
pub mod journey;
pub mod loader;
pub mod puzzle;
pub mod quiz;

pub use bottle::*;
pub use cards::*;
pub use gate::*;
pub use journey::*;
pub use loader::*;
pub use puzzle::*;
pub use quiz::*;
