//! delve-core: character rules engine for a turn-based dungeon crawler.
//!
//! This crate contains the character simulation logic with no I/O
//! dependencies: attribute generation, class eligibility, the derived
//! ability formulas, spell-point progression and learning, experience
//! tables, and the level/aging/death/rebirth lifecycle. It is designed
//! to be pure and testable; rendering, persistence formats and dungeon
//! navigation live elsewhere and consume the [`player::Character`]
//! record this crate maintains.

pub mod creation;
pub mod data;
pub mod error;
pub mod player;
pub mod progression;

mod consts;
mod rng;
mod ruleset;

pub use consts::*;
pub use error::RulesError;
pub use rng::{GameRng, RollSource, ScriptedRolls};
pub use ruleset::Ruleset;
