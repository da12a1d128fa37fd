//! Errors for the fallible surfaces of the rules engine.
//!
//! Formula code is total over clamped domains and never fails; only the
//! creation flow and class changes can reject caller input.

use thiserror::Error;

use crate::player::character::CreationStage;
use crate::player::class::Class;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("creation step out of order: expected {expected}, found {found}")]
    WrongStage {
        expected: CreationStage,
        found: CreationStage,
    },

    #[error("character does not qualify for {class}")]
    IneligibleClass { class: Class },

    #[error("no allocation points left")]
    NoPointsLeft,

    #[error("cannot refund an attribute below its racial baseline")]
    RefundBelowBaseline,

    #[error("a name is required")]
    NameRequired,
}
