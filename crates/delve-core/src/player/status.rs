//! Character condition tracking.
//!
//! Conditions only ever get worse; the single way back down is an explicit
//! reset to Ok by healing or temple service.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::consts::{COST_ASHES, COST_DEAD, COST_HELD, COST_STONED};

/// Ordered character condition. Dead escalates to Ashes (a failed
/// resurrection), Ashes to Lost; Lost is terminal and never recovered.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
)]
#[repr(u8)]
pub enum Status {
    #[default]
    Ok = 0,
    Afraid = 1,
    Silenced = 2,
    Asleep = 3,
    Held = 4,
    Stoned = 5,
    Dead = 6,
    Ashes = 7,
    Lost = 8,
}

impl Status {
    /// Apply a condition change, honoring the escalation-only rule:
    /// the update happens only for an explicit reset to Ok or a strictly
    /// worse condition. Returns true if the status changed.
    pub fn escalate_to(&mut self, new_status: Status) -> bool {
        if new_status == Status::Ok || new_status > *self {
            let changed = *self != new_status;
            *self = new_status;
            changed
        } else {
            false
        }
    }

    /// Lost characters are out of the game for good
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Status::Lost)
    }

    /// Conditions the temple can attempt to lift, and their per-level cost
    pub const fn restoration_cost_per_level(&self) -> i64 {
        match self {
            Status::Ashes => COST_ASHES,
            Status::Dead => COST_DEAD,
            Status::Stoned => COST_STONED,
            Status::Held => COST_HELD,
            _ => 0,
        }
    }
}
