//! Character alignment.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Moral alignment, fixed at creation and gating class eligibility
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum Alignment {
    Good,
    #[default]
    Neutral,
    Evil,
}

impl Alignment {
    pub const ALL: [Alignment; 3] = [Alignment::Good, Alignment::Neutral, Alignment::Evil];
}
