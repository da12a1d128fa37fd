//! Optional rule toggles consumed by the engine.

use serde::{Deserialize, Serialize};

/// Configuration switches that alter a handful of formulas. The default
/// ruleset has every switch off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ruleset {
    /// Drop the small starting spell-point head start for new casters
    pub strict_spell_points: bool,
    /// Reroll every hit die on level-up instead of adding one roll
    pub reroll_hp_on_level_up: bool,
}
