//! Core rule constants for the character engine.

/// Number of core attributes (Strength .. Luck)
pub const NUM_ATTRS: usize = 6;

/// Attribute bounds; every mutation clamps into this range
pub const ATTR_MIN: i8 = 3;
pub const ATTR_MAX: i8 = 18;

/// Spell circles run 1..=7
pub const NUM_CIRCLES: usize = 7;

/// Spell-point capacity per circle never exceeds this
pub const MAX_SPELL_POINTS: i64 = 9;

/// Spell learning rolls `rn2(LEARN_ROLL)` against the governing attribute
pub const LEARN_ROLL: u32 = 30;

/// Point-buy budget cap during creation; the rare +10 bonuses are skipped
/// rather than pushing the budget past this
pub const MAX_BONUS_POINTS: i64 = 30;

/// Die-scale cap for the named saving-throw resistances
pub const MAX_RESISTANCE: i64 = 19;

/// Characters begin adult life at eighteen
pub const STARTING_AGE_WEEKS: i64 = 18 * 52;

/// Resurrection cost per level, by status tier
pub const COST_ASHES: i64 = 500;
pub const COST_DEAD: i64 = 250;
pub const COST_STONED: i64 = 200;
pub const COST_HELD: i64 = 100;
