//! Core attributes (Strength, Intelligence, Piety, Vitality, Agility, Luck)
//! and the point-buy model used at creation.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::consts::{ATTR_MAX, ATTR_MIN, MAX_BONUS_POINTS, NUM_ATTRS};
use crate::rng::RollSource;

/// Attribute type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[repr(u8)]
pub enum Attribute {
    Strength = 0,
    Intelligence = 1,
    Piety = 2,
    Vitality = 3,
    Agility = 4,
    Luck = 5,
}

impl Attribute {
    /// Short name for display
    pub const fn short_name(&self) -> &'static str {
        match self {
            Attribute::Strength => "Str",
            Attribute::Intelligence => "Int",
            Attribute::Piety => "Pie",
            Attribute::Vitality => "Vit",
            Attribute::Agility => "Agi",
            Attribute::Luck => "Lck",
        }
    }

    /// Get index (0-5)
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// All attributes in order
    pub const ALL: [Attribute; NUM_ATTRS] = [
        Attribute::Strength,
        Attribute::Intelligence,
        Attribute::Piety,
        Attribute::Vitality,
        Attribute::Agility,
        Attribute::Luck,
    ];
}

/// One full set of attribute values.
///
/// Every write clamps into `[ATTR_MIN, ATTR_MAX]`; the only exception is
/// [`AttributeSet::decay`], which may leave a value one point below the
/// playable floor so the level lifecycle can notice and retire the
/// character.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeSet {
    values: [i8; NUM_ATTRS],
}

impl AttributeSet {
    pub const fn new(values: [i8; NUM_ATTRS]) -> Self {
        Self { values }
    }

    pub const fn get(&self, attr: Attribute) -> i8 {
        self.values[attr as usize]
    }

    /// Set an attribute value, clamped to the legal range
    pub fn set(&mut self, attr: Attribute, value: i8) {
        self.values[attr as usize] = value.clamp(ATTR_MIN, ATTR_MAX);
    }

    /// Modify an attribute by delta, clamped to the legal range
    pub fn modify(&mut self, attr: Attribute, delta: i8) {
        let new_value = self.values[attr as usize].saturating_add(delta);
        self.set(attr, new_value);
    }

    /// Age-driven loss. Unlike [`set`](Self::set) this may drop one point
    /// below the playable floor; callers must check
    /// [`below_minimum`](Self::below_minimum) afterwards.
    pub fn decay(&mut self, attr: Attribute) {
        let idx = attr as usize;
        self.values[idx] = (self.values[idx] - 1).max(ATTR_MIN - 1);
    }

    /// True if any value has decayed past the playable floor
    pub fn below_minimum(&self) -> bool {
        self.values.iter().any(|&v| v < ATTR_MIN)
    }

    /// Sum of all six values
    pub fn total(&self) -> i32 {
        self.values.iter().map(|&v| v as i32).sum()
    }

    /// Raise each value to at least the matching value of `other`
    pub fn raise_to(&mut self, other: &AttributeSet) {
        for attr in Attribute::ALL {
            if other.get(attr) > self.get(attr) {
                self.set(attr, other.get(attr));
            }
        }
    }
}

/// Roll the creation point-buy budget.
///
/// `7 + rn2(4)`, then up to two rare +10 bonuses: each needs a 1-in-10
/// roll, the second is only attempted when the first hit, and either is
/// skipped when it would push the budget past the cap.
pub fn roll_bonus_points(rng: &mut impl RollSource) -> i64 {
    let mut points = 7 + rng.rn2(4) as i64;
    for _ in 0..2 {
        if points + 10 > MAX_BONUS_POINTS {
            break;
        }
        if !rng.one_in(10) {
            break;
        }
        points += 10;
    }
    points
}

/// Class-directed allocation for quick creation.
///
/// Raises `primary` to 15 (spending points, or reclaiming them when the
/// baseline is already higher) and dumps whatever budget remains into
/// Vitality. Returns the attributes after clamping.
pub fn allocate_for_class(
    baseline: &AttributeSet,
    primary: Attribute,
    points: i64,
) -> AttributeSet {
    let mut attrs = *baseline;
    let mut left = points;

    let current = attrs.get(primary) as i64;
    left -= 15 - current;
    attrs.set(primary, 15);

    if left > 0 {
        let vit = attrs.get(Attribute::Vitality) as i64 + left;
        attrs.set(Attribute::Vitality, vit.min(ATTR_MAX as i64) as i8);
    }

    attrs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{GameRng, ScriptedRolls};

    #[test]
    fn test_set_clamps() {
        let mut attrs = AttributeSet::new([8; NUM_ATTRS]);
        attrs.set(Attribute::Strength, 25);
        assert_eq!(attrs.get(Attribute::Strength), 18);
        attrs.set(Attribute::Luck, 1);
        assert_eq!(attrs.get(Attribute::Luck), 3);
    }

    #[test]
    fn test_decay_goes_one_below_floor() {
        let mut attrs = AttributeSet::new([3; NUM_ATTRS]);
        attrs.decay(Attribute::Vitality);
        assert_eq!(attrs.get(Attribute::Vitality), 2);
        assert!(attrs.below_minimum());
        // and no further
        attrs.decay(Attribute::Vitality);
        assert_eq!(attrs.get(Attribute::Vitality), 2);
    }

    #[test]
    fn test_bonus_points_range() {
        let mut rng = GameRng::new(7);
        for _ in 0..2000 {
            let points = roll_bonus_points(&mut rng);
            assert!((7..=30).contains(&points), "budget {points} out of range");
        }
    }

    #[test]
    fn test_bonus_points_double_hit() {
        // rn2(4)=3, then two successful 1-in-10 rolls
        let mut rolls = ScriptedRolls::new(&[3, 0, 0]);
        assert_eq!(roll_bonus_points(&mut rolls), 30);
    }

    #[test]
    fn test_bonus_points_second_needs_first() {
        // rn2(4)=0, first bonus roll misses; no second attempt is made
        let mut rolls = ScriptedRolls::new(&[0, 5]);
        assert_eq!(roll_bonus_points(&mut rolls), 7);
        assert_eq!(rolls.remaining(), 0);
    }

    #[test]
    fn test_allocate_human_fighter() {
        // Human baseline, Strength primary: 15 costs 7 of the budget,
        // the rest lands in Vitality.
        let baseline = AttributeSet::new([8, 5, 5, 8, 8, 9]);
        let attrs = allocate_for_class(&baseline, Attribute::Strength, 10);
        assert_eq!(attrs.get(Attribute::Strength), 15);
        assert_eq!(attrs.get(Attribute::Vitality), 8 + 3);
    }

    #[test]
    fn test_allocate_exact_budget() {
        let baseline = AttributeSet::new([8, 5, 5, 8, 8, 9]);
        let attrs = allocate_for_class(&baseline, Attribute::Strength, 7);
        assert_eq!(attrs.get(Attribute::Strength), 15);
        assert_eq!(attrs.get(Attribute::Vitality), 8);
    }

    #[test]
    fn test_allocate_vitality_clamps_at_max() {
        let baseline = AttributeSet::new([8, 5, 5, 16, 8, 9]);
        let attrs = allocate_for_class(&baseline, Attribute::Strength, 30);
        assert_eq!(attrs.get(Attribute::Vitality), 18);
    }
}
