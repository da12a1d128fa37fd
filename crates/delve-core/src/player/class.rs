//! Character classes: requirement thresholds, hit dice, casting parameters.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::alignment::Alignment;
use super::attributes::{Attribute, AttributeSet};
use crate::data::Discipline;

/// Character class
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum Class {
    #[default]
    Fighter,
    Mage,
    Priest,
    Thief,
    Bishop,
    Samurai,
    Lord,
    Ninja,
}

impl Class {
    pub const ALL: [Class; 8] = [
        Class::Fighter,
        Class::Mage,
        Class::Priest,
        Class::Thief,
        Class::Bishop,
        Class::Samurai,
        Class::Lord,
        Class::Ninja,
    ];

    /// The attribute maxed out by quick (class-directed) creation
    pub const fn primary_attribute(&self) -> Attribute {
        match self {
            Class::Fighter | Class::Samurai | Class::Lord => Attribute::Strength,
            Class::Mage | Class::Bishop => Attribute::Intelligence,
            Class::Priest => Attribute::Piety,
            Class::Thief | Class::Ninja => Attribute::Agility,
        }
    }

    /// Hit dice rolled on level-up, as (count, sides)
    pub const fn hit_dice(&self) -> (u32, u32) {
        match self {
            Class::Mage => (1, 4),
            Class::Thief | Class::Bishop | Class::Ninja => (1, 6),
            Class::Priest => (1, 8),
            Class::Fighter | Class::Lord => (1, 10),
            Class::Samurai => (2, 8),
        }
    }

    /// Fixed hit-point base used at creation and on rebirth
    pub const fn base_hp(&self) -> i64 {
        match self {
            Class::Fighter | Class::Lord => 10,
            Class::Mage => 4,
            Class::Priest => 8,
            Class::Thief | Class::Bishop | Class::Ninja => 6,
            Class::Samurai => 16,
        }
    }

    /// Casting progression parameters (level_mod, level_offset) for a
    /// discipline, or None when the class cannot cast it
    pub const fn casting(&self, discipline: Discipline) -> Option<(i64, i64)> {
        match (self, discipline) {
            (Class::Mage, Discipline::Arcane) => Some((0, 2)),
            (Class::Priest, Discipline::Divine) => Some((0, 2)),
            (Class::Bishop, Discipline::Arcane) => Some((0, 4)),
            (Class::Bishop, Discipline::Divine) => Some((3, 4)),
            (Class::Samurai, Discipline::Arcane) => Some((3, 3)),
            (Class::Lord, Discipline::Divine) => Some((3, 2)),
            _ => None,
        }
    }

    /// The discipline a caster class starts with, if any
    pub const fn native_discipline(&self) -> Option<Discipline> {
        match self {
            Class::Mage | Class::Bishop | Class::Samurai => Some(Discipline::Arcane),
            Class::Priest | Class::Lord => Some(Discipline::Divine),
            _ => None,
        }
    }

    /// Classes trained to fight in the front line; they get the higher
    /// hit-probability progression and extra swings
    pub const fn is_martial(&self) -> bool {
        matches!(
            self,
            Class::Fighter | Class::Samurai | Class::Lord | Class::Ninja
        )
    }

    /// Whether a character with these attributes and alignment qualifies
    pub fn qualifies(&self, attrs: &AttributeSet, alignment: Alignment) -> bool {
        use Attribute::*;
        let at = |a: Attribute| attrs.get(a);
        match self {
            Class::Fighter => at(Strength) >= 11,
            Class::Mage => at(Intelligence) >= 11,
            Class::Priest => {
                at(Piety) >= 11 && matches!(alignment, Alignment::Good | Alignment::Evil)
            }
            Class::Thief => {
                at(Agility) >= 11 && matches!(alignment, Alignment::Neutral | Alignment::Evil)
            }
            Class::Bishop => {
                at(Intelligence) >= 12
                    && at(Piety) >= 12
                    && matches!(alignment, Alignment::Good | Alignment::Evil)
            }
            Class::Samurai => {
                at(Strength) >= 15
                    && at(Intelligence) >= 11
                    && at(Piety) >= 10
                    && at(Vitality) >= 10
                    && at(Agility) >= 10
                    && matches!(alignment, Alignment::Good | Alignment::Neutral)
            }
            Class::Lord => {
                at(Strength) >= 15
                    && at(Intelligence) >= 12
                    && at(Piety) >= 12
                    && at(Vitality) >= 15
                    && at(Agility) >= 14
                    && at(Luck) >= 15
                    && alignment == Alignment::Good
            }
            Class::Ninja => {
                at(Strength) >= 15
                    && at(Intelligence) >= 17
                    && at(Piety) >= 15
                    && at(Vitality) >= 16
                    && at(Agility) >= 15
                    && at(Luck) >= 16
                    && alignment != Alignment::Good
            }
        }
    }
}

/// The set of classes open to a character with these attributes and
/// alignment, in declaration order, plus its size.
pub fn eligible_classes(attrs: &AttributeSet, alignment: Alignment) -> (Vec<Class>, usize) {
    let classes: Vec<Class> = Class::ALL
        .into_iter()
        .filter(|c| c.qualifies(attrs, alignment))
        .collect();
    let count = classes.len();
    (classes, count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::NUM_ATTRS;

    fn attrs(values: [i8; NUM_ATTRS]) -> AttributeSet {
        AttributeSet::new(values)
    }

    #[test]
    fn test_fighter_threshold_boundary() {
        let below = attrs([10, 3, 3, 3, 3, 3]);
        let at = attrs([11, 3, 3, 3, 3, 3]);
        assert!(!Class::Fighter.qualifies(&below, Alignment::Neutral));
        assert!(Class::Fighter.qualifies(&at, Alignment::Neutral));
    }

    #[test]
    fn test_priest_alignment_gate() {
        let a = attrs([3, 3, 11, 3, 3, 3]);
        assert!(Class::Priest.qualifies(&a, Alignment::Good));
        assert!(Class::Priest.qualifies(&a, Alignment::Evil));
        assert!(!Class::Priest.qualifies(&a, Alignment::Neutral));
    }

    #[test]
    fn test_thief_alignment_gate() {
        let a = attrs([3, 3, 3, 3, 11, 3]);
        assert!(!Class::Thief.qualifies(&a, Alignment::Good));
        assert!(Class::Thief.qualifies(&a, Alignment::Neutral));
    }

    #[test]
    fn test_lord_requires_all_thresholds() {
        let a = attrs([15, 12, 12, 15, 14, 15]);
        assert!(Class::Lord.qualifies(&a, Alignment::Good));
        assert!(!Class::Lord.qualifies(&a, Alignment::Neutral));
        let weak_agility = attrs([15, 12, 12, 15, 13, 15]);
        assert!(!Class::Lord.qualifies(&weak_agility, Alignment::Good));
    }

    #[test]
    fn test_ninja_rejects_good() {
        let a = attrs([15, 17, 15, 16, 15, 16]);
        assert!(Class::Ninja.qualifies(&a, Alignment::Evil));
        assert!(Class::Ninja.qualifies(&a, Alignment::Neutral));
        assert!(!Class::Ninja.qualifies(&a, Alignment::Good));
    }

    #[test]
    fn test_eligible_set_and_count() {
        // Maxed stats, Evil: everything except Priest-family Good locks
        let a = attrs([18, 18, 18, 18, 18, 18]);
        let (classes, count) = eligible_classes(&a, Alignment::Evil);
        assert_eq!(classes.len(), count);
        assert!(classes.contains(&Class::Fighter));
        assert!(classes.contains(&Class::Ninja));
        assert!(!classes.contains(&Class::Samurai)); // Good/Neutral only
        assert!(!classes.contains(&Class::Lord)); // Good only
    }

    #[test]
    fn test_casting_parameters() {
        assert_eq!(Class::Mage.casting(Discipline::Arcane), Some((0, 2)));
        assert_eq!(Class::Mage.casting(Discipline::Divine), None);
        assert_eq!(Class::Bishop.casting(Discipline::Divine), Some((3, 4)));
        assert_eq!(Class::Fighter.casting(Discipline::Arcane), None);
    }
}
