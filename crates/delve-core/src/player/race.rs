//! Character races: baseline attributes and racial resistance bonuses.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::abilities::Ability;
use super::attributes::AttributeSet;

/// Character race
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum Race {
    #[default]
    Human,
    Elf,
    Dwarf,
    Gnome,
    Hobbit,
}

impl Race {
    pub const ALL: [Race; 5] = [Race::Human, Race::Elf, Race::Dwarf, Race::Gnome, Race::Hobbit];

    /// Baseline attributes before point-buy
    /// (Str, Int, Piety, Vit, Agi, Luck)
    pub const fn base_attributes(&self) -> AttributeSet {
        match self {
            Race::Human => AttributeSet::new([8, 5, 5, 8, 8, 9]),
            Race::Elf => AttributeSet::new([7, 10, 10, 6, 9, 6]),
            Race::Dwarf => AttributeSet::new([10, 7, 10, 10, 5, 6]),
            Race::Gnome => AttributeSet::new([7, 7, 10, 8, 10, 7]),
            Race::Hobbit => AttributeSet::new([5, 7, 7, 6, 10, 15]),
        }
    }

    /// Fixed racial bonuses folded into the named saving-throw resistances
    pub const fn resistance_bonuses(&self) -> &'static [(Ability, i64)] {
        match self {
            Race::Human => &[
                (Ability::ResistPoison, 1),
                (Ability::ResistParalysis, 1),
                (Ability::ResistCritical, 1),
            ],
            Race::Elf => &[(Ability::ResistBreath, 2)],
            Race::Dwarf => &[(Ability::ResistGasTrap, 4)],
            Race::Gnome => &[(Ability::ResistStoning, 2)],
            Race::Hobbit => &[(Ability::ResistMagicTrap, 2), (Ability::ResistSilence, 3)],
        }
    }
}
