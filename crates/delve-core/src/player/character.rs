//! The character aggregate.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::abilities::{Ability, AbilityTable};
use super::alignment::Alignment;
use super::attributes::{Attribute, AttributeSet};
use super::class::{Class, eligible_classes};
use super::race::Race;
use super::status::Status;
use crate::progression::spellbook::SpellKnowledge;

/// Ordered creation lifecycle. Only gates which partial data is
/// meaningful to display; once Completed it has no effect on the rules.
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
pub enum CreationStage {
    #[default]
    ChooseMethod = 0,
    EnterName = 1,
    ChooseRace = 2,
    ChooseAlignment = 3,
    AllocateStats = 4,
    ChooseClass = 5,
    ChoosePortrait = 6,
    ReviewAndConfirm = 7,
    Completed = 8,
}

/// How the creation flow allocates stat points
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum CreationMethod {
    /// Point-by-point allocation by the player
    #[default]
    Manual,
    /// Class-directed: primary attribute maxed, remainder into Vitality
    Quick,
}

/// Where the character currently is. Owned by the dungeon subsystem;
/// stored here so lifecycle transitions can move characters out of play.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Location {
    #[default]
    Town,
    Maze,
    /// Non-combat holding area after temple service
    Temple,
    /// Permanent-removal holding area for the irrecoverable
    Morgue,
    /// Out of active play (old age, rebirth queue)
    Retired,
}

bitflags! {
    /// Session flags carried on the character record
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct CharacterFlags: u8 {
        /// Has been reborn at least once
        const LEGATED = 1;
        /// Has changed class at least once
        const CLASS_CHANGED = 1 << 1;
    }
}

/// The character aggregate: identity, raw attributes, derived abilities,
/// spell knowledge and condition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    // Identity
    pub name: String,
    pub race: Race,
    pub class: Class,
    pub alignment: Alignment,
    pub portrait: u8,

    // Attributes: current values and their high-water marks
    pub attrs: AttributeSet,
    pub attr_max: AttributeSet,

    // Experience level
    pub level: i32,
    /// Highest level ever attained; never decreases, gates spell circles
    pub max_level: i32,

    // Derived values and counters
    pub abilities: AbilityTable,
    pub spells: SpellKnowledge,

    // Condition and whereabouts
    pub status: Status,
    pub location: Location,
    pub flags: CharacterFlags,

    // Creation bookkeeping
    pub stage: CreationStage,
    pub method: CreationMethod,
    /// Unspent point-buy budget; only meaningful before creation completes
    pub points_left: i64,
}

impl Character {
    /// A blank record at the start of the creation flow.
    pub(crate) fn blank(name: String) -> Self {
        Self {
            name,
            race: Race::default(),
            class: Class::default(),
            alignment: Alignment::default(),
            portrait: 0,
            attrs: AttributeSet::default(),
            attr_max: AttributeSet::default(),
            level: 1,
            max_level: 1,
            abilities: AbilityTable::new(),
            spells: SpellKnowledge::default(),
            status: Status::Ok,
            location: Location::Town,
            flags: CharacterFlags::empty(),
            stage: CreationStage::ChooseMethod,
            method: CreationMethod::Manual,
            points_left: 0,
        }
    }

    // ------------------------------------------------------------------
    // Typed counter access
    // ------------------------------------------------------------------

    pub fn hp(&self) -> i64 {
        self.abilities[Ability::Hp]
    }

    pub fn max_hp(&self) -> i64 {
        self.abilities[Ability::MaxHp]
    }

    pub fn gold(&self) -> i64 {
        self.abilities[Ability::Gold]
    }

    pub fn experience(&self) -> i64 {
        self.abilities[Ability::Experience]
    }

    pub fn exp_to_next(&self) -> i64 {
        self.abilities[Ability::ExpToNext]
    }

    pub fn age_weeks(&self) -> i64 {
        self.abilities[Ability::AgeWeeks]
    }

    pub fn hit_dice(&self) -> i64 {
        self.abilities[Ability::HitDice]
    }

    /// Poison is tracked by strength, independent of [`Status`]
    pub fn is_poisoned(&self) -> bool {
        self.abilities[Ability::PoisonStrength] != 0
    }

    /// Alive and able to act
    pub fn is_active(&self) -> bool {
        self.status < Status::Held && self.hp() > 0
    }

    // ------------------------------------------------------------------
    // Attribute mutation helpers
    // ------------------------------------------------------------------

    /// Raise an attribute by one, capped at the legal maximum; tracks the
    /// high-water mark.
    pub fn raise_attribute(&mut self, attr: Attribute) {
        self.attrs.modify(attr, 1);
        if self.attrs.get(attr) > self.attr_max.get(attr) {
            self.attr_max.set(attr, self.attrs.get(attr));
        }
    }

    /// The classes this character could take up right now.
    pub fn eligible_classes(&self) -> (Vec<Class>, usize) {
        eligible_classes(&self.attrs, self.alignment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_character_defaults() {
        let ch = Character::blank("Wren".into());
        assert_eq!(ch.stage, CreationStage::ChooseMethod);
        assert_eq!(ch.status, Status::Ok);
        assert_eq!(ch.level, 1);
        assert!(!ch.is_poisoned());
    }

    #[test]
    fn test_raise_attribute_tracks_high_water() {
        let mut ch = Character::blank("Wren".into());
        ch.attrs = AttributeSet::new([10; 6]);
        ch.attr_max = ch.attrs;
        ch.raise_attribute(Attribute::Luck);
        assert_eq!(ch.attrs.get(Attribute::Luck), 11);
        assert_eq!(ch.attr_max.get(Attribute::Luck), 11);

        // lower it and raise again: high-water sticks at the peak
        ch.attrs.set(Attribute::Luck, 5);
        ch.raise_attribute(Attribute::Luck);
        assert_eq!(ch.attrs.get(Attribute::Luck), 6);
        assert_eq!(ch.attr_max.get(Attribute::Luck), 11);
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut ch = Character::blank("Wren".into());
        ch.abilities[Ability::Gold] = 250;
        ch.flags |= CharacterFlags::LEGATED;
        let json = serde_json::to_string(&ch).unwrap();
        let back: Character = serde_json::from_str(&json).unwrap();
        assert_eq!(back.name, "Wren");
        assert_eq!(back.gold(), 250);
        assert!(back.flags.contains(CharacterFlags::LEGATED));
    }
}
