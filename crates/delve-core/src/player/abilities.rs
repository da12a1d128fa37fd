//! Derived abilities: the ~40 computed combat, magic and survival values.
//!
//! Everything here is recomputed from (attributes, class, race, level) on
//! every lifecycle transition. The table also carries the character's
//! running counters (experience, gold, age) which the derivation pass
//! leaves alone.

use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::attributes::Attribute;
use super::character::Character;
use super::class::Class;
use crate::consts::MAX_RESISTANCE;
use crate::rng::RollSource;

/// Every derived quantity, densely numbered for array indexing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[repr(u8)]
pub enum Ability {
    // Melee
    HitBonus = 0,
    DamageBonus = 1,
    ClassHitBonus = 2,
    UnarmedDamage = 3,
    MeleeAttacks = 4,
    // Magic
    LearnArcane = 5,
    LearnDivine = 6,
    IdentifyItems = 7,
    CurseOnIdentify = 8,
    IdentifyMonsters = 9,
    TeleportHome = 10,
    Dispel = 11,
    // Health
    VitalityBonus = 12,
    MaxHp = 13,
    Hp = 14,
    ResurrectDead = 15,
    ResurrectAshes = 16,
    ResurrectSpell = 17,
    // Defense
    Initiative = 18,
    BaseArmorClass = 19,
    CriticalHit = 20,
    // Traps and terrain
    TrapIdentify = 21,
    TrapDisarm = 22,
    TrapTrigger = 23,
    PitAvoid = 24,
    // Saving throws (die scale)
    ResistBonus = 25,
    ResistPoison = 26,
    ResistParalysis = 27,
    ResistCritical = 28,
    ResistStoning = 29,
    ResistBreath = 30,
    ResistGasTrap = 31,
    ResistMagicTrap = 32,
    ResistSilence = 33,
    ResistDrain = 34,
    // Spell-effect resistances (percent scale)
    ResistSleepSpell = 35,
    ResistDeathSpell = 36,
    ResistHoldSpell = 37,
    RecoverSleep = 38,
    RecoverFear = 39,
    // Counters, owned by the lifecycle rather than the derivation pass
    Experience = 40,
    ExpToNext = 41,
    Gold = 42,
    AgeWeeks = 43,
    HitDice = 44,
    PoisonStrength = 45,
}

impl Ability {
    pub const COUNT: usize = 46;

    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// The nine named saving-throw resistances
    pub const RESISTANCES: [Ability; 9] = [
        Ability::ResistPoison,
        Ability::ResistParalysis,
        Ability::ResistCritical,
        Ability::ResistStoning,
        Ability::ResistBreath,
        Ability::ResistGasTrap,
        Ability::ResistMagicTrap,
        Ability::ResistSilence,
        Ability::ResistDrain,
    ];

    /// Abilities that are percentages, for range checks
    pub const PERCENTAGES: [Ability; 20] = [
        Ability::LearnArcane,
        Ability::LearnDivine,
        Ability::IdentifyItems,
        Ability::CurseOnIdentify,
        Ability::IdentifyMonsters,
        Ability::TeleportHome,
        Ability::Dispel,
        Ability::ResurrectDead,
        Ability::ResurrectAshes,
        Ability::ResurrectSpell,
        Ability::CriticalHit,
        Ability::TrapIdentify,
        Ability::TrapDisarm,
        Ability::TrapTrigger,
        Ability::PitAvoid,
        Ability::ResistSleepSpell,
        Ability::ResistDeathSpell,
        Ability::ResistHoldSpell,
        Ability::RecoverSleep,
        Ability::RecoverFear,
    ];
}

/// Fixed-size table of every derived value, indexed by [`Ability`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbilityTable {
    values: [i64; Ability::COUNT],
}

impl AbilityTable {
    pub const fn new() -> Self {
        Self {
            values: [0; Ability::COUNT],
        }
    }

    pub const fn get(&self, ability: Ability) -> i64 {
        self.values[ability as usize]
    }

    pub fn set(&mut self, ability: Ability, value: i64) {
        self.values[ability as usize] = value;
    }

    pub fn add(&mut self, ability: Ability, delta: i64) {
        self.values[ability as usize] += delta;
    }
}

impl Default for AbilityTable {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<Ability> for AbilityTable {
    type Output = i64;

    fn index(&self, ability: Ability) -> &i64 {
        &self.values[ability as usize]
    }
}

impl IndexMut<Ability> for AbilityTable {
    fn index_mut(&mut self, ability: Ability) -> &mut i64 {
        &mut self.values[ability as usize]
    }
}

// Serde can't derive arrays this long; store the table as a sequence.
impl Serialize for AbilityTable {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.values.as_slice().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for AbilityTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let values = Vec::<i64>::deserialize(deserializer)?;
        let values: [i64; Ability::COUNT] = values
            .try_into()
            .map_err(|v: Vec<i64>| {
                serde::de::Error::invalid_length(v.len(), &"ability table of fixed size")
            })?;
        Ok(Self { values })
    }
}

// ============================================================================
// Derivation
// ============================================================================

/// Attack and damage modifier from Strength: bonus above 15, penalty
/// below 6.
const fn strength_modifier(str_val: i64) -> i64 {
    if str_val > 15 {
        str_val - 15
    } else if str_val < 6 {
        str_val - 6
    } else {
        0
    }
}

/// Bonus hit points per level from Vitality
const fn vitality_bonus(vit: i64) -> i64 {
    match vit {
        3 => -2,
        4..=5 => -1,
        16 => 1,
        17 => 2,
        18..=20 => 3,
        _ => 0,
    }
}

/// Initiative modifier from Agility (negative is faster)
const fn initiative_modifier(agi: i64) -> i64 {
    match agi {
        3 => 3,
        4..=5 => 2,
        6..=7 => 1,
        15 => -1,
        16 => -2,
        17 => -3,
        18..=20 => -4,
        _ => 0,
    }
}

/// Luck contribution to the die-scale resist bonus
const fn luck_resist_bonus(luck: i64) -> i64 {
    if luck >= 18 {
        3
    } else if luck >= 12 {
        2
    } else if luck >= 6 {
        1
    } else {
        0
    }
}

fn clamp_pct(value: i64) -> i64 {
    value.clamp(0, 100)
}

/// Initial creation pass: all formulas plus a rolled starting hit-point
/// total.
pub fn derive_initial(ch: &mut Character, rng: &mut impl RollSource) {
    recompute_formulas(ch);

    let mut base = ch.class.base_hp();
    // Half the time the starting roll comes up short
    if rng.one_in(2) {
        base = base * 9 / 10;
    }
    let hp = (base + ch.abilities[Ability::VitalityBonus]).max(1);
    ch.abilities[Ability::MaxHp] = hp;
    ch.abilities[Ability::Hp] = hp;
}

/// Level-up pass: formulas only; hit-point growth is the lifecycle's job.
pub fn derive_level_up(ch: &mut Character) {
    recompute_formulas(ch);
}

/// Class-change pass: formulas recomputed for the new class, hit points
/// preserved (never rerolled).
pub fn derive_class_change(ch: &mut Character) {
    recompute_formulas(ch);
    let max = ch.abilities[Ability::MaxHp];
    if ch.abilities[Ability::Hp] > max {
        ch.abilities[Ability::Hp] = max;
    }
}

/// Rebirth pass: formulas recomputed, hit points reset to the fixed
/// per-class baseline.
pub fn derive_legate(ch: &mut Character) {
    recompute_formulas(ch);
    let hp = ch.class.base_hp();
    ch.abilities[Ability::MaxHp] = hp;
    ch.abilities[Ability::Hp] = hp;
}

/// The shared recompute core. Overwrites every formula-derived entry;
/// never touches hit points or the lifecycle counters.
fn recompute_formulas(ch: &mut Character) {
    use Ability::*;

    let class = ch.class;
    let lvl = ch.level as i64;
    let str_val = ch.attrs.get(Attribute::Strength) as i64;
    let int = ch.attrs.get(Attribute::Intelligence) as i64;
    let piety = ch.attrs.get(Attribute::Piety) as i64;
    let vit = ch.attrs.get(Attribute::Vitality) as i64;
    let agi = ch.attrs.get(Attribute::Agility) as i64;
    let luck = ch.attrs.get(Attribute::Luck) as i64;

    let t = &mut ch.abilities;

    let str_mod = strength_modifier(str_val);
    t[HitBonus] = str_mod;
    t[DamageBonus] = str_mod;

    t[ClassHitBonus] = if class.is_martial() || class == Class::Priest {
        2 + lvl / 5
    } else {
        lvl / 5
    };

    t[UnarmedDamage] = if class == Class::Ninja { 8 } else { 4 } + str_mod;

    t[MeleeAttacks] = match class {
        Class::Fighter | Class::Samurai | Class::Lord => (lvl / 5).max(1),
        Class::Ninja => lvl / 5 + 1,
        _ => 1,
    };

    t[LearnArcane] = match class {
        Class::Samurai | Class::Bishop | Class::Mage => clamp_pct(int * 100 / 29),
        _ => 0,
    };
    t[LearnDivine] = match class {
        Class::Priest | Class::Lord | Class::Bishop => clamp_pct(piety * 100 / 30),
        _ => 0,
    };

    if class == Class::Bishop {
        t[IdentifyItems] = clamp_pct(10 + 5 * lvl);
        t[CurseOnIdentify] = (35 - 5 * lvl).max(0);
    } else {
        t[IdentifyItems] = 0;
        t[CurseOnIdentify] = 0;
    }

    t[IdentifyMonsters] = clamp_pct(lvl + int + piety);

    t[TeleportHome] = if class == Class::Priest {
        clamp_pct(2 * lvl)
    } else {
        0
    };

    t[Dispel] = match class {
        Class::Priest => clamp_pct(50 + 5 * lvl),
        Class::Bishop if lvl >= 4 => clamp_pct(50 + 5 * lvl - 20),
        Class::Lord if lvl >= 9 => clamp_pct(50 + 5 * lvl - 40),
        _ => 0,
    };

    t[VitalityBonus] = vitality_bonus(vit);

    t[ResurrectDead] = clamp_pct(50 + 3 * vit);
    t[ResurrectAshes] = clamp_pct(40 + 3 * vit);
    t[ResurrectSpell] = clamp_pct(4 * vit);

    t[Initiative] = initiative_modifier(agi);

    t[BaseArmorClass] = if class == Class::Ninja {
        10 - lvl / 3 - 2
    } else {
        10
    };

    t[CriticalHit] = if class == Class::Ninja {
        (2 * lvl).min(50)
    } else {
        0
    };

    t[TrapIdentify] = match class {
        Class::Thief => 6 * agi,
        Class::Ninja => 4 * agi,
        _ => agi,
    }
    .min(95);

    let trap_class = matches!(class, Class::Thief | Class::Ninja);
    t[TrapDisarm] = if trap_class {
        clamp_pct((lvl + 50) * 100 / 69)
    } else {
        0
    };
    t[TrapTrigger] = if trap_class {
        clamp_pct(100 - agi * 100 / 20)
    } else {
        100
    };

    t[PitAvoid] = clamp_pct(agi * 100 / 25);

    let resist = lvl / 5 + luck_resist_bonus(luck);
    t[ResistBonus] = resist;
    for ability in Ability::RESISTANCES {
        t[ability] = resist;
    }
    for &(ability, bonus) in ch.race.resistance_bonuses() {
        t[ability] += bonus;
    }
    for ability in Ability::RESISTANCES {
        t[ability] = t[ability].min(MAX_RESISTANCE);
    }

    t[ResistSleepSpell] = clamp_pct(10 * lvl);
    t[ResistDeathSpell] = clamp_pct(10 * lvl);
    t[ResistHoldSpell] = clamp_pct(50 + 10 * lvl);
    t[RecoverSleep] = clamp_pct(10 * lvl);
    t[RecoverFear] = clamp_pct(5 * lvl);
}
