//! The level lifecycle: gaining levels, losing them to drain, aging,
//! class changes and rebirth.

use crate::consts::{ATTR_MIN, ATTR_MAX, STARTING_AGE_WEEKS};
use crate::data::SpellCatalog;
use crate::error::RulesError;
use crate::player::abilities::{self, Ability};
use crate::player::attributes::{Attribute, allocate_for_class};
use crate::player::character::{Character, CharacterFlags, Location};
use crate::player::class::Class;
use crate::player::status::Status;
use crate::progression::spellbook;
use crate::progression::xp::xp_required;
use crate::rng::RollSource;
use crate::ruleset::Ruleset;

/// What happened during a level-up, for the caller to display
#[derive(Debug, Clone, Default)]
pub struct LevelUpOutcome {
    /// Whether the spell pass taught anything new
    pub learned_spells: bool,
    /// Attribute drift applied this level, as (attribute, delta)
    pub stat_changes: Vec<(Attribute, i8)>,
    /// Hit points gained
    pub hp_gain: i64,
    /// The character decayed past the playable floor and was retired
    pub retired: bool,
}

/// Advance a character one level.
pub fn level_up(
    ch: &mut Character,
    catalog: &SpellCatalog,
    ruleset: &Ruleset,
    rng: &mut impl RollSource,
) -> LevelUpOutcome {
    ch.level += 1;
    ch.abilities.add(Ability::HitDice, 1);
    ch.max_level = ch.max_level.max(ch.level);

    let learned_spells = spellbook::learning_pass(ch, catalog, rng);

    ch.abilities[Ability::ExpToNext] = xp_required(ch.class, ch.level);

    let mut stat_changes = Vec::new();
    for attr in Attribute::ALL {
        if let Some(delta) = drift_attribute(ch, attr, rng) {
            stat_changes.push((attr, delta));
        }
    }

    abilities::derive_level_up(ch);

    let hp_gain = grow_hp(ch, ruleset, rng);

    // Old age can decay Vitality past the floor; that ends the career
    let retired = ch.attrs.get(Attribute::Vitality) < ATTR_MIN;
    if retired {
        ch.status.escalate_to(Status::Lost);
        ch.location = Location::Retired;
    }

    LevelUpOutcome {
        learned_spells,
        stat_changes,
        hp_gain,
        retired,
    }
}

/// Attribute drift on level-up: 75% chance of any change, decreases grow
/// more likely with age, increases cap at the maximum and push the
/// high-water mark.
fn drift_attribute(
    ch: &mut Character,
    attr: Attribute,
    rng: &mut impl RollSource,
) -> Option<i8> {
    if !rng.percent(75) {
        return None;
    }

    let age_years = ch.age_weeks() / 52;
    if (rng.rn2(130) as i64) < age_years {
        // A held 18 sometimes shrugs off the loss entirely
        if ch.attrs.get(attr) == ATTR_MAX && rng.one_in(6) {
            return None;
        }
        let old = ch.attrs.get(attr);
        if attr == Attribute::Vitality {
            ch.attrs.decay(attr);
        } else {
            ch.attrs.modify(attr, -1);
        }
        (ch.attrs.get(attr) != old).then_some(-1)
    } else {
        let old = ch.attrs.get(attr);
        // A stat decayed past the floor is beyond natural recovery
        if old >= ATTR_MAX || old < ATTR_MIN {
            return None;
        }
        ch.raise_attribute(attr);
        Some(1)
    }
}

/// Hit-point growth on level-up. Default mode adds one class die (plus
/// the Vitality bonus, at least 1); reroll mode rerolls every hit die and
/// keeps the better of the new total and the old maximum plus one.
fn grow_hp(ch: &mut Character, ruleset: &Ruleset, rng: &mut impl RollSource) -> i64 {
    let (count, sides) = ch.class.hit_dice();
    let vit_bonus = ch.abilities[Ability::VitalityBonus];
    let old_max = ch.abilities[Ability::MaxHp];

    let new_max = if ruleset.reroll_hp_on_level_up {
        let hit_dice = ch.hit_dice().max(1);
        let mut total = 0;
        for _ in 0..hit_dice {
            total += (rng.dice(count, sides) as i64 + vit_bonus).max(1);
        }
        total.max(old_max + 1)
    } else {
        old_max + (rng.dice(count, sides) as i64 + vit_bonus).max(1)
    };

    let gain = new_max - old_max;
    ch.abilities[Ability::MaxHp] = new_max;
    ch.abilities.add(Ability::Hp, gain);
    gain
}

/// Drain a character one level. At level 1 the character is lost
/// outright. Returns true if the character was lost.
pub fn level_down(ch: &mut Character, catalog: &SpellCatalog) -> bool {
    if ch.level <= 1 {
        ch.status.escalate_to(Status::Lost);
        return true;
    }

    let old_level = ch.level as i64;
    ch.level -= 1;
    ch.abilities.add(Ability::HitDice, -1);
    // max_level never decreases

    spellbook::refresh_capacities(ch, catalog);

    ch.abilities[Ability::Experience] = xp_required(ch.class, ch.level - 1) + 1;
    ch.abilities[Ability::ExpToNext] = xp_required(ch.class, ch.level);

    // Rescale the maximum proportionally, keep the missing HP
    let new_level = ch.level as i64;
    let old_max = ch.abilities[Ability::MaxHp];
    let missing = old_max - ch.abilities[Ability::Hp];
    let new_max = (old_max * new_level / old_level).max(1);
    ch.abilities[Ability::MaxHp] = new_max;
    ch.abilities[Ability::Hp] = (new_max - missing).max(0);

    false
}

/// Add weeks to the character's age. Used by rest and recovery features.
pub fn age(ch: &mut Character, weeks: i64) {
    ch.abilities.add(Ability::AgeWeeks, weeks);
}

/// Switch to a new class the character qualifies for. Level and
/// experience restart at the bottom; hit points and known spells carry
/// over, though drained capacities only return as circles re-unlock.
pub fn change_class(
    ch: &mut Character,
    new_class: Class,
    catalog: &SpellCatalog,
) -> Result<(), RulesError> {
    if !new_class.qualifies(&ch.attrs, ch.alignment) {
        return Err(RulesError::IneligibleClass { class: new_class });
    }

    ch.class = new_class;
    ch.level = 1;
    ch.abilities[Ability::HitDice] = 1;
    ch.abilities[Ability::Experience] = 0;
    ch.abilities[Ability::ExpToNext] = xp_required(new_class, 1);
    ch.flags |= CharacterFlags::CLASS_CHANGED;

    abilities::derive_class_change(ch);
    spellbook::refresh_capacities(ch, catalog);

    Ok(())
}

/// Rebirth: back to level 1 with a boosted allocation over the racial
/// baseline, baseline hit points, and a young body. Identity, gold,
/// known spells and the max-level history are retained.
pub fn legate(ch: &mut Character, catalog: &SpellCatalog, rng: &mut impl RollSource) {
    let budget = 10 + rng.rn2(4) as i64 + ch.max_level as i64 / 5;
    let baseline = ch.race.base_attributes();
    ch.attrs = allocate_for_class(&baseline, ch.class.primary_attribute(), budget);
    ch.attr_max = ch.attrs;

    ch.level = 1;
    ch.abilities[Ability::HitDice] = 1;
    ch.abilities[Ability::Experience] = 0;
    ch.abilities[Ability::ExpToNext] = xp_required(ch.class, 1);
    ch.abilities[Ability::AgeWeeks] = STARTING_AGE_WEEKS + rng.rn2(156) as i64;
    ch.abilities[Ability::PoisonStrength] = 0;

    ch.status.escalate_to(Status::Ok);
    ch.location = Location::Town;
    ch.flags |= CharacterFlags::LEGATED;

    abilities::derive_legate(ch);
    spellbook::refresh_capacities(ch, catalog);
    ch.spells.rest_refill();
}
