//! The staged character creation flow.
//!
//! A character record exists from the first step so partially created
//! characters can be shown and persisted; [`CreationStage`] gates which
//! fields are meaningful. Derivation only runs at the final confirm.

use crate::consts::{ATTR_MAX, STARTING_AGE_WEEKS};
use crate::data::SpellCatalog;
use crate::error::RulesError;
use crate::player::abilities::{self, Ability};
use crate::player::alignment::Alignment;
use crate::player::attributes::{Attribute, allocate_for_class, roll_bonus_points};
use crate::player::character::{Character, CreationMethod, CreationStage, Location};
use crate::player::class::Class;
use crate::player::race::Race;
use crate::player::status::Status;
use crate::progression::spellbook;
use crate::progression::xp::xp_required;
use crate::rng::RollSource;
use crate::ruleset::Ruleset;

fn expect_stage(ch: &Character, expected: CreationStage) -> Result<(), RulesError> {
    if ch.stage == expected {
        Ok(())
    } else {
        Err(RulesError::WrongStage {
            expected,
            found: ch.stage,
        })
    }
}

/// Start the flow with a chosen method.
pub fn begin(method: CreationMethod) -> Character {
    let mut ch = Character::blank(String::new());
    ch.method = method;
    ch.stage = CreationStage::EnterName;
    ch
}

pub fn set_name(ch: &mut Character, name: &str) -> Result<(), RulesError> {
    expect_stage(ch, CreationStage::EnterName)?;
    let name = name.trim();
    if name.is_empty() {
        return Err(RulesError::NameRequired);
    }
    ch.name = name.to_string();
    ch.stage = CreationStage::ChooseRace;
    Ok(())
}

/// Pick a race: the racial baseline becomes the working attribute set and
/// the point-buy budget is rolled.
pub fn choose_race(
    ch: &mut Character,
    race: Race,
    rng: &mut impl RollSource,
) -> Result<(), RulesError> {
    expect_stage(ch, CreationStage::ChooseRace)?;
    ch.race = race;
    ch.attrs = race.base_attributes();
    ch.attr_max = ch.attrs;
    ch.points_left = roll_bonus_points(rng);
    ch.stage = CreationStage::ChooseAlignment;
    Ok(())
}

pub fn choose_alignment(ch: &mut Character, alignment: Alignment) -> Result<(), RulesError> {
    expect_stage(ch, CreationStage::ChooseAlignment)?;
    ch.alignment = alignment;
    // Quick creation allocates when the class is picked
    ch.stage = match ch.method {
        CreationMethod::Manual => CreationStage::AllocateStats,
        CreationMethod::Quick => CreationStage::ChooseClass,
    };
    Ok(())
}

/// Spend one budget point on an attribute (manual allocation).
pub fn spend_point(ch: &mut Character, attr: Attribute) -> Result<(), RulesError> {
    expect_stage(ch, CreationStage::AllocateStats)?;
    if ch.points_left <= 0 || ch.attrs.get(attr) >= ATTR_MAX {
        return Err(RulesError::NoPointsLeft);
    }
    ch.points_left -= 1;
    ch.raise_attribute(attr);
    Ok(())
}

/// Return one point to the budget; never below the racial baseline.
pub fn refund_point(ch: &mut Character, attr: Attribute) -> Result<(), RulesError> {
    expect_stage(ch, CreationStage::AllocateStats)?;
    if ch.attrs.get(attr) <= ch.race.base_attributes().get(attr) {
        return Err(RulesError::RefundBelowBaseline);
    }
    ch.attrs.modify(attr, -1);
    ch.points_left += 1;
    Ok(())
}

/// Leave manual allocation; unspent points are forfeited at confirm.
pub fn finish_allocation(ch: &mut Character) -> Result<(), RulesError> {
    expect_stage(ch, CreationStage::AllocateStats)?;
    ch.stage = CreationStage::ChooseClass;
    Ok(())
}

/// Pick a class. Manual creation requires the allocated attributes to
/// qualify already; quick creation allocates the budget class-directed
/// first and then checks.
pub fn choose_class(ch: &mut Character, class: Class) -> Result<(), RulesError> {
    expect_stage(ch, CreationStage::ChooseClass)?;

    match ch.method {
        CreationMethod::Manual => {
            if !class.qualifies(&ch.attrs, ch.alignment) {
                return Err(RulesError::IneligibleClass { class });
            }
        }
        CreationMethod::Quick => {
            let baseline = ch.race.base_attributes();
            let allocated =
                allocate_for_class(&baseline, class.primary_attribute(), ch.points_left);
            if !class.qualifies(&allocated, ch.alignment) {
                return Err(RulesError::IneligibleClass { class });
            }
            ch.attrs = allocated;
            ch.attr_max = allocated;
            ch.points_left = 0;
        }
    }

    ch.class = class;
    ch.stage = CreationStage::ChoosePortrait;
    Ok(())
}

pub fn choose_portrait(ch: &mut Character, portrait: u8) -> Result<(), RulesError> {
    expect_stage(ch, CreationStage::ChoosePortrait)?;
    ch.portrait = portrait;
    ch.stage = CreationStage::ReviewAndConfirm;
    Ok(())
}

/// Final confirm: counters, the initial derivation pass and the starting
/// spell grant.
pub fn confirm(
    ch: &mut Character,
    catalog: &SpellCatalog,
    ruleset: &Ruleset,
    rng: &mut impl RollSource,
) -> Result<(), RulesError> {
    expect_stage(ch, CreationStage::ReviewAndConfirm)?;

    ch.attr_max.raise_to(&ch.attrs);
    ch.level = 1;
    ch.max_level = 1;
    ch.status = Status::Ok;
    ch.location = Location::Town;

    ch.abilities[Ability::HitDice] = 1;
    ch.abilities[Ability::Experience] = 0;
    ch.abilities[Ability::ExpToNext] = xp_required(ch.class, 1);
    ch.abilities[Ability::Gold] = 100 + rng.rn2(100) as i64;
    ch.abilities[Ability::AgeWeeks] = STARTING_AGE_WEEKS + rng.rn2(156) as i64;

    abilities::derive_initial(ch, rng);
    spellbook::grant_initial_spells(ch, catalog, ruleset, rng);

    ch.stage = CreationStage::Completed;
    Ok(())
}
