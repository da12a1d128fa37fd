//! Spell points and spell learning.
//!
//! Capacity per circle follows a per-class linear progression; learning is
//! probabilistic against the governing attribute, with a guaranteed
//! fallback so an unlocked circle is never empty.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::consts::{LEARN_ROLL, MAX_SPELL_POINTS, NUM_CIRCLES};
use crate::data::{Discipline, SpellCatalog, SpellId};
use crate::player::attributes::Attribute;
use crate::player::character::Character;
use crate::player::class::Class;
use crate::rng::RollSource;
use crate::ruleset::Ruleset;

/// Maximum and current spell points per circle for one discipline
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CirclePoints {
    pub maximum: [i8; NUM_CIRCLES],
    pub current: [i8; NUM_CIRCLES],
}

/// Everything a character knows about magic
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellKnowledge {
    points: [CirclePoints; 2],
    known: BTreeSet<SpellId>,
}

impl SpellKnowledge {
    /// Spell-point capacity for a circle (1..=7)
    pub fn capacity(&self, discipline: Discipline, circle: u8) -> i64 {
        self.points[discipline.index()].maximum[circle as usize - 1] as i64
    }

    /// Unspent spell points for a circle (1..=7)
    pub fn current(&self, discipline: Discipline, circle: u8) -> i64 {
        self.points[discipline.index()].current[circle as usize - 1] as i64
    }

    pub fn set_capacity(&mut self, discipline: Discipline, circle: u8, value: i64) {
        self.points[discipline.index()].maximum[circle as usize - 1] =
            value.clamp(0, MAX_SPELL_POINTS) as i8;
    }

    /// Raise capacity to at least `value`; never lowers it
    pub fn raise_capacity(&mut self, discipline: Discipline, circle: u8, value: i64) {
        if value > self.capacity(discipline, circle) {
            self.set_capacity(discipline, circle, value);
        }
    }

    /// Spend one point of a circle; false when none remain
    pub fn spend(&mut self, discipline: Discipline, circle: u8) -> bool {
        let slot = &mut self.points[discipline.index()].current[circle as usize - 1];
        if *slot > 0 {
            *slot -= 1;
            true
        } else {
            false
        }
    }

    pub fn is_known(&self, id: SpellId) -> bool {
        self.known.contains(&id)
    }

    /// Record a spell as known; false if it already was
    pub fn learn(&mut self, id: SpellId) -> bool {
        self.known.insert(id)
    }

    pub fn known_spells(&self) -> impl Iterator<Item = SpellId> + '_ {
        self.known.iter().copied()
    }

    pub fn known_count(&self) -> usize {
        self.known.len()
    }

    /// How many spells of one discipline/circle are known
    pub fn known_in_circle(
        &self,
        catalog: &SpellCatalog,
        discipline: Discipline,
        circle: u8,
    ) -> usize {
        catalog
            .in_circle(discipline, circle)
            .filter(|s| self.known.contains(&s.id))
            .count()
    }

    /// Full rest: every circle refills to its maximum
    pub fn rest_refill(&mut self) {
        for points in &mut self.points {
            points.current = points.maximum;
        }
    }
}

// ============================================================================
// Capacity progression
// ============================================================================

/// Spell-point capacity of a class at a level for one circle, before any
/// known-spell rebalancing. Zero for non-casting classes.
pub fn capacity_for(class: Class, level: i32, discipline: Discipline, circle: u8) -> i64 {
    let Some((level_mod, level_offset)) = class.casting(discipline) else {
        return 0;
    };
    let raw = level as i64 - level_mod + level_offset - level_offset * circle as i64;
    raw.clamp(0, MAX_SPELL_POINTS)
}

/// Recompute every capacity from the class progression, then rebalance.
/// Capacities may shrink here (level drain); known spells pull them back
/// up where their circle is still unlocked.
pub fn refresh_capacities(ch: &mut Character, catalog: &SpellCatalog) {
    for discipline in Discipline::ALL {
        for circle in 1..=NUM_CIRCLES as u8 {
            let cap = capacity_for(ch.class, ch.level, discipline, circle);
            ch.spells.set_capacity(discipline, circle, cap);
        }
    }
    rebalance(ch, catalog);
    clamp_current(ch);
}

/// The non-strict ruleset grants new casters a small head start in their
/// native discipline's first circle.
pub fn apply_initial_bonus(ch: &mut Character, ruleset: &Ruleset) {
    if ruleset.strict_spell_points {
        return;
    }
    if let Some(discipline) = ch.class.native_discipline() {
        ch.spells.raise_capacity(discipline, 1, 2);
    }
}

fn clamp_current(ch: &mut Character) {
    for discipline in Discipline::ALL {
        for circle in 1..=NUM_CIRCLES as u8 {
            let max = ch.spells.capacity(discipline, circle);
            if ch.spells.current(discipline, circle) > max {
                let idx = circle as usize - 1;
                ch.spells.points[discipline.index()].current[idx] = max as i8;
            }
        }
    }
}

// ============================================================================
// Learning
// ============================================================================

const fn governing_attribute(discipline: Discipline) -> Attribute {
    match discipline {
        Discipline::Arcane => Attribute::Intelligence,
        Discipline::Divine => Attribute::Piety,
    }
}

/// Probabilistic learning pass over every unlocked circle. Each unknown
/// spell is learned when `rn2(30)` rolls at or under the governing
/// attribute. Returns true if anything was learned.
pub fn attempt_learn(
    ch: &mut Character,
    catalog: &SpellCatalog,
    rng: &mut impl RollSource,
) -> bool {
    let mut learned = false;
    for discipline in Discipline::ALL {
        let attr = ch.attrs.get(governing_attribute(discipline)) as u32;
        for circle in 1..=NUM_CIRCLES as u8 {
            if ch.spells.capacity(discipline, circle) == 0 {
                continue;
            }
            for spell in catalog.in_circle(discipline, circle) {
                if ch.spells.is_known(spell.id) {
                    continue;
                }
                if rng.rn2(LEARN_ROLL) <= attr {
                    ch.spells.learn(spell.id);
                    learned = true;
                }
            }
        }
    }
    learned
}

/// Designated fallback per circle; a second entry is picked one time in
/// three where present.
const ARCANE_FALLBACKS: [(&str, Option<&str>); NUM_CIRCLES] = [
    ("KATINO", Some("HALITO")),
    ("DILTO", Some("SOPIC")),
    ("MOLITO", None),
    ("MORLIS", Some("DALTO")),
    ("MAMORLIS", None),
    ("ZILWAN", None),
    ("MALOR", None),
];
const DIVINE_FALLBACKS: [(&str, Option<&str>); NUM_CIRCLES] = [
    ("DIOS", Some("BADIOS")),
    ("MANIFO", Some("MONTINO")),
    ("DIALKO", None),
    ("DIAL", Some("BADIAL")),
    ("DIALMA", None),
    ("MADI", None),
    ("MALIKTO", None),
];

/// Any unlocked circle with no known spell force-learns its designated
/// fallback. Returns true if anything was learned.
pub fn guarantee_one_per_circle(
    ch: &mut Character,
    catalog: &SpellCatalog,
    rng: &mut impl RollSource,
) -> bool {
    let mut learned = false;
    for discipline in Discipline::ALL {
        let fallbacks = match discipline {
            Discipline::Arcane => &ARCANE_FALLBACKS,
            Discipline::Divine => &DIVINE_FALLBACKS,
        };
        for circle in 1..=NUM_CIRCLES as u8 {
            if ch.spells.capacity(discipline, circle) == 0 {
                continue;
            }
            if ch.spells.known_in_circle(catalog, discipline, circle) > 0 {
                continue;
            }
            let (first, second) = fallbacks[circle as usize - 1];
            let name = match second {
                Some(second) if rng.rn2(3) == 2 => second,
                _ => first,
            };
            let id = catalog
                .find(name)
                .unwrap_or_else(|| panic!("fallback spell {name} missing from catalog"));
            ch.spells.learn(id);
            learned = true;
        }
    }
    learned
}

/// Raise capacities to cover known spells (never lower), except in
/// circles whose unlock level `2*circle - 1` the character has never
/// reached.
pub fn rebalance(ch: &mut Character, catalog: &SpellCatalog) {
    for discipline in Discipline::ALL {
        for circle in 1..=NUM_CIRCLES as u8 {
            let unlock_level = 2 * circle as i32 - 1;
            if unlock_level > ch.max_level {
                continue;
            }
            let known = ch.spells.known_in_circle(catalog, discipline, circle) as i64;
            ch.spells.raise_capacity(discipline, circle, known);
        }
    }
}

/// The full per-level pass: refresh capacities, try to learn, backfill
/// empty circles, rebalance. Returns true when anything new was learned.
pub fn learning_pass(
    ch: &mut Character,
    catalog: &SpellCatalog,
    rng: &mut impl RollSource,
) -> bool {
    refresh_capacities(ch, catalog);
    let mut learned = attempt_learn(ch, catalog, rng);
    learned |= guarantee_one_per_circle(ch, catalog, rng);
    rebalance(ch, catalog);
    learned
}

/// Creation-time grant: capacities (with the non-strict head start), a
/// learning pass, and a full refill.
pub fn grant_initial_spells(
    ch: &mut Character,
    catalog: &SpellCatalog,
    ruleset: &Ruleset,
    rng: &mut impl RollSource,
) {
    refresh_capacities(ch, catalog);
    apply_initial_bonus(ch, ruleset);
    attempt_learn(ch, catalog, rng);
    guarantee_one_per_circle(ch, catalog, rng);
    rebalance(ch, catalog);
    ch.spells.rest_refill();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::alignment::Alignment;
    use crate::player::race::Race;
    use crate::rng::ScriptedRolls;

    fn caster(class: Class, level: i32) -> Character {
        let mut ch = Character::blank("Morra".into());
        ch.race = Race::Human;
        ch.class = class;
        ch.alignment = Alignment::Good;
        ch.attrs = Race::Human.base_attributes();
        ch.level = level;
        ch.max_level = level;
        ch
    }

    #[test]
    fn test_capacity_pure_casters() {
        assert_eq!(capacity_for(Class::Mage, 1, Discipline::Arcane, 1), 1);
        assert_eq!(capacity_for(Class::Mage, 1, Discipline::Arcane, 2), 0);
        assert_eq!(capacity_for(Class::Mage, 13, Discipline::Arcane, 7), 1);
        assert_eq!(capacity_for(Class::Priest, 1, Discipline::Divine, 1), 1);
        assert_eq!(capacity_for(Class::Priest, 1, Discipline::Arcane, 1), 0);
    }

    #[test]
    fn test_capacity_hybrid_casters() {
        // Hybrids unlock their first circle at level mod+1
        assert_eq!(capacity_for(Class::Bishop, 3, Discipline::Divine, 1), 0);
        assert_eq!(capacity_for(Class::Bishop, 4, Discipline::Divine, 1), 1);
        assert_eq!(capacity_for(Class::Samurai, 3, Discipline::Arcane, 1), 0);
        assert_eq!(capacity_for(Class::Samurai, 4, Discipline::Arcane, 1), 1);
        assert_eq!(capacity_for(Class::Lord, 4, Discipline::Divine, 1), 1);
    }

    #[test]
    fn test_capacity_clamped_to_nine()  {
        assert_eq!(capacity_for(Class::Mage, 40, Discipline::Arcane, 1), 9);
        for circle in 1..=NUM_CIRCLES as u8 {
            let cap = capacity_for(Class::Priest, 99, Discipline::Divine, circle);
            assert!((0..=9).contains(&cap));
        }
    }

    #[test]
    fn test_non_casters_have_no_capacity() {
        for circle in 1..=NUM_CIRCLES as u8 {
            for discipline in Discipline::ALL {
                assert_eq!(capacity_for(Class::Fighter, 50, discipline, circle), 0);
                assert_eq!(capacity_for(Class::Thief, 50, discipline, circle), 0);
            }
        }
        assert_eq!(capacity_for(Class::Ninja, 50, Discipline::Arcane, 1), 0);
    }

    #[test]
    fn test_priest_initial_bonus() {
        let catalog = SpellCatalog::standard();
        let mut ch = caster(Class::Priest, 1);
        refresh_capacities(&mut ch, &catalog);
        apply_initial_bonus(&mut ch, &Ruleset::default());
        assert!(ch.spells.capacity(Discipline::Divine, 1) >= 2);
        for circle in 1..=NUM_CIRCLES as u8 {
            assert_eq!(ch.spells.capacity(Discipline::Arcane, circle), 0);
        }
    }

    #[test]
    fn test_strict_ruleset_skips_bonus() {
        let catalog = SpellCatalog::standard();
        let mut ch = caster(Class::Priest, 1);
        refresh_capacities(&mut ch, &catalog);
        let strict = Ruleset {
            strict_spell_points: true,
            ..Ruleset::default()
        };
        apply_initial_bonus(&mut ch, &strict);
        assert_eq!(ch.spells.capacity(Discipline::Divine, 1), 1);
    }

    #[test]
    fn test_attempt_learn_rolls_against_piety() {
        let catalog = SpellCatalog::standard();
        let mut ch = caster(Class::Priest, 1);
        ch.attrs.set(Attribute::Piety, 11);
        refresh_capacities(&mut ch, &catalog);

        // Five divine circle-1 spells: the roll equal to Piety learns,
        // one above does not.
        let mut rolls = ScriptedRolls::new(&[12, 12, 11, 12, 12]);
        assert!(attempt_learn(&mut ch, &catalog, &mut rolls));
        assert_eq!(ch.spells.known_count(), 1);
        let badios = catalog.find("BADIOS").unwrap();
        assert!(ch.spells.is_known(badios));
    }

    #[test]
    fn test_guarantee_backfills_empty_circle() {
        let catalog = SpellCatalog::standard();
        let mut ch = caster(Class::Priest, 1);
        refresh_capacities(&mut ch, &catalog);

        // Coin flip: 2 selects the secondary fallback
        let mut rolls = ScriptedRolls::new(&[2]);
        assert!(guarantee_one_per_circle(&mut ch, &catalog, &mut rolls));
        assert!(ch.spells.is_known(catalog.find("BADIOS").unwrap()));

        // Not empty anymore: nothing further happens, no rolls drawn
        let mut rolls = ScriptedRolls::new(&[]);
        assert!(!guarantee_one_per_circle(&mut ch, &catalog, &mut rolls));
    }

    #[test]
    fn test_guarantee_primary_fallback() {
        let catalog = SpellCatalog::standard();
        let mut ch = caster(Class::Mage, 1);
        refresh_capacities(&mut ch, &catalog);
        let mut rolls = ScriptedRolls::new(&[0]);
        guarantee_one_per_circle(&mut ch, &catalog, &mut rolls);
        assert!(ch.spells.is_known(catalog.find("KATINO").unwrap()));
    }

    #[test]
    fn test_rebalance_respects_unlock_threshold() {
        let catalog = SpellCatalog::standard();
        let mut ch = caster(Class::Mage, 1);
        // Knows a circle-2 spell (say, from a past class) but has never
        // reached level 3
        ch.spells.learn(catalog.find("DILTO").unwrap());
        rebalance(&mut ch, &catalog);
        assert_eq!(ch.spells.capacity(Discipline::Arcane, 2), 0);

        ch.max_level = 3;
        rebalance(&mut ch, &catalog);
        assert_eq!(ch.spells.capacity(Discipline::Arcane, 2), 1);
    }

    #[test]
    fn test_rebalance_never_lowers() {
        let catalog = SpellCatalog::standard();
        let mut ch = caster(Class::Mage, 5);
        ch.spells.set_capacity(Discipline::Arcane, 1, 4);
        rebalance(&mut ch, &catalog);
        assert_eq!(ch.spells.capacity(Discipline::Arcane, 1), 4);
    }

    #[test]
    fn test_rest_refill() {
        let catalog = SpellCatalog::standard();
        let mut ch = caster(Class::Mage, 9);
        refresh_capacities(&mut ch, &catalog);
        assert_eq!(ch.spells.current(Discipline::Arcane, 1), 0);
        ch.spells.rest_refill();
        for circle in 1..=NUM_CIRCLES as u8 {
            assert_eq!(
                ch.spells.current(Discipline::Arcane, circle),
                ch.spells.capacity(Discipline::Arcane, circle)
            );
        }
    }

    #[test]
    fn test_spend_points() {
        let mut ch = caster(Class::Mage, 3);
        ch.spells.set_capacity(Discipline::Arcane, 1, 2);
        ch.spells.rest_refill();
        assert!(ch.spells.spend(Discipline::Arcane, 1));
        assert!(ch.spells.spend(Discipline::Arcane, 1));
        assert!(!ch.spells.spend(Discipline::Arcane, 1));
    }

    #[test]
    fn test_known_never_exceeds_capacity_after_pass() {
        let catalog = SpellCatalog::standard();
        let mut rng = crate::rng::GameRng::new(99);
        for level in 1..=13 {
            let mut ch = caster(Class::Priest, level);
            ch.attrs.set(Attribute::Piety, 18);
            learning_pass(&mut ch, &catalog, &mut rng);
            for circle in 1..=NUM_CIRCLES as u8 {
                let known = ch.spells.known_in_circle(&catalog, Discipline::Divine, circle) as i64;
                let cap = ch.spells.capacity(Discipline::Divine, circle);
                assert!(
                    known <= cap || cap == 0,
                    "level {level} circle {circle}: known {known} > capacity {cap}"
                );
            }
        }
    }
}
