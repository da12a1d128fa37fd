//! Temple restoration: probability-driven recovery from death,
//! petrification and paralysis.

use crate::player::abilities::Ability;
use crate::player::character::{Character, Location};
use crate::player::status::Status;
use crate::rng::RollSource;

/// Result of a restoration attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// Nothing to lift: the character is fine, or beyond help
    NotNeeded,
    /// The payer cannot cover the donation
    InsufficientGold,
    /// Condition lifted
    Recovered,
    /// The ritual failed and the condition worsened
    Failed,
}

/// Attempt to lift the character's condition. The donation is
/// `cost-per-tier * level`, paid by an external actor (usually a party
/// mate's purse). Failure from Dead leaves Ashes; failure from Ashes
/// loses the character for good.
pub fn attempt(
    ch: &mut Character,
    payer_gold: &mut i64,
    rng: &mut impl RollSource,
) -> RestoreOutcome {
    let status = ch.status;
    let cost_per_level = status.restoration_cost_per_level();
    if cost_per_level == 0 || status.is_terminal() {
        return RestoreOutcome::NotNeeded;
    }

    let cost = cost_per_level * ch.level as i64;
    if *payer_gold < cost {
        return RestoreOutcome::InsufficientGold;
    }
    *payer_gold -= cost;

    // Held and Stoned always come back once paid for; Dead and Ashes
    // roll against the derived chance.
    let chance = match status {
        Status::Dead => ch.abilities[Ability::ResurrectDead],
        Status::Ashes => ch.abilities[Ability::ResurrectAshes],
        _ => 100,
    };

    if (rng.rn2(100) as i64) < chance {
        ch.status.escalate_to(Status::Ok);
        if matches!(status, Status::Dead | Status::Ashes) {
            ch.abilities[Ability::Hp] = 1;
        }
        ch.location = Location::Temple;
        RestoreOutcome::Recovered
    } else {
        match status {
            Status::Dead => {
                ch.status.escalate_to(Status::Ashes);
            }
            Status::Ashes => {
                ch.status.escalate_to(Status::Lost);
                ch.abilities[Ability::Hp] = 0;
                ch.location = Location::Morgue;
            }
            _ => {}
        }
        RestoreOutcome::Failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::alignment::Alignment;
    use crate::player::class::Class;
    use crate::player::race::Race;
    use crate::rng::ScriptedRolls;

    fn corpse(status: Status, level: i32) -> Character {
        let mut ch = Character::blank("Aldric".into());
        ch.race = Race::Human;
        ch.class = Class::Fighter;
        ch.alignment = Alignment::Good;
        ch.attrs = Race::Human.base_attributes();
        ch.level = level;
        ch.max_level = level;
        ch.abilities[Ability::MaxHp] = 20;
        ch.abilities[Ability::ResurrectDead] = 60;
        ch.abilities[Ability::ResurrectAshes] = 50;
        ch.status.escalate_to(status);
        ch
    }

    #[test]
    fn test_roll_boundary_at_chance() {
        // Chance 60: a roll of 59 succeeds
        let mut ch = corpse(Status::Dead, 2);
        let mut gold = 1000;
        let mut rolls = ScriptedRolls::new(&[59]);
        assert_eq!(attempt(&mut ch, &mut gold, &mut rolls), RestoreOutcome::Recovered);
        assert_eq!(ch.status, Status::Ok);
        assert_eq!(ch.hp(), 1);
        assert_eq!(ch.location, Location::Temple);
        assert_eq!(gold, 1000 - 250 * 2);

        // ... and a roll of 60 fails to Ashes
        let mut ch = corpse(Status::Dead, 2);
        let mut gold = 1000;
        let mut rolls = ScriptedRolls::new(&[60]);
        assert_eq!(attempt(&mut ch, &mut gold, &mut rolls), RestoreOutcome::Failed);
        assert_eq!(ch.status, Status::Ashes);
    }

    #[test]
    fn test_ashes_failure_is_final() {
        let mut ch = corpse(Status::Ashes, 1);
        let mut gold = 1000;
        let mut rolls = ScriptedRolls::new(&[99]);
        assert_eq!(attempt(&mut ch, &mut gold, &mut rolls), RestoreOutcome::Failed);
        assert_eq!(ch.status, Status::Lost);
        assert_eq!(ch.hp(), 0);
        assert_eq!(ch.location, Location::Morgue);
        assert_eq!(gold, 1000 - 500);
    }

    #[test]
    fn test_held_always_recovers_once_paid() {
        let mut ch = corpse(Status::Held, 3);
        ch.abilities[Ability::Hp] = 12;
        let mut gold = 1000;
        let mut rolls = ScriptedRolls::new(&[99]);
        assert_eq!(attempt(&mut ch, &mut gold, &mut rolls), RestoreOutcome::Recovered);
        assert_eq!(ch.status, Status::Ok);
        // Paralysis recovery keeps the hit points it had
        assert_eq!(ch.hp(), 12);
        assert_eq!(gold, 1000 - 100 * 3);
    }

    #[test]
    fn test_insufficient_gold() {
        let mut ch = corpse(Status::Dead, 10);
        let mut gold = 100;
        let mut rolls = ScriptedRolls::new(&[]);
        assert_eq!(
            attempt(&mut ch, &mut gold, &mut rolls),
            RestoreOutcome::InsufficientGold
        );
        assert_eq!(gold, 100);
        assert_eq!(ch.status, Status::Dead);
    }

    #[test]
    fn test_nothing_to_lift() {
        let mut gold = 1000;
        let mut rolls = ScriptedRolls::new(&[]);

        let mut ch = corpse(Status::Ok, 1);
        assert_eq!(attempt(&mut ch, &mut gold, &mut rolls), RestoreOutcome::NotNeeded);

        let mut lost = corpse(Status::Lost, 1);
        assert_eq!(attempt(&mut lost, &mut gold, &mut rolls), RestoreOutcome::NotNeeded);
        assert_eq!(gold, 1000);
    }
}
