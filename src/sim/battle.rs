use crate::data::moves::{get_move, MoveCategory, MoveData};
use crate::error::BattleError;
use crate::sim::combatant::Combatant;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Terminal status of a battle, checked enemy-first: a simultaneous faint
/// counts as a win.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BattleStatus {
    Ongoing,
    Win,
    Lose,
}

/// One player-vs-enemy battle session.
///
/// Owns both combatants, the append-only message log, and its own RNG so
/// that accuracy rolls and enemy move choices are reproducible under a
/// seeded registry. Mutual exclusion between overlapping turn submissions
/// is the registry's responsibility, not the battle's.
#[derive(Clone, Debug)]
pub struct Battle {
    pub player: Combatant,
    pub enemy: Combatant,
    pub log: Vec<String>,
    pub capture_resolved: bool,
    rng: SmallRng,
}

/// Simplified physical damage calculation: no STAB, no type chart, no
/// critical hits, no random variance. Truncates toward zero.
pub fn calculate_damage(attacker: &Combatant, defender: &Combatant, move_data: &MoveData) -> u16 {
    if move_data.power == 0 {
        return 0;
    }
    let effective_attack = attacker.attack as f32 * attacker.attack_modifier;
    // Defense floor of 1 prevents division by zero.
    let effective_defense = defender.defense.max(1) as f32;
    let level_term = 2.0 * attacker.level as f32 / 5.0 * 2.0;
    let raw = (level_term * move_data.power as f32 * (effective_attack / effective_defense)) / 50.0
        + 2.0;
    raw as u16
}

impl Battle {
    /// Create a battle from two roster keys with a fresh RNG seed.
    pub fn new(player_key: &str, enemy_key: &str, seed: u64) -> Result<Self, BattleError> {
        let player = Combatant::from_species(player_key)?;
        let enemy = Combatant::from_species(enemy_key)?;
        Ok(Self::from_combatants(player, enemy, seed))
    }

    /// Create a battle from prebuilt combatants.
    pub fn from_combatants(player: Combatant, enemy: Combatant, seed: u64) -> Self {
        Self {
            player,
            enemy,
            log: Vec::new(),
            capture_resolved: false,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Pick the enemy's move uniformly at random from its known move set.
    pub fn pick_enemy_move(&mut self) -> String {
        self.enemy
            .moves
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or_else(|| "tackle".to_string())
    }

    /// Resolve one turn of combat.
    ///
    /// The combatant with strictly greater speed acts first; the player wins
    /// ties. Each action skips entirely if either side is already fainted,
    /// rolls accuracy, then applies damage or the Growl debuff. All messages
    /// append to the battle-wide log.
    ///
    /// Both move keys are resolved before any mutation, so an unknown key
    /// leaves the battle untouched.
    pub fn take_turn(
        &mut self,
        player_move_key: &str,
        enemy_move_key: &str,
    ) -> Result<(), BattleError> {
        let player_move = get_move(player_move_key)
            .ok_or_else(|| BattleError::UnknownMove(player_move_key.to_string()))?;
        let enemy_move = get_move(enemy_move_key)
            .ok_or_else(|| BattleError::UnknownMove(enemy_move_key.to_string()))?;

        let player_first = self.player.speed >= self.enemy.speed;
        let Battle {
            player,
            enemy,
            log,
            rng,
            ..
        } = self;
        if player_first {
            perform_action(player, enemy, player_move, log, rng);
            perform_action(enemy, player, enemy_move, log, rng);
        } else {
            perform_action(enemy, player, enemy_move, log, rng);
            perform_action(player, enemy, player_move, log, rng);
        }
        Ok(())
    }

    /// `Win` if the enemy fainted, `Lose` if the player fainted, else
    /// `Ongoing`. Checked in that order.
    pub fn result(&self) -> BattleStatus {
        if self.enemy.is_fainted() {
            BattleStatus::Win
        } else if self.player.is_fainted() {
            BattleStatus::Lose
        } else {
            BattleStatus::Ongoing
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.result() != BattleStatus::Ongoing
    }

    pub(crate) fn rng_mut(&mut self) -> &mut SmallRng {
        &mut self.rng
    }
}

fn perform_action(
    actor: &mut Combatant,
    target: &mut Combatant,
    move_data: &MoveData,
    log: &mut Vec<String>,
    rng: &mut SmallRng,
) {
    // Covers the case where the first action fainted the second actor.
    if actor.is_fainted() || target.is_fainted() {
        return;
    }

    let roll: u8 = rng.gen_range(1..=100);
    if roll > move_data.accuracy {
        log.push(format!("{}'s {} missed!", actor.name, move_data.name));
        return;
    }

    match move_data.category {
        MoveCategory::Physical => {
            let damage = calculate_damage(actor, target, move_data);
            target.apply_damage(damage);
            log.push(format!(
                "{} used {}! {} took {} damage.",
                actor.name, move_data.name, target.name, damage
            ));
        }
        MoveCategory::Status => {
            // Only Growl has an effect; other status moves resolve silently
            // with no log line (documented scope limitation).
            if move_data.name == "Growl" {
                target.apply_stat_change(move_data.name);
                log.push(format!(
                    "{} used Growl! {}'s attack fell.",
                    actor.name, target.name
                ));
            }
        }
    }
}
