//! Keyed store of in-flight battles. External callers interact with the
//! engine only through [`BattleRegistry`].

use crate::data::species::STARTER_KEYS;
use crate::error::BattleError;
use crate::sim::battle::{Battle, BattleStatus};
use crate::sim::capture::{resolve_capture, CaptureOutcome};
use crate::sim::combatant::Combatant;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, TryLockError};
use tracing::{debug, info};
use uuid::Uuid;

/// Wire-facing view of one combatant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CombatantView {
    pub name: String,
    pub max_hp: u16,
    pub current_hp: u16,
    pub attack_modifier: f32,
    pub pokedex_id: u16,
}

impl From<&Combatant> for CombatantView {
    fn from(combatant: &Combatant) -> Self {
        Self {
            name: combatant.name.clone(),
            max_hp: combatant.max_hp,
            current_hp: combatant.current_hp,
            attack_modifier: combatant.attack_modifier,
            pokedex_id: combatant.pokedex_id,
        }
    }
}

/// Authoritative battle state returned from every registry operation.
///
/// `message_log` is the battle-wide running log; `turn_log` is the delta
/// produced by the current call (empty on start and on late calls to a
/// terminal battle).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BattleSnapshot {
    pub battle_id: Uuid,
    pub player: CombatantView,
    pub enemy: CombatantView,
    pub status: BattleStatus,
    pub message_log: Vec<String>,
    pub turn_log: Vec<String>,
}

/// Drop consecutive duplicate lines from a turn's delta log. Two identical
/// "missed" lines from the same actor and move collapse into one.
pub fn collapse_consecutive(lines: &[String]) -> Vec<String> {
    let mut deduped: Vec<String> = Vec::with_capacity(lines.len());
    for line in lines {
        if deduped.last() != Some(line) {
            deduped.push(line.clone());
        }
    }
    deduped
}

/// Explicitly owned, injectable store of in-flight battles.
///
/// The map lock is held only long enough to clone a battle handle, so
/// operations on different battle ids proceed concurrently. Each battle has
/// its own mutex; `submit_turn` takes it with `try_lock` so overlapping
/// submissions for the same battle surface as
/// [`BattleError::TurnInProgress`] instead of queueing. The guard is
/// released on every exit path, including errors.
pub struct BattleRegistry {
    battles: Mutex<HashMap<Uuid, Arc<Mutex<Battle>>>>,
    rng: Mutex<SmallRng>,
}

impl BattleRegistry {
    /// Registry with entropy-seeded randomness.
    pub fn new() -> Self {
        Self {
            battles: Mutex::new(HashMap::new()),
            rng: Mutex::new(SmallRng::from_entropy()),
        }
    }

    /// Registry with deterministic randomness, for tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            battles: Mutex::new(HashMap::new()),
            rng: Mutex::new(SmallRng::seed_from_u64(seed)),
        }
    }

    /// Register a prebuilt battle and return its fresh id.
    pub fn insert(&self, battle: Battle) -> Uuid {
        let battle_id = Uuid::new_v4();
        lock_or_recover(&self.battles).insert(battle_id, Arc::new(Mutex::new(battle)));
        battle_id
    }

    /// Start a new battle for the given player species. The enemy is drawn
    /// uniformly at random from the roster.
    pub fn start(&self, player_key: &str) -> Result<BattleSnapshot, BattleError> {
        let (enemy_key, battle_seed) = {
            let mut rng = lock_or_recover(&self.rng);
            let enemy_key = STARTER_KEYS
                .choose(&mut *rng)
                .copied()
                .unwrap_or("bulbasaur");
            (enemy_key, rng.gen::<u64>())
        };
        let battle = Battle::new(player_key, enemy_key, battle_seed)?;
        let battle_id = Uuid::new_v4();
        let snapshot = snapshot_of(battle_id, &battle, Vec::new());
        lock_or_recover(&self.battles).insert(battle_id, Arc::new(Mutex::new(battle)));
        info!(%battle_id, player = player_key, enemy = enemy_key, "battle started");
        Ok(snapshot)
    }

    /// Resolve one turn. The enemy's move is chosen uniformly at random
    /// from its move set; the returned snapshot carries the deduplicated
    /// delta log for this turn.
    ///
    /// A terminal battle is not re-simulated: late calls return the current
    /// state with an empty `turn_log`, any number of times.
    pub fn submit_turn(
        &self,
        battle_id: Uuid,
        player_move_key: &str,
    ) -> Result<BattleSnapshot, BattleError> {
        let handle = self.handle(battle_id)?;
        let mut battle = match handle.try_lock() {
            Ok(guard) => guard,
            Err(TryLockError::WouldBlock) => return Err(BattleError::TurnInProgress),
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
        };

        if battle.is_terminal() {
            return Ok(snapshot_of(battle_id, &battle, Vec::new()));
        }

        let before_len = battle.log.len();
        let enemy_move = battle.pick_enemy_move();
        battle.take_turn(player_move_key, &enemy_move)?;
        let turn_log = collapse_consecutive(&battle.log[before_len..]);
        let snapshot = snapshot_of(battle_id, &battle, turn_log);
        debug!(%battle_id, status = ?snapshot.status, "turn resolved");
        Ok(snapshot)
    }

    /// Resolve the single post-win capture attempt for this battle.
    pub fn capture(&self, battle_id: Uuid) -> Result<CaptureOutcome, BattleError> {
        let handle = self.handle(battle_id)?;
        let mut battle = lock_or_recover(&handle);
        let outcome = resolve_capture(&mut battle)?;
        info!(%battle_id, success = outcome.success, "capture resolved");
        Ok(outcome)
    }

    /// Evict a battle once the caller is done with its terminal state.
    ///
    /// Terminal battles are kept addressable until this is called so that
    /// late turn submissions stay idempotent and repeated capture attempts
    /// can be rejected with the right error.
    pub fn retire(&self, battle_id: Uuid) -> bool {
        let removed = lock_or_recover(&self.battles).remove(&battle_id).is_some();
        if removed {
            debug!(%battle_id, "battle retired");
        }
        removed
    }

    pub fn contains(&self, battle_id: Uuid) -> bool {
        lock_or_recover(&self.battles).contains_key(&battle_id)
    }

    pub fn len(&self) -> usize {
        lock_or_recover(&self.battles).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn handle(&self, battle_id: Uuid) -> Result<Arc<Mutex<Battle>>, BattleError> {
        lock_or_recover(&self.battles)
            .get(&battle_id)
            .cloned()
            .ok_or(BattleError::BattleNotFound)
    }
}

impl Default for BattleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// A poisoned lock only means some earlier caller panicked mid-operation;
// the data is still structurally valid, so recover rather than propagate.
fn lock_or_recover<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn snapshot_of(battle_id: Uuid, battle: &Battle, turn_log: Vec<String>) -> BattleSnapshot {
    BattleSnapshot {
        battle_id,
        player: CombatantView::from(&battle.player),
        enemy: CombatantView::from(&battle.enemy),
        status: battle.result(),
        message_log: battle.log.clone(),
        turn_log,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn collapse_drops_consecutive_duplicates_only() {
        let log = lines(&[
            "Charmander's Tackle missed!",
            "Charmander's Tackle missed!",
            "Charmander used Tackle! Charmander took 5 damage.",
            "Charmander's Tackle missed!",
        ]);
        assert_eq!(
            collapse_consecutive(&log),
            lines(&[
                "Charmander's Tackle missed!",
                "Charmander used Tackle! Charmander took 5 damage.",
                "Charmander's Tackle missed!",
            ])
        );
    }

    #[test]
    fn overlapping_submission_is_rejected_not_queued() {
        let registry = BattleRegistry::with_seed(9);
        let started = registry.start("bulbasaur").expect("starter exists");
        let handle = registry.handle(started.battle_id).expect("battle registered");
        let _in_flight = handle.try_lock().expect("no other holder");
        assert_eq!(
            registry.submit_turn(started.battle_id, "tackle"),
            Err(BattleError::TurnInProgress)
        );
        drop(_in_flight);
        // Guard released; the next submission goes through.
        assert!(registry.submit_turn(started.battle_id, "tackle").is_ok());
    }

    #[test]
    fn collapse_keeps_empty_and_singleton_logs() {
        assert!(collapse_consecutive(&[]).is_empty());
        let single = lines(&["Bulbasaur used Growl! Charmander's attack fell."]);
        assert_eq!(collapse_consecutive(&single), single);
    }
}
