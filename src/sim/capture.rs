use crate::error::BattleError;
use crate::sim::battle::{Battle, BattleStatus};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Creature record handed to the caller on a successful capture, suitable
/// for adding to a party collection. Capture heals to full HP.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedCreature {
    pub key: String,
    pub name: String,
    pub pokedex_id: u16,
    pub level: u8,
    pub max_hp: u16,
    pub current_hp: u16,
    pub moves: Vec<String>,
}

/// Outcome of a capture attempt. `captured` is present only on success.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureOutcome {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captured: Option<CapturedCreature>,
}

/// Capture success probability in percent: 35 base plus up to 55 for
/// missing HP, capped at 95.
pub fn capture_chance(current_hp: u16, max_hp: u16) -> u8 {
    let max_hp = max_hp.max(1);
    let missing_ratio = (1.0 - current_hp as f32 / max_hp as f32).clamp(0.0, 1.0);
    let chance = 35 + (missing_ratio * 55.0) as u8;
    chance.min(95)
}

/// Resolve the single capture attempt allowed after a win.
///
/// The battle's capture flag is set regardless of outcome, so a second
/// attempt always fails with [`BattleError::CaptureAlreadyResolved`].
pub fn resolve_capture(battle: &mut Battle) -> Result<CaptureOutcome, BattleError> {
    if battle.result() != BattleStatus::Win {
        return Err(BattleError::CaptureNotAllowed);
    }
    if battle.capture_resolved {
        return Err(BattleError::CaptureAlreadyResolved);
    }

    let chance = capture_chance(battle.enemy.current_hp, battle.enemy.max_hp);
    let roll: u8 = battle.rng_mut().gen_range(1..=100);
    let success = roll <= chance;
    battle.capture_resolved = true;

    if success {
        let enemy = &battle.enemy;
        let captured = CapturedCreature {
            key: enemy.species_key.clone(),
            name: enemy.name.clone(),
            pokedex_id: enemy.pokedex_id,
            level: enemy.level,
            max_hp: enemy.max_hp,
            current_hp: enemy.max_hp,
            moves: enemy.moves.clone(),
        };
        Ok(CaptureOutcome {
            success: true,
            message: format!("Gotcha! {} was caught!", captured.name),
            captured: Some(captured),
        })
    } else {
        Ok(CaptureOutcome {
            success: false,
            message: "Oh no! The Pokemon broke free!".to_string(),
            captured: None,
        })
    }
}
