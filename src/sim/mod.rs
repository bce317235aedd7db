//! Battle simulation: combatant state, turn resolution, capture.

pub mod battle;
pub mod capture;
pub mod combatant;

pub use battle::{Battle, BattleStatus};
pub use combatant::Combatant;
