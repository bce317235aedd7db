//! Core battle resolution engine for the RogueMon backend.
//!
//! Resolves player-vs-enemy encounters turn by turn and exposes the result as
//! authoritative state plus a human-readable event log for a remote renderer.
//! The main entry point for external callers is [`registry::BattleRegistry`].

pub mod data;
pub mod error;
pub mod registry;
pub mod sim;

/// Commonly used exports for external consumers.
pub mod prelude {
    pub use crate::data::moves::{get_move, MoveCategory, MoveData};
    pub use crate::data::species::{get_species, roster, SpeciesData};
    pub use crate::error::BattleError;
    pub use crate::registry::{BattleRegistry, BattleSnapshot, CombatantView};
    pub use crate::sim::battle::{Battle, BattleStatus};
    pub use crate::sim::capture::{CaptureOutcome, CapturedCreature};
    pub use crate::sim::combatant::Combatant;
}
