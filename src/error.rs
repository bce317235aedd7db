use thiserror::Error;

/// Every way a registry or battle operation can fail.
///
/// None of these are fatal to the process; the registry and catalogs remain
/// usable after any single failed operation.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum BattleError {
    /// A move key was submitted that is not in the move catalog.
    #[error("unknown move '{0}'")]
    UnknownMove(String),

    /// A species key was submitted that is not in the starter roster.
    #[error("unknown species '{0}'")]
    UnknownSpecies(String),

    /// The battle id is stale or was never issued.
    #[error("battle not found")]
    BattleNotFound,

    /// Another turn resolution holds the battle lock; callers should retry.
    #[error("turn already in progress")]
    TurnInProgress,

    /// Capture was attempted on a battle that is not in a won state.
    #[error("capture allowed only after a win")]
    CaptureNotAllowed,

    /// A capture was already attempted for this battle.
    #[error("capture already resolved")]
    CaptureAlreadyResolved,
}

impl BattleError {
    /// HTTP status code the request-handling layer should surface for this
    /// failure.
    pub fn http_status(&self) -> u16 {
        match self {
            BattleError::UnknownMove(_) | BattleError::UnknownSpecies(_) => 400,
            BattleError::BattleNotFound => 404,
            BattleError::TurnInProgress => 409,
            BattleError::CaptureNotAllowed => 400,
            BattleError::CaptureAlreadyResolved => 409,
        }
    }
}
