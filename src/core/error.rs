//! Error types shared across the crate.

use thiserror::Error;

/// Navigation errors. An unknown screen name is a programming error; the
/// binary treats it as fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScreenError {
    #[error("screen \"{0}\" is not registered")]
    UnknownScreen(String),
}

/// Reasons a battle session cannot start. All of them are recoverable: the
/// host aborts the session and redirects to stage selection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleError {
    #[error("stage \"{0}\" does not exist")]
    UnknownStage(String),
    #[error("stage \"{0}\" has no kanji to challenge")]
    EmptyChallengePool(String),
    #[error("stage \"{0}\" has no enemies")]
    NoEnemies(String),
}

/// Problems loading a stage catalog.
#[derive(Debug, Error)]
pub enum StageDataError {
    #[error("failed to read stage catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed stage catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("stage \"{stage}\" references unknown {kind} \"{id}\"")]
    UnknownReference {
        stage: String,
        kind: &'static str,
        id: String,
    },
    #[error("duplicate {kind} id \"{id}\"")]
    DuplicateId { kind: &'static str, id: String },
}
