use thiserror::Error;

pub type Result<T> = std::result::Result<T, GameError>;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Invalid move set: {0}")]
    InvalidMoveSet(String),

    #[error("Move not found: {0}")]
    MoveNotFound(String),

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Invalid session state: {0}")]
    InvalidState(String),

    #[error("Cryptographic error: {0}")]
    Crypto(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl GameError {
    pub fn invalid_move_set(msg: impl Into<String>) -> Self {
        Self::InvalidMoveSet(msg.into())
    }

    pub fn move_not_found(name: impl Into<String>) -> Self {
        Self::MoveNotFound(name.into())
    }

    pub fn invalid_selection(msg: impl Into<String>) -> Self {
        Self::InvalidSelection(msg.into())
    }

    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    pub fn crypto(msg: impl Into<String>) -> Self {
        Self::Crypto(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
