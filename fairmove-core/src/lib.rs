//! Provably fair rock-paper-scissors over any odd number of moves
//!
//! The computer picks its move first and publishes an HMAC-SHA3-256 digest of
//! it. The human then moves, the winner is resolved by circular distance, and
//! the HMAC key is revealed so the human can check the computer did not cheat.

pub mod commitment;
pub mod config;
pub mod error;
pub mod moves;
pub mod resolver;
pub mod session;

pub use commitment::{
    commit, generate_key, verify, Commitment, CommitmentScheme, HmacDigest, HmacSha3, SecretKey,
};
pub use config::GameConfig;
pub use error::{GameError, Result};
pub use moves::MoveSet;
pub use resolver::{resolve, Outcome, OutcomeTable};
pub use session::{AbortReason, GameSession, Response, RoundResult, Selection, SessionState};

/// Start a session for one round with the OS random source
pub fn new_session(config: GameConfig) -> Result<GameSession> {
    GameSession::new(config)
}
