use crate::commitment::{Commitment, HmacDigest, SecretKey};
use crate::resolver::{resolve_index, Outcome, OutcomeTable};
use crate::{GameConfig, GameError, MoveSet, Result};
use rand::rngs::OsRng;
use rand::{CryptoRng, Rng, RngCore};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const HELP_MARKER: &str = "?";
pub const EXIT_MARKER: &str = "0";

/// Session lifecycle. A session plays exactly one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Idle,
    Committed,
    Resolved,
    Closed,
}

/// What the human typed, once parsed against the move set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Help,
    Exit,
    /// Zero-based index into the move set
    Move(usize),
}

impl Selection {
    /// `?` asks for help, `0` exits, `1..=N` picks a move (1-based).
    pub fn parse(input: &str, moves: &MoveSet) -> Result<Self> {
        let input = input.trim();

        if input == HELP_MARKER {
            return Ok(Selection::Help);
        }
        if input == EXIT_MARKER {
            return Ok(Selection::Exit);
        }

        let number: usize = input
            .parse()
            .map_err(|_| GameError::invalid_selection(format!("'{}' is not a number", input)))?;

        if number == 0 || number > moves.len() {
            return Err(GameError::invalid_selection(format!(
                "{} is outside 1..={}",
                number,
                moves.len()
            )));
        }

        Ok(Selection::Move(number - 1))
    }
}

/// Why a round ended without being resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbortReason {
    Exit,
    InvalidSelection(String),
}

/// A resolved round. Outcome is from the human's side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub human_move: String,
    pub computer_move: String,
    pub outcome: Outcome,
}

/// Session response to the human's single input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Round resolved; call `reveal` to close the session
    Resolved(RoundResult),
    /// Help requested; session closed without resolving
    Help(OutcomeTable),
    /// Exit or bad input; session closed, key discarded
    Aborted(AbortReason),
}

pub struct GameSession<R: RngCore + CryptoRng = OsRng> {
    id: Uuid,
    config: GameConfig,
    rng: R,
    state: SessionState,
    computer_move: Option<usize>,
    commitment: Option<Commitment>,
}

impl GameSession<OsRng> {
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_rng(config, OsRng)
    }
}

impl<R: RngCore + CryptoRng> GameSession<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            id: Uuid::new_v4(),
            config,
            rng,
            state: SessionState::Idle,
            computer_move: None,
            commitment: None,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn moves(&self) -> &MoveSet {
        &self.config.moves
    }

    /// Published digest, available from `Committed` until the key is revealed
    pub fn digest(&self) -> Option<&HmacDigest> {
        self.commitment.as_ref().map(Commitment::digest)
    }

    /// Pick the computer's move and commit to it
    pub fn commit(&mut self) -> Result<HmacDigest> {
        if self.state != SessionState::Idle {
            return Err(GameError::invalid_state(format!(
                "cannot commit in state {:?}",
                self.state
            )));
        }

        let moves = &self.config.moves;
        let index = self.rng.gen_range(0..moves.len());
        let chosen = moves
            .get(index)
            .ok_or_else(|| GameError::move_not_found(format!("index {}", index)))?;

        let commitment = Commitment::create(&mut self.rng, self.config.key_len, chosen)?;
        let digest = *commitment.digest();
        let created_at = commitment.created_at();

        self.computer_move = Some(index);
        self.commitment = Some(commitment);
        self.state = SessionState::Committed;

        tracing::info!("Session {} committed", self.id);
        tracing::debug!("Session {} digest {} at {}", self.id, digest, created_at);
        Ok(digest)
    }

    /// Feed the human's one line of input
    pub fn submit(&mut self, input: &str) -> Result<Response> {
        if self.state != SessionState::Committed {
            return Err(GameError::invalid_state(format!(
                "cannot accept input in state {:?}",
                self.state
            )));
        }

        let selection = match Selection::parse(input, &self.config.moves) {
            Ok(selection) => selection,
            Err(GameError::InvalidSelection(msg)) => {
                tracing::warn!("Session {} aborted: {}", self.id, msg);
                self.close();
                return Ok(Response::Aborted(AbortReason::InvalidSelection(msg)));
            }
            Err(e) => return Err(e),
        };

        match selection {
            Selection::Exit => {
                tracing::warn!("Session {} aborted: exit requested", self.id);
                self.close();
                Ok(Response::Aborted(AbortReason::Exit))
            }
            Selection::Help => {
                tracing::info!("Session {} closed after help", self.id);
                let table = OutcomeTable::build(&self.config.moves);
                self.close();
                Ok(Response::Help(table))
            }
            Selection::Move(human) => {
                let computer = self.computer_move.ok_or_else(|| {
                    GameError::invalid_state("committed session has no computer move")
                })?;
                let result = self.resolve_round(human, computer)?;
                self.state = SessionState::Resolved;

                tracing::info!(
                    "Session {} resolved: {} vs {} -> {}",
                    self.id,
                    result.human_move,
                    result.computer_move,
                    result.outcome
                );
                Ok(Response::Resolved(result))
            }
        }
    }

    /// Hand over the key once the round is resolved, closing the session
    pub fn reveal(&mut self) -> Result<SecretKey> {
        if self.state != SessionState::Resolved {
            return Err(GameError::invalid_state(format!(
                "cannot reveal in state {:?}",
                self.state
            )));
        }

        let commitment = self
            .commitment
            .take()
            .ok_or_else(|| GameError::invalid_state("resolved session has no commitment"))?;

        self.state = SessionState::Closed;
        tracing::info!("Session {} revealed key", self.id);
        Ok(commitment.reveal())
    }

    fn resolve_round(&self, human: usize, computer: usize) -> Result<RoundResult> {
        let moves = &self.config.moves;
        let name = |index: usize| {
            moves
                .get(index)
                .map(str::to_string)
                .ok_or_else(|| GameError::move_not_found(format!("index {}", index)))
        };

        Ok(RoundResult {
            human_move: name(human)?,
            computer_move: name(computer)?,
            outcome: resolve_index(human, computer, moves.len()),
        })
    }

    fn close(&mut self) {
        self.commitment = None;
        self.computer_move = None;
        self.state = SessionState::Closed;
    }
}

impl<R: RngCore + CryptoRng> std::fmt::Debug for GameSession<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("moves", &self.config.moves)
            .field("has_commitment", &self.commitment.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commitment::verify;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn session(seed: u64) -> GameSession<StdRng> {
        GameSession::with_rng(GameConfig::default(), StdRng::seed_from_u64(seed)).unwrap()
    }

    #[test]
    fn test_parse_selection() {
        let moves = MoveSet::default();

        assert_eq!(Selection::parse("?", &moves).unwrap(), Selection::Help);
        assert_eq!(Selection::parse("0", &moves).unwrap(), Selection::Exit);
        assert_eq!(Selection::parse("1", &moves).unwrap(), Selection::Move(0));
        assert_eq!(Selection::parse(" 3\n", &moves).unwrap(), Selection::Move(2));

        for bad in ["4", "-1", "rock", "", "1.5", "??"] {
            assert!(
                matches!(
                    Selection::parse(bad, &moves),
                    Err(GameError::InvalidSelection(_))
                ),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_full_round() {
        let mut session = session(1);
        assert_eq!(session.state(), SessionState::Idle);

        let digest = session.commit().unwrap();
        assert_eq!(session.state(), SessionState::Committed);
        assert_eq!(session.digest(), Some(&digest));

        let result = match session.submit("1").unwrap() {
            Response::Resolved(result) => result,
            other => panic!("unexpected response: {:?}", other),
        };
        assert_eq!(session.state(), SessionState::Resolved);
        assert_eq!(result.human_move, "rock");

        let moves = session.moves().clone();
        let expected = crate::resolve("rock", &result.computer_move, &moves).unwrap();
        assert_eq!(result.outcome, expected);

        let key = session.reveal().unwrap();
        assert_eq!(session.state(), SessionState::Closed);
        assert!(verify(&key, &result.computer_move, &digest));
        assert!(session.digest().is_none());
    }

    #[test]
    fn test_exit_closes_without_reveal() {
        let mut session = session(2);
        session.commit().unwrap();

        assert_eq!(
            session.submit("0").unwrap(),
            Response::Aborted(AbortReason::Exit)
        );
        assert_eq!(session.state(), SessionState::Closed);
        assert!(matches!(
            session.reveal(),
            Err(GameError::InvalidState(_))
        ));
    }

    #[test]
    fn test_invalid_input_closes_without_reveal() {
        let mut session = session(3);
        session.commit().unwrap();

        let response = session.submit("banana").unwrap();
        assert!(matches!(
            response,
            Response::Aborted(AbortReason::InvalidSelection(_))
        ));
        assert_eq!(session.state(), SessionState::Closed);
        assert!(session.reveal().is_err());
    }

    #[test]
    fn test_help_closes_without_resolving() {
        let mut session = session(4);
        session.commit().unwrap();

        let table = match session.submit("?").unwrap() {
            Response::Help(table) => table,
            other => panic!("unexpected response: {:?}", other),
        };
        assert_eq!(table.size(), 3);
        assert_eq!(session.state(), SessionState::Closed);
        assert!(session.reveal().is_err());
    }

    #[test]
    fn test_out_of_order_calls_rejected() {
        let mut session = session(5);

        assert!(matches!(
            session.submit("1"),
            Err(GameError::InvalidState(_))
        ));
        assert!(session.reveal().is_err());

        session.commit().unwrap();
        assert!(session.commit().is_err());
        assert!(session.reveal().is_err());

        session.submit("2").unwrap();
        assert!(session.submit("2").is_err());
    }

    #[test]
    fn test_short_key_config_rejected() {
        let config = GameConfig::default().with_key_len(8);
        assert!(matches!(
            GameSession::new(config),
            Err(GameError::Config(_))
        ));
    }

    #[test]
    fn test_oversized_key_config_rejected_before_commit() {
        let config = GameConfig::default().with_key_len(usize::MAX);
        assert!(matches!(
            GameSession::new(config),
            Err(GameError::Config(_))
        ));
    }

    #[test]
    fn test_computer_picks_every_move() {
        let mut seen = std::collections::HashSet::new();
        for seed in 0..200 {
            let mut session = session(seed);
            session.commit().unwrap();
            if let Response::Resolved(result) = session.submit("1").unwrap() {
                seen.insert(result.computer_move);
            }
        }
        assert_eq!(seen.len(), 3);
    }
}
