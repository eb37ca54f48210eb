use crate::{GameError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Smallest legal move set (classic rock-paper-scissors)
pub const MIN_MOVES: usize = 3;

/// Ordered, duplicate-free list of moves with odd length >= 3.
///
/// Order defines the circular adjacency used by the resolver, so two sets
/// holding the same names in a different order play differently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct MoveSet {
    moves: Vec<String>,
}

impl MoveSet {
    pub fn new<I, S>(moves: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let moves: Vec<String> = moves.into_iter().map(Into::into).collect();

        if moves.len() < MIN_MOVES {
            return Err(GameError::invalid_move_set(format!(
                "need at least {} moves, got {}",
                MIN_MOVES,
                moves.len()
            )));
        }

        if moves.len() % 2 == 0 {
            return Err(GameError::invalid_move_set(format!(
                "need an odd number of moves, got {}",
                moves.len()
            )));
        }

        let mut seen = HashSet::with_capacity(moves.len());
        for name in &moves {
            if name.is_empty() {
                return Err(GameError::invalid_move_set("move names cannot be empty"));
            }
            if !seen.insert(name.as_str()) {
                return Err(GameError::invalid_move_set(format!(
                    "duplicate move '{}'",
                    name
                )));
            }
        }

        Ok(Self { moves })
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Number of moves each move beats (and loses to)
    pub fn half(&self) -> usize {
        self.moves.len() / 2
    }

    /// Position of `name` in the set
    pub fn index_of(&self, name: &str) -> Result<usize> {
        self.moves
            .iter()
            .position(|m| m == name)
            .ok_or_else(|| GameError::move_not_found(name))
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.moves.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.moves.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.moves
    }
}

impl Default for MoveSet {
    fn default() -> Self {
        Self {
            moves: vec!["rock".into(), "paper".into(), "scissors".into()],
        }
    }
}

impl TryFrom<Vec<String>> for MoveSet {
    type Error = GameError;

    fn try_from(moves: Vec<String>) -> Result<Self> {
        Self::new(moves)
    }
}

impl From<MoveSet> for Vec<String> {
    fn from(set: MoveSet) -> Self {
        set.moves
    }
}

impl fmt::Display for MoveSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.moves.join(", "))
    }
}
