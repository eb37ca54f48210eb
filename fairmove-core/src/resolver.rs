//! Winner resolution by circular distance.
//!
//! Moves sit on a circle in `MoveSet` order. The `half = N / 2` moves that
//! follow a move clockwise beat it; the `half` moves before it lose to it.
//! With `[rock, paper, scissors]` that is paper beats rock, scissors beats
//! paper and rock beats scissors. Nothing depends on move names.

use crate::{MoveSet, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of a match, always from the first move's point of view
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Draw,
    Win,
    Lose,
}

impl Outcome {
    /// The same match seen from the other side
    pub fn reverse(self) -> Self {
        match self {
            Outcome::Draw => Outcome::Draw,
            Outcome::Win => Outcome::Lose,
            Outcome::Lose => Outcome::Win,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Outcome::Draw => "Draw",
            Outcome::Win => "Win",
            Outcome::Lose => "Lose",
        };
        f.write_str(s)
    }
}

/// Outcome for the move at `i` against the move at `j` on a circle of `n`.
///
/// Callers guarantee `i, j < n` and `n` odd.
pub fn resolve_index(i: usize, j: usize, n: usize) -> Outcome {
    debug_assert!(i < n && j < n && n % 2 == 1);

    if i == j {
        return Outcome::Draw;
    }

    // clockwise steps from i to j, in 1..n
    let distance = (j + n - i) % n;
    if distance <= n / 2 {
        Outcome::Lose
    } else {
        Outcome::Win
    }
}

/// Outcome for `move_a` against `move_b` from `move_a`'s perspective
pub fn resolve(move_a: &str, move_b: &str, moves: &MoveSet) -> Result<Outcome> {
    let i = moves.index_of(move_a)?;
    let j = moves.index_of(move_b)?;
    Ok(resolve_index(i, j, moves.len()))
}

/// N x N matrix of outcomes; cell `(r, c)` is row move against column move
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeTable {
    moves: Vec<String>,
    cells: Vec<Outcome>,
}

impl OutcomeTable {
    pub fn build(moves: &MoveSet) -> Self {
        let n = moves.len();
        let cells = (0..n)
            .flat_map(|r| (0..n).map(move |c| resolve_index(r, c, n)))
            .collect();

        Self {
            moves: moves.as_slice().to_vec(),
            cells,
        }
    }

    pub fn size(&self) -> usize {
        self.moves.len()
    }

    pub fn moves(&self) -> &[String] {
        &self.moves
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Outcome> {
        let n = self.size();
        if row >= n || col >= n {
            return None;
        }
        Some(self.cells[row * n + col])
    }

    /// Rows as `(move, outcomes against every column move)`
    pub fn rows(&self) -> impl Iterator<Item = (&str, &[Outcome])> {
        self.moves
            .iter()
            .map(String::as_str)
            .zip(self.cells.chunks(self.size()))
    }
}
