use crate::commitment::{MAX_KEY_LEN, MIN_KEY_LEN};
use crate::error::{GameError, Result};
use crate::MoveSet;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub moves: MoveSet,
    /// Commitment key length in bytes
    #[serde(default = "default_key_len")]
    pub key_len: usize,
}

fn default_key_len() -> usize {
    MIN_KEY_LEN
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            moves: MoveSet::default(),
            key_len: MIN_KEY_LEN,
        }
    }
}

impl GameConfig {
    pub fn new(moves: MoveSet) -> Self {
        Self {
            moves,
            ..Self::default()
        }
    }

    pub fn with_key_len(mut self, key_len: usize) -> Self {
        self.key_len = key_len;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.key_len < MIN_KEY_LEN {
            return Err(GameError::config(format!(
                "Key length must be at least {} bytes, got {}",
                MIN_KEY_LEN, self.key_len
            )));
        }

        if self.key_len > MAX_KEY_LEN {
            return Err(GameError::config(format!(
                "Key length must be at most {} bytes, got {}",
                MAX_KEY_LEN, self.key_len
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.moves.len(), 3);
        assert_eq!(config.key_len, 32);
    }

    #[test]
    fn test_short_key_rejected() {
        let config = GameConfig::default().with_key_len(16);
        assert!(matches!(config.validate(), Err(GameError::Config(_))));
    }

    #[test]
    fn test_oversized_key_rejected() {
        let config = GameConfig::default().with_key_len(usize::MAX);
        assert!(matches!(config.validate(), Err(GameError::Config(_))));

        let config = GameConfig::default().with_key_len(MAX_KEY_LEN + 1);
        assert!(config.validate().is_err());

        let config = GameConfig::default().with_key_len(MAX_KEY_LEN);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_with_default_key_len() {
        let config: GameConfig =
            serde_json::from_str(r#"{"moves": ["a", "b", "c", "d", "e"]}"#).unwrap();
        assert_eq!(config.moves.len(), 5);
        assert_eq!(config.key_len, MIN_KEY_LEN);
    }

    #[test]
    fn test_deserialize_rejects_invalid_moves() {
        let result = serde_json::from_str::<GameConfig>(r#"{"moves": ["a", "a", "b"]}"#);
        assert!(result.is_err());
    }
}
