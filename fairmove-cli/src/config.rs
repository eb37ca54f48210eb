use anyhow::Context;
use fairmove_core::commitment::MIN_KEY_LEN;
use fairmove_core::{GameConfig, MoveSet};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub default_moves: Vec<String>,
    pub key_len: usize,
    pub verbose: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            default_moves: vec!["rock".into(), "paper".into(), "scissors".into()],
            key_len: MIN_KEY_LEN,
            verbose: false,
        }
    }
}

impl CliConfig {
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("fairmove")
            .join("config.json")
    }

    /// Read the config at `path`, or the default location when `path` is None.
    ///
    /// A missing file at the default location yields defaults; a missing file
    /// the user named explicitly is an error.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (Self::default_path(), false),
        };

        if !explicit && !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("invalid config {}", path.display()))?;

        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Game settings for a round; `moves` from the command line win over the config
    pub fn game_config(&self, moves: Vec<String>) -> fairmove_core::Result<GameConfig> {
        let moves = if moves.is_empty() {
            self.default_moves.clone()
        } else {
            moves
        };

        let config = GameConfig::new(MoveSet::new(moves)?).with_key_len(self.key_len);
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fairmove_core::GameError;
    use std::io::Write;

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"default_moves": ["a", "b", "c", "d", "e"], "verbose": true}}"#
        )
        .unwrap();

        let config = CliConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.default_moves.len(), 5);
        assert!(config.verbose);
        assert_eq!(config.key_len, MIN_KEY_LEN);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        assert!(CliConfig::load(Some(path.as_path())).is_err());
    }

    #[test]
    fn test_malformed_file_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(CliConfig::load(Some(file.path())).is_err());
    }

    #[test]
    fn test_command_line_moves_override_defaults() {
        let config = CliConfig::default();

        let game = config.game_config(vec![]).unwrap();
        assert_eq!(game.moves, MoveSet::default());

        let game = config
            .game_config(vec!["x".into(), "y".into(), "z".into()])
            .unwrap();
        assert_eq!(game.moves.get(0), Some("x"));
    }

    #[test]
    fn test_invalid_moves_rejected() {
        let config = CliConfig::default();
        let result = config.game_config(vec!["a".into(), "b".into()]);
        assert!(matches!(result, Err(GameError::InvalidMoveSet(_))));
    }

    #[test]
    fn test_oversized_key_in_file_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"key_len": 18446744073709551615}}"#).unwrap();

        let config = CliConfig::load(Some(file.path())).unwrap();
        assert!(matches!(
            config.game_config(vec![]),
            Err(GameError::Config(_))
        ));
    }

    #[test]
    fn test_short_key_rejected() {
        let config = CliConfig {
            key_len: 4,
            ..CliConfig::default()
        };
        assert!(matches!(
            config.game_config(vec![]),
            Err(GameError::Config(_))
        ));
    }
}
