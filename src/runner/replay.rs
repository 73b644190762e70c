//! Replay records.
//!
//! A game is fully determined by its roster, its rules and its seed, so a
//! replay stores exactly those. Strategies are looked up again by label when
//! the replay is loaded.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::GameConfig;
use crate::error::ReplayError;
use crate::strategy::Entrant;

/// Everything needed to play a game again.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Replay {
    /// Entrant labels in seating order.
    pub roster: Vec<String>,
    pub seed: u64,
    pub config: GameConfig,
}

impl Replay {
    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ReplayError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode from bincode.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ReplayError> {
        Ok(bincode::deserialize(bytes)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ReplayError> {
        fs::write(path, self.to_bytes()?)?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReplayError> {
        Self::from_bytes(&fs::read(path)?)
    }

    /// Resolve the roster against `registry`, by label.
    pub fn entrants(&self, registry: &[Entrant]) -> Result<Vec<Entrant>, ReplayError> {
        self.roster
            .iter()
            .map(|label| {
                registry
                    .iter()
                    .find(|e| e.label() == label)
                    .cloned()
                    .ok_or_else(|| ReplayError::UnknownEntrant(label.clone()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::builtin;

    fn sample() -> Replay {
        Replay {
            roster: vec!["Chad".into(), "Coward".into(), "Chad".into()],
            seed: 0xDEAD_BEEF,
            config: GameConfig::default().with_starting_stamina(300),
        }
    }

    #[test]
    fn test_bytes_roundtrip() {
        let replay = sample();
        let bytes = replay.to_bytes().unwrap();
        assert_eq!(Replay::from_bytes(&bytes).unwrap(), replay);
    }

    #[test]
    fn test_garbage_is_an_encoding_error() {
        let err = Replay::from_bytes(&[1, 2, 3]).unwrap_err();
        assert!(matches!(err, ReplayError::Encoding(_)));
    }

    #[test]
    fn test_file_roundtrip() {
        let path = std::env::temp_dir().join(format!("ruins-replay-{}.seed", std::process::id()));
        let replay = sample();
        replay.save(&path).unwrap();
        let loaded = Replay::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, replay);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Replay::load("/nonexistent/ruins/replay.seed").unwrap_err();
        assert!(matches!(err, ReplayError::Io(_)));
    }

    #[test]
    fn test_entrant_lookup() {
        let registry = vec![builtin::chad(), builtin::coward()];
        let entrants = sample().entrants(&registry).unwrap();
        let labels: Vec<_> = entrants.iter().map(|e| e.label().to_string()).collect();
        assert_eq!(labels, vec!["Chad", "Coward", "Chad"]);

        let err = sample().entrants(&[builtin::chad()]).unwrap_err();
        assert!(matches!(err, ReplayError::UnknownEntrant(label) if label == "Coward"));
    }
}
