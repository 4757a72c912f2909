//! Run configuration
//!
//! Persisted as JSON next to the binary. Settings only shape how the binary
//! drives a run (seeding, pacing, frame caps); they never change simulation
//! semantics.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed run seed; when absent the binary derives one from the clock
    pub seed: Option<u64>,
    /// Skip frame pacing entirely (soak runs)
    pub uncapped: bool,
    /// Stop the demo driver after this many frames
    pub max_frames: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            uncapped: false,
            max_frames: None,
        }
    }
}

impl Settings {
    const PATH: &'static str = "blockhop_settings.json";

    /// Load from the settings file; a missing or malformed file falls back
    /// to defaults
    pub fn load() -> Self {
        Self::load_from(Path::new(Self::PATH))
    }

    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!("ignoring malformed settings file: {err}");
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("no settings file, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self) -> io::Result<()> {
        self.save_to(Path::new(Self::PATH))
    }

    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let settings = Settings {
            seed: Some(42),
            uncapped: true,
            max_frames: Some(600),
        };
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.seed, Some(42));
        assert!(back.uncapped);
        assert_eq!(back.max_frames, Some(600));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let back: Settings = serde_json::from_str(r#"{"seed": 7}"#).unwrap();
        assert_eq!(back.seed, Some(7));
        assert!(!back.uncapped);
        assert_eq!(back.max_frames, None);
    }

    #[test]
    fn test_missing_file_is_defaults() {
        let settings = Settings::load_from(Path::new("definitely_not_here.json"));
        assert_eq!(settings.seed, None);
    }
}
