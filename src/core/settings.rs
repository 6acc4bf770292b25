//! Settings persistence
//!
//! Saves and loads [`GameSettings`] to/from a JSON file so that the clock
//! mode, AI side, network address and persistence sinks survive across
//! sessions.
//!
//! # File Location
//!
//! Settings are stored in `settings.json` in the user's configuration
//! directory (resolved with [`ProjectDirs`]), falling back to the current
//! directory when no configuration directory exists.
//!
//! # Error Handling
//!
//! Both load and save handle errors gracefully:
//! - Load failures fall back to default settings
//! - Save failures are returned to the caller, who logs them

use std::fs;
use std::path::{Path, PathBuf};

use chess_engine::constants::DEFAULT_SEARCH_DEPTH;
use chess_engine::Color;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::error::{CoreError, CoreResult};
use crate::game::clock::ClockMode;
use crate::networking::DEFAULT_PORT;

/// Settings filename
const SETTINGS_FILENAME: &str = "settings.json";

/// Everything a hosted game can be configured with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Clock preset, see [`ClockMode`] for accepted spellings.
    pub clock: ClockMode,
    /// Side played by the engine, `None` for two humans.
    #[serde(with = "optional_color")]
    pub ai_color: Option<Color>,
    /// AI look-ahead in plies.
    pub search_depth: u32,
    /// Clock ticker cadence.
    pub tick_interval_ms: u64,
    pub network: NetworkSettings,
    pub persistence: PersistenceSettings,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            clock: ClockMode::Untimed,
            ai_color: Some(Color::Black),
            search_depth: DEFAULT_SEARCH_DEPTH,
            tick_interval_ms: 100,
            network: NetworkSettings::default(),
            persistence: PersistenceSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkSettings {
    /// Accept a peer on this address.
    pub enabled: bool,
    pub listen_addr: String,
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            listen_addr: format!("127.0.0.1:{DEFAULT_PORT}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistenceSettings {
    pub enabled: bool,
    /// sqlx connection string of the position store.
    pub database_url: String,
    pub xml_log_path: PathBuf,
}

impl Default for PersistenceSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            database_url: "sqlite:fen_database.db".to_string(),
            xml_log_path: PathBuf::from("fen_notations.xml"),
        }
    }
}

/// Parse `white` / `black` (case-insensitive, `w` / `b` accepted).
pub fn parse_color(value: &str) -> CoreResult<Color> {
    match value.trim().to_ascii_lowercase().as_str() {
        "white" | "w" => Ok(Color::White),
        "black" | "b" => Ok(Color::Black),
        _ => Err(CoreError::InvalidColor {
            value: value.to_string(),
        }),
    }
}

mod optional_color {
    use chess_engine::Color;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(color: &Option<Color>, serializer: S) -> Result<S::Ok, S::Error> {
        match color {
            Some(color) => serializer.serialize_some(color.name()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Color>, D::Error> {
        let value: Option<String> = Option::deserialize(deserializer)?;
        value
            .map(|text| super::parse_color(&text).map_err(de::Error::custom))
            .transpose()
    }
}

/// Helper to resolve the settings file path
///
/// Returns a path to `settings.json` in the user's configuration directory,
/// or a local `settings.json` if the system config dir cannot be found.
pub fn settings_path() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("com", "trilltino", "netchess") {
        proj_dirs.config_dir().join(SETTINGS_FILENAME)
    } else {
        PathBuf::from(SETTINGS_FILENAME)
    }
}

/// Load settings from a specific file
///
/// # Errors
///
/// I/O or JSON errors; a missing file is an I/O error here.
pub fn load_settings_from(path: &Path) -> CoreResult<GameSettings> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str::<GameSettings>(&contents)?)
}

/// Load settings on startup
///
/// Never fails: a missing or invalid file is logged and replaced by
/// [`GameSettings::default`].
pub fn load_settings() -> GameSettings {
    let path = settings_path();
    if !path.exists() {
        info!("[SETTINGS] No settings file found at {:?}. Using defaults.", path);
        return GameSettings::default();
    }

    match load_settings_from(&path) {
        Ok(settings) => {
            info!("[SETTINGS] Loaded settings from {:?}", path);
            settings
        }
        Err(e) => {
            warn!(
                "[SETTINGS] Failed to load settings file at {:?}: {}. Using defaults.",
                path, e
            );
            GameSettings::default()
        }
    }
}

/// Save settings to a specific file, creating parent directories.
pub fn save_settings_to(settings: &GameSettings, path: &Path) -> CoreResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;
    info!("[SETTINGS] Saved settings to {:?}", path);
    Ok(())
}

/// Save settings to the default location.
pub fn save_settings(settings: &GameSettings) -> CoreResult<()> {
    save_settings_to(settings, &settings_path())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("netchess-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_settings_round_trip_through_file() {
        //! Saved settings load back unchanged
        let path = scratch_path("settings-roundtrip.json");
        let settings = GameSettings {
            clock: ClockMode::IncrementCountdown {
                initial: Duration::from_secs(600),
                increment: Duration::from_secs(15),
            },
            ai_color: Some(Color::White),
            ..GameSettings::default()
        };

        save_settings_to(&settings, &path).unwrap();
        let loaded = load_settings_from(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        //! Missing keys take their default values
        let settings: GameSettings =
            serde_json::from_str(r#"{ "clock": "5min", "ai_color": null }"#).unwrap();
        assert_eq!(settings.clock, ClockMode::FixedCountdown(Duration::from_secs(300)));
        assert_eq!(settings.ai_color, None);
        assert_eq!(settings.search_depth, DEFAULT_SEARCH_DEPTH);
        assert!(settings.persistence.enabled);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        //! Unknown colors and clock presets fail to deserialize
        assert!(serde_json::from_str::<GameSettings>(r#"{ "ai_color": "green" }"#).is_err());
        assert!(serde_json::from_str::<GameSettings>(r#"{ "clock": "forever" }"#).is_err());
    }

    #[test]
    fn test_missing_file_is_an_error_for_explicit_load() {
        //! load_settings_from surfaces I/O errors instead of hiding them
        let path = scratch_path("does-not-exist.json");
        assert!(matches!(
            load_settings_from(&path),
            Err(CoreError::SettingsIo(_))
        ));
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("White").unwrap(), Color::White);
        assert_eq!(parse_color("b").unwrap(), Color::Black);
        assert!(parse_color("red").is_err());
    }
}
