//! Command-line overrides for the host binary
//!
//! Every flag is optional; a given flag replaces the matching value loaded
//! from `settings.json`.

use std::path::PathBuf;

use clap::Parser;

use super::error::CoreResult;
use super::settings::{parse_color, GameSettings};
use crate::game::clock::ClockMode;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "netchess", version, about = "Console chess with an AI opponent and network position sync")]
pub struct HostArgs {
    /// Clock preset: untimed, 5min, 10min, 10min_increment, N or N+inc
    #[arg(long)]
    pub clock: Option<String>,

    /// Side played by the engine: white, black or none
    #[arg(long)]
    pub ai: Option<String>,

    /// AI search depth in plies
    #[arg(long)]
    pub depth: Option<u32>,

    /// Accept a network peer on this address (e.g. 127.0.0.1:65432)
    #[arg(long)]
    pub listen: Option<String>,

    /// sqlx URL of the position store
    #[arg(long)]
    pub database_url: Option<String>,

    /// Path of the XML move log
    #[arg(long)]
    pub xml_log: Option<PathBuf>,

    /// Disable both persistence sinks
    #[arg(long)]
    pub no_persist: bool,

    /// Start from the most recently stored position
    #[arg(long)]
    pub resume: bool,

    /// Read settings from this file instead of the default location
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Write the effective settings back to the settings file
    #[arg(long)]
    pub save_settings: bool,
}

impl HostArgs {
    /// Overlay the given flags on `settings`
    ///
    /// # Errors
    ///
    /// [`crate::core::CoreError::InvalidClockMode`] or
    /// [`crate::core::CoreError::InvalidColor`] for unreadable values.
    pub fn apply_to(&self, settings: &mut GameSettings) -> CoreResult<()> {
        if let Some(clock) = &self.clock {
            settings.clock = clock.parse::<ClockMode>()?;
        }
        if let Some(ai) = &self.ai {
            settings.ai_color = match ai.trim().to_ascii_lowercase().as_str() {
                "none" | "off" => None,
                other => Some(parse_color(other)?),
            };
        }
        if let Some(depth) = self.depth {
            settings.search_depth = depth.max(1);
        }
        if let Some(listen) = &self.listen {
            settings.network.enabled = true;
            settings.network.listen_addr = listen.clone();
        }
        if let Some(url) = &self.database_url {
            settings.persistence.database_url = url.clone();
        }
        if let Some(path) = &self.xml_log {
            settings.persistence.xml_log_path = path.clone();
        }
        if self.no_persist {
            settings.persistence.enabled = false;
        }
        Ok(())
    }
}
