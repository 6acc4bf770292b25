//! Core infrastructure: errors, settings and command-line overrides

pub mod cli;
pub mod error;
pub mod settings;

pub use cli::HostArgs;
pub use error::{CoreError, CoreResult};
pub use settings::{
    load_settings, load_settings_from, save_settings, save_settings_to, settings_path,
    GameSettings, NetworkSettings, PersistenceSettings,
};
