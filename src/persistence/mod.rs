//! Write-behind persistence
//!
//! Two sinks receive every logged position: a SQLite table and an XML file.
//! Neither is read during play; the only read is the one-shot "resume from
//! the most recent position" at startup. Every failure is logged and the
//! game carries on.
//!
//! ## Module Organization
//!
//! - `sqlite` - [`FenStore`], the relational store
//! - `xml` - [`XmlMoveLog`], the XML append log

pub mod error;
pub mod sqlite;
pub mod xml;

use std::sync::Arc;

use chess_engine::{parse_fen, Position};
use tracing::{debug, info, warn};

pub use error::{PersistenceError, PersistenceResult};
pub use sqlite::FenStore;
pub use xml::XmlMoveLog;

use crate::core::PersistenceSettings;
use crate::game::GameCoordinator;

/// The configured sinks; either may be absent
#[derive(Default)]
pub struct PersistenceSinks {
    pub store: Option<FenStore>,
    pub xml: Option<XmlMoveLog>,
}

impl PersistenceSinks {
    /// Open both sinks, disabling any that fails to open
    pub async fn open(settings: &PersistenceSettings) -> Self {
        if !settings.enabled {
            info!("[PERSIST] Persistence disabled");
            return Self::default();
        }

        let store = match FenStore::connect(&settings.database_url).await {
            Ok(store) => Some(store),
            Err(e) => {
                warn!("[PERSIST] Position store unavailable ({}): {}", settings.database_url, e);
                None
            }
        };
        let xml = match XmlMoveLog::open(&settings.xml_log_path).await {
            Ok(log) => Some(log),
            Err(e) => {
                warn!("[PERSIST] XML log unavailable ({:?}): {}", settings.xml_log_path, e);
                None
            }
        };
        Self { store, xml }
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_none() && self.xml.is_none()
    }

    /// Most recent stored position, if any parses
    pub async fn load_most_recent(&self) -> Option<Position> {
        let store = self.store.as_ref()?;
        match store.fetch_most_recent().await {
            Ok(Some(fen)) => match parse_fen(&fen) {
                Ok(position) => {
                    info!("[PERSIST] Resuming from {}", fen);
                    Some(position)
                }
                Err(e) => {
                    warn!("[PERSIST] Stored position is unusable: {}", e);
                    None
                }
            },
            Ok(None) => {
                info!("[PERSIST] No stored position to resume from");
                None
            }
            Err(e) => {
                warn!("[PERSIST] Failed to read stored position: {}", e);
                None
            }
        }
    }

    /// Write one position to every sink.
    pub async fn record(&mut self, fen: &str) {
        if let Some(store) = &self.store {
            if let Err(e) = store.insert_latest(fen).await {
                warn!("[PERSIST] Failed to store position: {}", e);
            }
        }
        if let Some(xml) = &mut self.xml {
            if let Err(e) = xml.append(fen).await {
                warn!("[PERSIST] Failed to append to XML log: {}", e);
            }
        }
    }

    /// Empty every sink.
    pub async fn clear(&mut self) {
        if let Some(store) = &self.store {
            if let Err(e) = store.clear_all().await {
                warn!("[PERSIST] Failed to clear position store: {}", e);
            }
        }
        if let Some(xml) = &mut self.xml {
            if let Err(e) = xml.clear().await {
                warn!("[PERSIST] Failed to clear XML log: {}", e);
            }
        }
    }
}

/// Mirror every logged position into `sinks` until the game ends
///
/// A replaced position (new epoch) clears both sinks and records the new
/// starting position first.
pub async fn run_persistence_writer(coordinator: Arc<GameCoordinator>, mut sinks: PersistenceSinks) -> PersistenceSinks {
    let mut changes = coordinator.subscribe();
    let initial = coordinator.snapshot();
    let mut epoch = initial.epoch;
    let mut written = 0usize;

    loop {
        changes.borrow_and_update();
        let snapshot = coordinator.snapshot();

        if snapshot.epoch != epoch {
            sinks.clear().await;
            if let Some(start) = snapshot.log.first() {
                sinks.record(start).await;
            }
            epoch = snapshot.epoch;
            written = 0;
        }

        for fen in snapshot.log.iter().skip(1 + written) {
            sinks.record(fen).await;
        }
        if snapshot.ply > written {
            debug!("[PERSIST] Wrote plies {}..={}", written + 1, snapshot.ply);
            written = snapshot.ply;
        }

        if snapshot.game_over.is_game_over() {
            debug!("[PERSIST] Game over, writer stopping");
            break;
        }
        if changes.changed().await.is_err() {
            break;
        }
    }
    sinks
}
