use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use chess_engine::Position;
use clap::Parser;
use tokio::io::BufReader;
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use netchess::core::{load_settings, load_settings_from, save_settings, save_settings_to, HostArgs};
use netchess::game::{run_ai_worker, run_clock_ticker, run_reporter, AiPlayer, GameCoordinator};
use netchess::networking::PositionServer;
use netchess::persistence::{run_persistence_writer, PersistenceSinks};
use netchess::ui::Console;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = HostArgs::parse();

    // Settings
    let mut settings = match &args.settings {
        Some(path) => load_settings_from(path)
            .with_context(|| format!("reading settings from {}", path.display()))?,
        None => load_settings(),
    };
    args.apply_to(&mut settings)?;
    if args.save_settings {
        match &args.settings {
            Some(path) => save_settings_to(&settings, path)?,
            None => save_settings(&settings)?,
        }
    }

    // Persistence
    let mut sinks = PersistenceSinks::open(&settings.persistence).await;
    let start = if args.resume {
        sinks.load_most_recent().await.unwrap_or_else(|| {
            warn!("[PERSIST] Nothing stored to resume from, starting a new game");
            Position::starting()
        })
    } else {
        sinks.clear().await;
        Position::starting()
    };

    let coordinator = Arc::new(GameCoordinator::new(start, settings.clock, settings.ai_color));
    info!("[ENGINE] Starting game, clock {}", settings.clock);

    // Workers
    tokio::spawn(run_clock_ticker(
        coordinator.clone(),
        Duration::from_millis(settings.tick_interval_ms.max(1)),
    ));

    let (updates_tx, updates_rx) = mpsc::unbounded_channel();
    tokio::spawn(run_reporter(coordinator.clone(), updates_tx));

    if let Some(color) = settings.ai_color {
        tokio::spawn(run_ai_worker(
            coordinator.clone(),
            AiPlayer::new(color, settings.search_depth),
        ));
    }

    let writer = (!sinks.is_empty()).then(|| tokio::spawn(run_persistence_writer(coordinator.clone(), sinks)));

    if settings.network.enabled {
        let server = PositionServer::bind(&settings.network.listen_addr, coordinator.clone()).await?;
        tokio::spawn(server.run());
    }

    // Console
    let console = Console::new(coordinator.clone(), BufReader::new(tokio::io::stdin()), tokio::io::stdout());
    console.run(updates_rx).await?;

    if let Some(writer) = writer {
        writer.abort();
    }
    info!("[ENGINE] Bye");
    Ok(())
}
