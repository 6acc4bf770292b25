//! Integration tests for the persistence writer
//!
//! Uses an in-memory SQLite store and an XML log in the temp directory.

use std::path::PathBuf;
use std::sync::Arc;

use chess_engine::{Move, Position};
use netchess::game::{ClockMode, GameCoordinator, MoveSource};
use netchess::persistence::{run_persistence_writer, FenStore, PersistenceSinks, XmlMoveLog};

fn mv(text: &str) -> Move {
    text.parse().unwrap()
}

fn temp_log(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("netchess_{}_{}.xml", name, std::process::id()));
    let _ = std::fs::remove_file(&path);
    path
}

async fn sinks(name: &str) -> PersistenceSinks {
    PersistenceSinks {
        store: Some(FenStore::connect("sqlite::memory:").await.unwrap()),
        xml: Some(XmlMoveLog::open(temp_log(name)).await.unwrap()),
    }
}

#[tokio::test]
async fn test_writer_records_every_ply_until_game_over() {
    let game = Arc::new(GameCoordinator::new(Position::starting(), ClockMode::Untimed, None));
    let writer = tokio::spawn(run_persistence_writer(game.clone(), sinks("every_ply").await));

    for text in ["f2f3", "e7e5", "g2g4", "d8h4"] {
        game.apply_move(mv(text), MoveSource::Human).unwrap();
        tokio::task::yield_now().await;
    }

    let sinks = writer.await.unwrap();
    let final_fen = game.position().to_fen();

    let store = sinks.store.as_ref().unwrap();
    assert_eq!(store.count().await.unwrap(), 4);
    assert_eq!(store.fetch_most_recent().await.unwrap(), Some(final_fen.clone()));

    let xml = sinks.xml.as_ref().unwrap();
    assert_eq!(xml.entries().len(), 4);
    assert_eq!(xml.entries().last(), Some(&final_fen));

    let reopened = XmlMoveLog::open(xml.path()).await.unwrap();
    assert_eq!(reopened.entries(), xml.entries());

    let resumed = sinks.load_most_recent().await.unwrap();
    assert_eq!(resumed.to_fen(), final_fen);
    let _ = std::fs::remove_file(xml.path());
}

#[tokio::test]
async fn test_replaced_position_restarts_the_log() {
    let game = Arc::new(GameCoordinator::new(Position::starting(), ClockMode::Untimed, None));
    let writer = tokio::spawn(run_persistence_writer(game.clone(), sinks("restart").await));

    game.apply_move(mv("e2e4"), MoveSource::Human).unwrap();
    game.apply_move(mv("e7e5"), MoveSource::Human).unwrap();
    tokio::task::yield_now().await;

    let start = "6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1";
    game.replace_position(start).unwrap();
    tokio::task::yield_now().await;
    let outcome = game.apply_move(mv("a1a8"), MoveSource::Human).unwrap();
    assert!(outcome.game_over.is_game_over());

    let sinks = writer.await.unwrap();
    let xml = sinks.xml.as_ref().unwrap();
    assert_eq!(xml.entries().len(), 2);
    assert_eq!(xml.entries()[0], start);
    assert_eq!(xml.entries()[1], outcome.fen);
    assert_eq!(sinks.store.as_ref().unwrap().count().await.unwrap(), 2);
    let _ = std::fs::remove_file(xml.path());
}

#[tokio::test]
async fn test_sinks_clear() {
    let mut sinks = sinks("clear").await;
    sinks.record(chess_engine::constants::STARTING_FEN).await;
    sinks.clear().await;

    assert_eq!(sinks.store.as_ref().unwrap().count().await.unwrap(), 0);
    assert!(sinks.xml.as_ref().unwrap().entries().is_empty());
    assert!(sinks.load_most_recent().await.is_none());
    let _ = std::fs::remove_file(sinks.xml.as_ref().unwrap().path());
}
