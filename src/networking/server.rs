//! Position-sync server
//!
//! Accepts one peer at a time. While a peer is connected the server pushes
//! the current FEN after every applied ply and treats every inbound message
//! as a proposed position for White. A closed or failed connection is logged
//! and the next peer is accepted. The server stops once the game is over.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::{TcpListener, TcpStream};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::error::{NetworkError, NetworkResult};
use super::protocol::{read_message, write_message, Notice};
use crate::game::{GameCoordinator, StateChange};

pub struct PositionServer {
    listener: TcpListener,
    coordinator: Arc<GameCoordinator>,
}

impl PositionServer {
    /// Bind the listening socket
    ///
    /// # Errors
    ///
    /// [`NetworkError::Bind`] when the address is unusable or taken.
    pub async fn bind(addr: &str, coordinator: Arc<GameCoordinator>) -> NetworkResult<Self> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| NetworkError::Bind {
                addr: addr.to_string(),
                source,
            })?;
        info!("[NETWORK] Listening on {}", addr);
        Ok(Self {
            listener,
            coordinator,
        })
    }

    pub fn local_addr(&self) -> NetworkResult<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve peers one after another until the game ends
    pub async fn run(self) {
        let mut changes = self.coordinator.subscribe();

        loop {
            tokio::select! {
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        info!("[NETWORK] Peer connected: {}", peer);
                        match serve_peer(&self.coordinator, stream).await {
                            Ok(()) => info!("[NETWORK] Peer {} disconnected", peer),
                            Err(e) => warn!("[NETWORK] Connection with {} ended: {}", peer, e),
                        }
                    }
                    Err(e) => warn!("[NETWORK] Failed to accept connection: {}", e),
                },
                _ = wait_for_game_over(&mut changes) => {}
            }

            if self.coordinator.is_game_over() {
                info!("[NETWORK] Game over, server stopping");
                break;
            }
        }
    }
}

async fn wait_for_game_over(changes: &mut watch::Receiver<StateChange>) {
    loop {
        if changes.borrow_and_update().game_over.is_game_over() {
            return;
        }
        if changes.changed().await.is_err() {
            return;
        }
    }
}

/// Talk to one peer until it leaves or the game ends.
async fn serve_peer(coordinator: &GameCoordinator, stream: TcpStream) -> NetworkResult<()> {
    let (mut reader, mut writer) = stream.into_split();
    let mut changes = coordinator.subscribe();

    changes.borrow_and_update();
    let snapshot = coordinator.snapshot();
    write_message(&mut writer, &snapshot.fen).await?;
    let mut pushed = (snapshot.epoch, snapshot.ply);

    loop {
        tokio::select! {
            message = read_message(&mut reader) => {
                let Some(text) = message? else {
                    return Ok(());
                };
                if text.is_empty() {
                    continue;
                }
                let notice = handle_proposal(coordinator, &text);
                write_message(&mut writer, &notice.to_string()).await?;
            }
            changed = changes.changed() => {
                if changed.is_err() {
                    return Ok(());
                }
                let snapshot = coordinator.snapshot();
                if (snapshot.epoch, snapshot.ply) != pushed {
                    write_message(&mut writer, &snapshot.fen).await?;
                    pushed = (snapshot.epoch, snapshot.ply);
                }
                if snapshot.game_over.is_game_over() {
                    let notice = Notice::GameOver {
                        announcement: snapshot.game_over.message().to_string(),
                    };
                    write_message(&mut writer, &notice.to_string()).await?;
                    return Ok(());
                }
            }
        }
    }
}

/// Validate and apply one proposal, producing the reply.
fn handle_proposal(coordinator: &GameCoordinator, text: &str) -> Notice {
    debug!("[NETWORK] Proposal: {}", text);
    match coordinator.apply_remote_position(text) {
        Ok(outcome) => {
            info!("[NETWORK] Peer played {}", outcome.mv);
            Notice::Accepted {
                mv: outcome.mv.to_string(),
            }
        }
        Err(e) => {
            warn!("[NETWORK] Proposal rejected: {}", e);
            Notice::from_error(&e)
        }
    }
}
