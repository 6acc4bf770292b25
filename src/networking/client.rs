//! Peer client
//!
//! The counterpart of [`super::server::PositionServer`]: connects, sends FEN
//! proposals and receives pushed positions and notices. Split into halves so
//! a background task can print inbound messages while the prompt sends.

use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tracing::info;

use super::error::{NetworkError, NetworkResult};
use super::protocol::{read_message, write_message};

pub struct PeerClient {
    stream: TcpStream,
}

impl PeerClient {
    /// Connect to a host
    ///
    /// # Errors
    ///
    /// [`NetworkError::Connect`] when nobody is listening.
    pub async fn connect(addr: &str) -> NetworkResult<Self> {
        let stream = TcpStream::connect(addr)
            .await
            .map_err(|source| NetworkError::Connect {
                addr: addr.to_string(),
                source,
            })?;
        info!("[NETWORK] Connected to {}", addr);
        Ok(Self { stream })
    }

    pub fn into_split(self) -> (PeerReceiver, PeerSender) {
        let (reader, writer) = self.stream.into_split();
        (PeerReceiver { reader }, PeerSender { writer })
    }
}

pub struct PeerSender {
    writer: OwnedWriteHalf,
}

impl PeerSender {
    /// Send a FEN proposal (or any text) as one message.
    pub async fn send(&mut self, message: &str) -> NetworkResult<()> {
        write_message(&mut self.writer, message).await
    }
}

pub struct PeerReceiver {
    reader: OwnedReadHalf,
}

impl PeerReceiver {
    /// Next inbound message
    ///
    /// # Errors
    ///
    /// [`NetworkError::ConnectionClosed`] once the host hangs up.
    pub async fn recv(&mut self) -> NetworkResult<String> {
        read_message(&mut self.reader)
            .await?
            .ok_or(NetworkError::ConnectionClosed)
    }
}
