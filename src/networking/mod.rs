//! Network position sync
//!
//! ## Module Organization
//!
//! - `protocol` - Message framing, notices and constants
//! - `server` - Host side: one peer at a time, proposals for White
//! - `client` - Peer side used by the `netchess-peer` binary

pub mod client;
pub mod error;
pub mod protocol;
pub mod server;

pub use client::{PeerClient, PeerReceiver, PeerSender};
pub use error::{NetworkError, NetworkResult};
pub use protocol::{Notice, DEFAULT_PORT, EXIT_COMMAND, READ_BUFFER_SIZE};
pub use server::PositionServer;
