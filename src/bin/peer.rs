//! Network peer
//!
//! Connects to a host, prints every message it pushes and sends FEN lines
//! typed on stdin as move proposals. `exit` closes the connection.

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

use netchess::networking::{NetworkError, PeerClient, DEFAULT_PORT, EXIT_COMMAND};

#[derive(Debug, Parser)]
#[command(name = "netchess-peer", version, about = "Send FEN positions to a netchess host")]
struct PeerArgs {
    /// Host address
    #[arg(long, default_value_t = format!("127.0.0.1:{DEFAULT_PORT}"))]
    connect: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = PeerArgs::parse();
    let client = PeerClient::connect(&args.connect)
        .await
        .with_context(|| format!("connecting to {}", args.connect))?;
    let (mut receiver, mut sender) = client.into_split();

    let printer = tokio::spawn(async move {
        loop {
            match receiver.recv().await {
                Ok(message) => println!("{message}"),
                Err(NetworkError::ConnectionClosed) => {
                    println!("Host closed the connection");
                    break;
                }
                Err(e) => {
                    eprintln!("Receive failed: {e}");
                    break;
                }
            }
        }
    });

    println!("Enter a FEN string (or '{EXIT_COMMAND}' to quit):");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case(EXIT_COMMAND) {
            break;
        }
        if printer.is_finished() {
            break;
        }
        sender.send(line).await?;
    }

    printer.abort();
    info!("[NETWORK] Disconnected from {}", args.connect);
    Ok(())
}
