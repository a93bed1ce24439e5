//! Stub terrain engine server
//!
//! Answers the bridge protocol on a local port so the client can be exercised
//! without a running game. Mirrors the engine's framing: one request line per
//! connection, one reply line, then the connection is closed.

use std::io;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::protocol::{BridgeCommand, BridgeResponse};

/// Answers decoded bridge commands on behalf of the stub server
pub trait TerrainEngine: Send + 'static {
    fn handle(&mut self, cmd: BridgeCommand) -> BridgeResponse;
}

/// Running stub engine; dropping it stops accepting connections
pub struct BridgeServer {
    addr: SocketAddr,
    accepted: Arc<AtomicUsize>,
    accept_task: JoinHandle<()>,
}

impl BridgeServer {
    /// Bind `addr` (port 0 picks an ephemeral port) and serve in the background
    pub async fn bind<E: TerrainEngine>(engine: Arc<Mutex<E>>, addr: &str) -> io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        let addr = listener.local_addr()?;
        let accepted = Arc::new(AtomicUsize::new(0));
        log::info!("Stub terrain engine listening on {}", addr);

        let counter = accepted.clone();
        let accept_task = tokio::spawn(async move {
            loop {
                let (stream, peer) = match listener.accept().await {
                    Ok(conn) => conn,
                    Err(e) => {
                        log::warn!("Stub engine failed to accept: {}", e);
                        continue;
                    }
                };
                counter.fetch_add(1, Ordering::Relaxed);
                let engine = engine.clone();
                tokio::spawn(async move {
                    if let Err(e) = answer_once(stream, engine).await {
                        log::warn!("Stub engine dropped request from {}: {}", peer, e);
                    }
                });
            }
        });

        Ok(Self {
            addr,
            accepted,
            accept_task,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Connections accepted so far
    pub fn connections(&self) -> usize {
        self.accepted.load(Ordering::Relaxed)
    }
}

impl Drop for BridgeServer {
    fn drop(&mut self) {
        self.accept_task.abort();
    }
}

/// Read a single command line, write its reply and shut the stream down
async fn answer_once<E: TerrainEngine>(
    stream: TcpStream,
    engine: Arc<Mutex<E>>,
) -> io::Result<()> {
    let (reader, mut writer) = stream.into_split();
    let mut line = String::new();
    if BufReader::new(reader).read_line(&mut line).await? == 0 {
        return Ok(());
    }

    let response = match serde_json::from_str::<BridgeCommand>(line.trim()) {
        Ok(cmd) => {
            log::debug!("Stub engine handling {}", cmd.name());
            engine.lock().await.handle(cmd)
        }
        Err(e) => BridgeResponse::error(format!("Invalid command JSON: {}", e)),
    };

    let mut payload = serde_json::to_vec(&response).map_err(io::Error::other)?;
    payload.push(b'\n');
    writer.write_all(&payload).await?;
    writer.shutdown().await
}
