use std::io;
use std::net::SocketAddr;

use thiserror::Error;
use tokio::io::AsyncWrite;
use tokio::net::{TcpListener, TcpSocket};

use crate::client::InboundConnection;
use crate::config::ListenerConfig;
use crate::message::TransferSummary;
use crate::resolve::{self, ResolveError, Target};
use crate::{relay_debug, relay_error, relay_info};

/// Failures that stop the listening side before it accepts anything.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// Every candidate address failed socket creation, SO_REUSEADDR or bind.
    #[error("server: bind failed (port {port})")]
    BindFailed { port: String },

    #[error("listen: {0}")]
    Listen(#[source] io::Error),
}

impl ServerError {
    /// Process exit status reported for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            ServerError::Resolve(_) => 1,
            ServerError::BindFailed { .. } => 2,
            ServerError::Listen(_) => 3,
        }
    }
}

/// The passive side: a bound, listening socket that drains one connection at
/// a time into an output sink.
pub struct RelayListener {
    cfg: ListenerConfig,
    listener: TcpListener,
}

impl RelayListener {
    /// Binds the first wildcard candidate for the configured port and starts
    /// listening with the configured backlog.
    pub async fn bind(cfg: ListenerConfig) -> Result<Self, ServerError> {
        let target = Target::passive(cfg.port());
        let candidates = resolve::resolve(&target).await?;

        let socket = bind_first(&candidates, &cfg).ok_or_else(|| ServerError::BindFailed {
            port: cfg.port().to_string(),
        })?;
        let listener = socket.listen(cfg.backlog()).map_err(ServerError::Listen)?;

        relay_info!("server: waiting for connections on port {}...", cfg.port());
        Ok(Self { cfg, listener })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub fn config(&self) -> &ListenerConfig {
        &self.cfg
    }

    /// Accepts the next connection and drains it into `out` before returning.
    ///
    /// An `Err` is a failed accept; the listening socket is still usable.
    pub async fn accept_next<W>(&self, out: &mut W) -> io::Result<TransferSummary>
    where
        W: AsyncWrite + Unpin,
    {
        let (stream, peer) = self.listener.accept().await?;

        let conn = InboundConnection::from_stream(stream, peer, self.cfg.chunk_size());
        relay_info!("server: connected from {}", conn.peer().ip());
        relay_debug!("Accepted connection {} from {}", conn.id(), conn.peer());

        Ok(conn.drain_into(out).await)
    }

    /// Serves connections one after another, forever. Failed accepts are
    /// logged and skipped.
    pub async fn run<W>(&self, out: &mut W)
    where
        W: AsyncWrite + Unpin,
    {
        loop {
            match self.accept_next(out).await {
                Ok(summary) => {
                    relay_debug!("Connection {} from {} finished after {} bytes", summary.id, summary.peer, summary.bytes);
                }
                Err(e) => {
                    relay_error!("accept: {}", e);
                }
            }
        }
    }
}

/// Returns a socket bound to the first candidate that works, or `None` once
/// every candidate has been tried. Failed candidates are closed on drop.
fn bind_first(candidates: &[SocketAddr], cfg: &ListenerConfig) -> Option<TcpSocket> {
    for addr in candidates {
        let socket = match addr {
            SocketAddr::V4(_) => TcpSocket::new_v4(),
            SocketAddr::V6(_) => TcpSocket::new_v6(),
        };
        let socket = match socket {
            Ok(socket) => socket,
            Err(e) => {
                relay_error!("server: socket {}: {}", addr, e);
                continue;
            }
        };

        if cfg.reuse_address() {
            if let Err(e) = socket.set_reuseaddr(true) {
                relay_error!("setsockopt {}: {}", addr, e);
                continue;
            }
        }

        if let Err(e) = socket.bind(*addr) {
            relay_error!("server: bind {}: {}", addr, e);
            continue;
        }

        relay_debug!("Bound {}", addr);
        return Some(socket);
    }
    None
}
