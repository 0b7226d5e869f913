use std::io;
use std::net::SocketAddr;

use uuid::Uuid;

/// Why the listener stopped draining a connection.
#[derive(Debug)]
pub enum ConnectionEnd {
    /// The peer closed its side; read returned zero bytes.
    PeerClosed,

    /// Reading from the socket failed.
    RecvFailed(io::Error),

    /// Writing or flushing the output sink failed.
    OutputFailed(io::Error),
}

impl ConnectionEnd {
    pub fn is_graceful(&self) -> bool {
        matches!(self, ConnectionEnd::PeerClosed)
    }
}

/// Outcome of one accepted connection.
#[derive(Debug)]
pub struct TransferSummary {
    pub id: Uuid,
    pub peer: SocketAddr,
    pub bytes: u64,
    pub end: ConnectionEnd,
}
