use super::*;
use crate::message::{ConnectionEnd, TransferSummary};
use crate::{relay_debug, relay_error, relay_info};
use std::net::SocketAddr;
use tokio::io::AsyncWrite;
use tokio::net::TcpStream;
use uuid::Uuid;

/// A connection accepted by the listener, drained until the peer goes away.
pub struct InboundConnection {
    core: IoCore,
}

impl InboundConnection {
    pub fn from_stream(stream: TcpStream, peer: SocketAddr, chunk_size: usize) -> Self {
        let core = IoCore::new(stream, peer, chunk_size);
        Self { core }
    }

    #[inline] pub fn id(&self) -> Uuid         { self.core.id }
    #[inline] pub fn peer(&self) -> SocketAddr { self.core.peer }

    /// Copies every received chunk to `out` until the peer closes, a read
    /// fails or `out` rejects a write. The socket is closed before returning.
    pub async fn drain_into<W>(mut self, out: &mut W) -> TransferSummary
    where
        W: AsyncWrite + Unpin,
    {
        let id = self.core.id;
        let mut total: u64 = 0;

        let end = loop {
            let chunk = match self.core.recv_chunk().await {
                Ok([]) => break ConnectionEnd::PeerClosed,
                Ok(chunk) => chunk,
                Err(e) => break ConnectionEnd::RecvFailed(e),
            };

            if let Err(e) = io_core::write_through(out, chunk).await {
                break ConnectionEnd::OutputFailed(e);
            }
            total += chunk.len() as u64;
            relay_debug!("Connection {} relayed {} bytes ({} total)", id, chunk.len(), total);
        };

        match &end {
            ConnectionEnd::PeerClosed => relay_info!("server: client disconnected"),
            ConnectionEnd::RecvFailed(e) => relay_error!("recv: {}", e),
            ConnectionEnd::OutputFailed(e) => relay_error!("error writing to stdout: {}", e),
        }
        relay_info!("server: recvd total of {} bytes", total);

        let peer = self.core.peer;
        self.core.close().await;

        TransferSummary { id, peer, bytes: total, end }
    }
}
