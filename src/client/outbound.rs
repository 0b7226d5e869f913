use super::*;
use crate::client::error::ClientError;
use crate::resolve::{self, Target};
use crate::{relay_debug, relay_error, relay_info, ConnectorConfig};
use std::net::SocketAddr;
use tokio::io::AsyncRead;
use tokio::net::TcpStream;
use uuid::Uuid;

/// The active side: one outbound connection that input is relayed into.
pub struct Connector {
    core: IoCore,
}

impl Connector {
    /// Resolves the configured host and connects to the first candidate that
    /// accepts. Input is not touched here.
    pub async fn connect(cfg: &ConnectorConfig) -> Result<Self, ClientError> {
        let target = Target::remote(cfg.host(), cfg.port());
        let candidates = resolve::resolve(&target).await?;

        let (stream, peer) = connect_first(&candidates)
            .await
            .ok_or(ClientError::ConnectFailed { target })?;

        relay_info!("client: connected");
        let core = IoCore::new(stream, peer, cfg.chunk_size());
        Ok(Self { core })
    }

    #[inline] pub fn id(&self) -> Uuid         { self.core.id }
    #[inline] pub fn peer(&self) -> SocketAddr { self.core.peer }

    /// Forwards `input` to the connection chunk by chunk until it is
    /// exhausted, then closes the connection and returns the bytes sent.
    ///
    /// A failed read from `input` ends the relay like end of input does; a
    /// failed send aborts it with [`ClientError::Send`].
    pub async fn relay_from<R>(mut self, input: &mut R) -> Result<u64, ClientError>
    where
        R: AsyncRead + Unpin,
    {
        let mut total: u64 = 0;

        loop {
            let n = match self.core.fill_from(input).await {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) => {
                    relay_error!("read: {}", e);
                    break;
                }
            };

            if let Err(e) = self.core.send_pending(n).await {
                self.core.close().await;
                return Err(ClientError::Send(e));
            }
            total += n as u64;
            relay_debug!("Connection {} sent {} bytes ({} total)", self.id(), n, total);
        }

        self.core.close().await;
        relay_info!("client closed");
        Ok(total)
    }
}

async fn connect_first(candidates: &[SocketAddr]) -> Option<(TcpStream, SocketAddr)> {
    for addr in candidates {
        match TcpStream::connect(addr).await {
            Ok(stream) => return Some((stream, *addr)),
            Err(e) => relay_error!("client: connect {}: {}", addr, e),
        }
    }
    None
}
