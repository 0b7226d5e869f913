use std::io;
use std::net::SocketAddr;

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use uuid::Uuid;

use crate::{relay_debug, relay_warn};

/// One open stream plus the fixed-size chunk buffer used to move its bytes.
///
/// The buffer is allocated once and reused for every read, whichever side
/// fills it (the socket on the listening side, the input on the connecting
/// side).
pub(crate) struct IoCore {
    pub id: Uuid,
    pub peer: SocketAddr,
    stream: TcpStream,
    buf: BytesMut,
}

impl IoCore {
    pub fn new(stream: TcpStream, peer: SocketAddr, chunk_size: usize) -> Self {
        let id = Uuid::new_v4();
        relay_debug!("Connection {} to {} uses {} byte chunks", id, peer, chunk_size);

        Self {
            id,
            peer,
            stream,
            buf: BytesMut::zeroed(chunk_size.max(1)),
        }
    }

    /// Reads at most one chunk from the socket. An empty slice means the peer
    /// closed its side.
    pub async fn recv_chunk(&mut self) -> io::Result<&[u8]> {
        let n = self.stream.read(&mut self.buf[..]).await?;
        Ok(&self.buf[..n])
    }

    /// Reads at most one chunk from `input` into the buffer and returns how
    /// many bytes are now pending for [`IoCore::send_pending`].
    pub async fn fill_from<R>(&mut self, input: &mut R) -> io::Result<usize>
    where
        R: AsyncRead + Unpin,
    {
        input.read(&mut self.buf[..]).await
    }

    /// Sends the first `len` buffered bytes, looping over partial writes until
    /// every byte is on the socket.
    pub async fn send_pending(&mut self, len: usize) -> io::Result<()> {
        let mut sent = 0;
        while sent < len {
            let n = self.stream.write(&self.buf[sent..len]).await?;
            if n == 0 {
                return Err(io::Error::from(io::ErrorKind::WriteZero));
            }
            sent += n;
        }
        Ok(())
    }

    /// Shuts the socket down; the descriptor itself is released on drop.
    pub async fn close(mut self) {
        if let Err(e) = self.stream.shutdown().await {
            relay_warn!("Shutdown of connection {} failed: {:?}", self.id, e);
        }
    }
}

/// Writes `chunk` to `out` in full and flushes it.
pub(crate) async fn write_through<W>(out: &mut W, chunk: &[u8]) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    out.write_all(chunk).await?;
    out.flush().await
}
