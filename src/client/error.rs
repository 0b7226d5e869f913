//! src/client/error.rs

use std::io;
use thiserror::Error;

use crate::resolve::{ResolveError, Target};

/// Everything that ends the connecting side early.
#[derive(Debug, Error)]
pub enum ClientError {
    /* ───────────── Resolution ───────────── */
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /* ───────────── Transport / Socket ───────────── */
    #[error("client: connection failed ({target})")]
    ConnectFailed { target: Target },

    #[error("send: {0}")]
    Send(#[source] io::Error),
}

impl ClientError {
    /// Process exit status reported for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            ClientError::Resolve(_) => 1,
            ClientError::ConnectFailed { .. } => 2,
            ClientError::Send(_) => 3,
        }
    }
}
