use std::fmt;
use std::io;
use std::net::SocketAddr;

use dns_lookup::{AddrInfoHints, SockType};
use thiserror::Error;

use crate::relay_debug;

/// Host and port (number or service name) to turn into candidate socket
/// addresses.
///
/// A missing host means "any local interface", as used by the listening side.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Target {
    pub host: Option<String>,
    pub port: String,
}

impl Target {
    pub fn passive(port: impl Into<String>) -> Self {
        Self { host: None, port: port.into() }
    }

    pub fn remote(host: impl Into<String>, port: impl Into<String>) -> Self {
        Self { host: Some(host.into()), port: port.into() }
    }

    fn hints(&self) -> AddrInfoHints {
        AddrInfoHints {
            socktype: SockType::Stream.into(),
            protocol: 0,
            address: 0,
            flags: if self.host.is_none() { libc::AI_PASSIVE } else { 0 },
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.host {
            Some(host) => write!(f, "{}:{}", host, self.port),
            None => write!(f, "*:{}", self.port),
        }
    }
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("getaddrinfo: {target}: {source}")]
    Lookup {
        target: Target,
        #[source]
        source: io::Error,
    },

    #[error("getaddrinfo: {target}: no addresses")]
    NoAddresses { target: Target },
}

/// Resolves `target` through the system resolver into stream-socket
/// candidates of either address family, in the order they should be tried.
pub async fn resolve(target: &Target) -> Result<Vec<SocketAddr>, ResolveError> {
    let query = target.clone();
    let candidates = tokio::task::spawn_blocking(move || lookup(&query))
        .await
        .map_err(io::Error::other)
        .and_then(|res| res)
        .map_err(|source| ResolveError::Lookup {
            target: target.clone(),
            source,
        })?;

    if candidates.is_empty() {
        return Err(ResolveError::NoAddresses {
            target: target.clone(),
        });
    }

    relay_debug!("Resolved {} to {} candidate(s): {:?}", target, candidates.len(), candidates);
    Ok(candidates)
}

fn lookup(target: &Target) -> io::Result<Vec<SocketAddr>> {
    let addrs = dns_lookup::getaddrinfo(target.host.as_deref(), Some(target.port.as_str()), Some(target.hints()))
        .map_err(io::Error::from)?;

    addrs
        .map(|info| info.map(|info| info.sockaddr).map_err(io::Error::from))
        .collect()
}
