pub mod cli;
pub mod client;
pub mod config;
pub mod message;
pub mod relay_log;
pub mod resolve;
pub mod server;

/* Re-exports */
pub use client::{ClientError, Connector, InboundConnection};
pub use config::{ConnectorConfig, ListenerConfig};
pub use message::{ConnectionEnd, TransferSummary};
pub use relay_log::init_logger;
pub use resolve::{ResolveError, Target};
pub use server::{RelayListener, ServerError};
