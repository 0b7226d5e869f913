pub mod error;
pub mod inbound;
pub mod outbound;
mod io_core;
/* stream + chunk buffer shared by both directions, crate-internal */
pub(crate) use io_core::IoCore;

pub use error::ClientError;
pub use inbound::InboundConnection;
pub use outbound::Connector;
