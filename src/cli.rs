use std::ffi::OsString;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};

use crate::config::{ConnectorConfig, ListenerConfig};

/// Arguments of the `listener` binary.
#[derive(Debug, Parser)]
#[command(
    name = "listener",
    about = "Accept TCP connections one at a time and copy their bytes to stdout.",
    override_usage = "listener <port>",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct ListenerArgs {
    #[arg(help = "local port number or service name to listen on", allow_hyphen_values = true)]
    pub port: String,
}

impl ListenerArgs {
    pub fn into_config(self) -> ListenerConfig {
        ListenerConfig::new(self.port)
    }
}

/// Arguments of the `connector` binary.
#[derive(Debug, Parser)]
#[command(
    name = "connector",
    about = "Connect to a TCP listener and send it everything read from stdin.",
    override_usage = "connector <host> <port> < message",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct ConnectorArgs {
    #[arg(help = "remote host name or address", allow_hyphen_values = true)]
    pub host: String,
    #[arg(help = "remote port number or service name", allow_hyphen_values = true)]
    pub port: String,
}

impl ConnectorArgs {
    pub fn into_config(self) -> ConnectorConfig {
        ConnectorConfig::new(self.host, self.port)
    }
}

/// Parses `args`, or prints the usage line to stderr and returns the standard
/// failure status.
///
/// Only the argument count is checked here; ports and hosts are left for the
/// resolver to accept or reject.
pub fn parse_or_usage<T, I, S>(args: I) -> Result<T, ExitCode>
where
    T: Parser,
    I: IntoIterator<Item = S>,
    S: Into<OsString> + Clone,
{
    T::try_parse_from(args).map_err(|e| {
        eprintln!("error: {}", e.kind().as_str().unwrap_or("invalid arguments"));
        eprintln!("{}", T::command().render_usage());
        ExitCode::FAILURE
    })
}
