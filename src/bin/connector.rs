use std::process::ExitCode;

use log::LevelFilter;
use sockrelay::cli::{parse_or_usage, ConnectorArgs};
use sockrelay::{init_logger, relay_error, Connector};
use tokio::runtime::Builder;

fn main() -> ExitCode {
    let args: ConnectorArgs = match parse_or_usage(std::env::args_os()) {
        Ok(args) => args,
        Err(code) => return code,
    };
    init_logger(LevelFilter::Info);

    let rt = match Builder::new_current_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            relay_error!("failed to start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    rt.block_on(async {
        let result = match Connector::connect(&args.into_config()).await {
            Ok(connector) => connector.relay_from(&mut tokio::io::stdin()).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(_) => ExitCode::SUCCESS,
            Err(e) => {
                relay_error!("{}", e);
                ExitCode::from(e.exit_code())
            }
        }
    })
}
