use std::process::ExitCode;

use log::LevelFilter;
use sockrelay::cli::{parse_or_usage, ListenerArgs};
use sockrelay::{init_logger, relay_error, RelayListener};
use tokio::runtime::Builder;

fn main() -> ExitCode {
    let args: ListenerArgs = match parse_or_usage(std::env::args_os()) {
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
        let listener = match RelayListener::bind(args.into_config()).await {
            Ok(listener) => listener,
            Err(e) => {
                relay_error!("{}", e);
                return ExitCode::from(e.exit_code());
            }
        };

        let mut out = tokio::io::stdout();
        listener.run(&mut out).await;
        ExitCode::SUCCESS
    })
}
