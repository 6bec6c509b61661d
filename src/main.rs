//! clipman CLI entry point

use std::process::ExitCode;

use clap::Parser;

use clipman::cli::{
    app::{init_tracing, load_merged_config, run},
    args::Cli,
};
use clipman::domain::config::AppConfig;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let cli_config = AppConfig {
        timeout: cli.timeout.clone(),
        retries: cli.retries,
        debug: cli.debug.then_some(true),
        linux: None,
    };

    // Merge: defaults < file < env < cli
    let config = load_merged_config(cli_config).await;
    init_tracing(config.debug_or_default());

    run(cli.command, &config).await
}
