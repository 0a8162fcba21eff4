mod checks;
mod cli;
mod client;
mod config;
mod outcome;
mod runner;
mod task;

use checks::dispatcher::Dispatcher;
use clap::Parser;
use config::Config;
use dotenv::dotenv;
use log::{debug, info};
use runner::Runner;
use std::process::exit;
use task::Task;
use tokio::signal;

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init();

    let config = Config::new();
    debug!("Config: {:?}", config);

    // Parse the CLI arguments.
    let args = cli::Cli::parse();
    debug!("Parsed args: {:?}", args);

    match args.command {
        Some(cli::Commands::Run) => {
            let runner = Runner::new(config);
            tokio::select! {
                _ = runner.run() => {}
                _ = signal::ctrl_c() => {
                    info!("Received Ctrl+C, aborting run.");
                }
            }
        }
        Some(cli::Commands::Check {
            protocol,
            hostname,
            port,
        }) => {
            let task = Task::new("cli", protocol, &hostname, port);
            let outcome = Dispatcher::new(&config).perform(&task).await;
            println!("{}", outcome);
            if !outcome.reached {
                exit(1);
            }
        }
        None => {}
    }

    debug!("Exiting.");
}
