use crate::task::Protocol;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "healthprobe")]
#[command(author, version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetches the task batch, checks every task and reports the results.
    Run,
    /// Checks a single host without fetching tasks or reporting the result.
    Check {
        /// Protocol used to reach the host.
        #[arg(value_enum)]
        protocol: Protocol,
        /// Hostname, IP address or, for HTTP, a URL.
        hostname: String,
        /// Port, only used by the TCP and UDP checks.
        #[arg(short, long, default_value_t = 0)]
        port: u16,
    },
}
