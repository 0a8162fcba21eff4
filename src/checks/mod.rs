mod dns_check;
mod http_check;
mod icmp_check;
mod tcp_check;
mod udp_check;

pub mod dispatcher;

use crate::task::Task;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// A reachability test for one protocol.
///
/// Implementations own every socket or connection they open for the duration of a single
/// `check` call, so nothing outlives the call on either the success or the error path.
#[async_trait]
pub trait Checker: Send + Sync {
    fn name(&self) -> &str;
    async fn check(&self, task: &Task) -> Result<(), CheckError>;
}

#[derive(Error, Debug)]
pub enum CheckError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0} did not resolve to any address")]
    NoAddress(String),
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{url} returned status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("DNS lookup failed: {0}")]
    Dns(#[from] hickory_resolver::error::ResolveError),
    #[error("DNS lookup returned no {0} records")]
    EmptyAnswer(&'static str),
    #[error("expected a reply of {expected} bytes, received {received}")]
    ReplyLength { expected: usize, received: usize },
    #[error("ICMP ping failed: {0}")]
    Ping(#[from] surge_ping::SurgeError),
    #[error("no answer within {0:?}")]
    Timeout(Duration),
}
