use clap::ValueEnum;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One monitoring obligation as delivered by the task source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Task {
    pub task_id: String,
    /// Protocol tag, kept verbatim since it is also the key of the reported result.
    pub task_type: String,
    pub hostname: String,
    #[serde(default)]
    pub port: u16,
}

impl Task {
    pub fn new(task_id: &str, protocol: Protocol, hostname: &str, port: u16) -> Self {
        Self {
            task_id: task_id.to_string(),
            task_type: protocol.to_string(),
            hostname: hostname.to_string(),
            port,
        }
    }

    /// Returns the protocol for this task, or `None` if the tag is not recognized.
    pub fn protocol(&self) -> Option<Protocol> {
        self.task_type.parse().ok()
    }

    /// The `host:port` pair used by the socket based checks.
    pub fn address(&self) -> String {
        format!("{}:{}", self.hostname, self.port)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Protocol {
    Tcp,
    Http,
    Udp,
    Resolve,
    Icmp,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Tcp => "tcp",
            Protocol::Http => "http",
            Protocol::Udp => "udp",
            Protocol::Resolve => "resolve",
            Protocol::Icmp => "icmp",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown protocol '{0}'")]
pub struct UnknownProtocol(pub String);

impl FromStr for Protocol {
    type Err = UnknownProtocol;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tcp" => Ok(Protocol::Tcp),
            "http" => Ok(Protocol::Http),
            "udp" => Ok(Protocol::Udp),
            "resolve" => Ok(Protocol::Resolve),
            "icmp" => Ok(Protocol::Icmp),
            other => Err(UnknownProtocol(other.to_string())),
        }
    }
}
