use crate::checks::{CheckError, Checker};
use crate::config::Config;
use crate::task::Task;
use async_trait::async_trait;
use log::{debug, info};
use std::net::IpAddr;
use std::sync::atomic::{AtomicU16, Ordering};
use std::time::Duration;
use surge_ping::{Client, PingIdentifier, PingSequence, SurgeError, ICMP};
use tokio::net::lookup_host;

const PAYLOAD: [u8; 56] = [0; 56];

static NEXT_IDENTIFIER: AtomicU16 = AtomicU16::new(0);

/// Sends a single ICMP echo request to the task's host.
///
/// The ping counts as reached when it runs to completion without a transport error: an echo
/// reply qualifies, and so does waiting out the timeout with no reply at all. Only resolution,
/// socket and send failures make the host unreachable.
pub struct IcmpCheck {
    name: &'static str,
    timeout: Duration,
}

impl IcmpCheck {
    pub fn new(config: &Config) -> Self {
        Self {
            name: "IcmpCheck",
            timeout: config.checks.icmp.timeout,
        }
    }
}

#[async_trait]
impl Checker for IcmpCheck {
    fn name(&self) -> &str {
        self.name
    }

    async fn check(&self, task: &Task) -> Result<(), CheckError> {
        let ip = lookup_host((task.hostname.as_str(), 0))
            .await?
            .next()
            .map(|address| address.ip())
            .ok_or_else(|| CheckError::NoAddress(task.hostname.clone()))?;

        let config = match ip {
            IpAddr::V4(_) => surge_ping::Config::default(),
            IpAddr::V6(_) => surge_ping::Config::builder().kind(ICMP::V6).build(),
        };
        let client = Client::new(&config)?;
        let identifier = (std::process::id() as u16)
            .wrapping_add(NEXT_IDENTIFIER.fetch_add(1, Ordering::Relaxed));
        let mut pinger = client.pinger(ip, PingIdentifier(identifier)).await;
        pinger.timeout(self.timeout);

        debug!("Sending ICMP echo request to {}", ip);
        let result = pinger
            .ping(PingSequence(0), &PAYLOAD)
            .await
            .map(|(_, rtt)| rtt);
        settle(ip, result)
    }
}

/// Maps the result of a ping to the check result. A timeout means the pinger went idle
/// without an error, which counts as reached.
fn settle(ip: IpAddr, result: Result<Duration, SurgeError>) -> Result<(), CheckError> {
    match result {
        Ok(rtt) => {
            info!("IP Addr: {} receive, RTT: {:?}", ip, rtt);
            Ok(())
        }
        Err(SurgeError::Timeout { .. }) => {
            debug!("No echo reply from {}, pinger went idle", ip);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
