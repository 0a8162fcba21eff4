use crate::checks::dns_check::DnsCheck;
use crate::checks::http_check::HttpCheck;
use crate::checks::icmp_check::IcmpCheck;
use crate::checks::tcp_check::TcpCheck;
use crate::checks::udp_check::UdpCheck;
use crate::checks::Checker;
use crate::config::Config;
use crate::outcome::CheckOutcome;
use crate::task::{Protocol, Task};
use log::{debug, info, warn};
use std::time::Duration;
use tokio::time::timeout;

/// Routes every task to the checker for its protocol.
pub struct Dispatcher {
    tcp: Box<dyn Checker>,
    http: Box<dyn Checker>,
    udp: Box<dyn Checker>,
    resolve: Box<dyn Checker>,
    icmp: Box<dyn Checker>,
    check_timeout: Duration,
}

impl Dispatcher {
    pub fn new(config: &Config) -> Self {
        Self {
            tcp: Box::new(TcpCheck::new()),
            http: Box::new(HttpCheck::new()),
            udp: Box::new(UdpCheck::new(config)),
            resolve: Box::new(DnsCheck::new()),
            icmp: Box::new(IcmpCheck::new(config)),
            check_timeout: config.run.check_timeout,
        }
    }

    fn checker_for(&self, protocol: Protocol) -> &dyn Checker {
        match protocol {
            Protocol::Tcp => self.tcp.as_ref(),
            Protocol::Http => self.http.as_ref(),
            Protocol::Udp => self.udp.as_ref(),
            Protocol::Resolve => self.resolve.as_ref(),
            Protocol::Icmp => self.icmp.as_ref(),
        }
    }

    /// Runs the check matching the task's protocol. Tasks with an unrecognized protocol are
    /// reported as not reached. Never fails.
    pub async fn perform(&self, task: &Task) -> CheckOutcome {
        let mut outcome = CheckOutcome::not_reached();

        match task.protocol() {
            Some(protocol) => {
                let checker = self.checker_for(protocol);
                debug!("Running {} for task {}", checker.name(), task.task_id);
                match timeout(self.check_timeout, checker.check(task)).await {
                    Ok(Ok(())) => outcome = CheckOutcome::reached(),
                    Ok(Err(e)) => {
                        debug!("{} failed for {}: {}", checker.name(), task.hostname, e)
                    }
                    Err(_) => warn!(
                        "{} for {} did not finish within {:?}",
                        checker.name(),
                        task.hostname,
                        self.check_timeout
                    ),
                }
            }
            None => warn!(
                "Task {} has unrecognized protocol '{}'",
                task.task_id, task.task_type
            ),
        }

        info!(
            "{} over {} is accessible: {}",
            task.hostname, task.task_type, outcome.reached
        );
        outcome
    }
}
