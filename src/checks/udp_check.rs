use crate::checks::{CheckError, Checker};
use crate::config::Config;
use crate::task::Task;
use async_trait::async_trait;
use log::debug;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::{lookup_host, UdpSocket};
use tokio::time::timeout;

/// Sends the sentinel payload and expects the peer to echo a datagram of the same length.
///
/// UDP gives no delivery guarantee, so a lost reply and a silent peer look the same here.
pub struct UdpCheck {
    name: &'static str,
    payload: Vec<u8>,
    timeout: Duration,
}

impl UdpCheck {
    pub fn new(config: &Config) -> Self {
        Self {
            name: "UdpCheck",
            payload: config.checks.udp.payload.as_bytes().to_vec(),
            timeout: config.checks.udp.timeout,
        }
    }
}

#[async_trait]
impl Checker for UdpCheck {
    fn name(&self) -> &str {
        self.name
    }

    async fn check(&self, task: &Task) -> Result<(), CheckError> {
        let address = task.address();
        let peer = lookup_host(&address)
            .await?
            .next()
            .ok_or_else(|| CheckError::NoAddress(address.clone()))?;

        let local: SocketAddr = match peer {
            SocketAddr::V4(_) => (Ipv4Addr::UNSPECIFIED, 0).into(),
            SocketAddr::V6(_) => (Ipv6Addr::UNSPECIFIED, 0).into(),
        };
        let socket = UdpSocket::bind(local).await?;
        socket.connect(peer).await?;

        debug!("Sending {} bytes to {} over UDP", self.payload.len(), peer);
        socket.send(&self.payload).await?;

        // One spare byte so an oversized reply shows up as a length mismatch instead of being
        // truncated to exactly the expected size.
        let mut buffer = vec![0u8; self.payload.len() + 1];
        let received = timeout(self.timeout, socket.recv(&mut buffer))
            .await
            .map_err(|_| CheckError::Timeout(self.timeout))??;

        if received != self.payload.len() {
            return Err(CheckError::ReplyLength {
                expected: self.payload.len(),
                received,
            });
        }
        Ok(())
    }
}
