use crate::checks::{CheckError, Checker};
use crate::task::Task;
use async_trait::async_trait;
use log::debug;
use tokio::net::TcpStream;

/// Succeeds when a TCP handshake with the task's host and port completes.
pub struct TcpCheck {
    name: &'static str,
}

impl TcpCheck {
    pub fn new() -> Self {
        Self { name: "TcpCheck" }
    }
}

#[async_trait]
impl Checker for TcpCheck {
    fn name(&self) -> &str {
        self.name
    }

    async fn check(&self, task: &Task) -> Result<(), CheckError> {
        debug!("Connecting to {} over TCP", task.address());
        let stream = TcpStream::connect((task.hostname.as_str(), task.port)).await?;
        debug!("Connected to {}", stream.peer_addr()?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Protocol;
    use tokio::net::TcpListener;

    #[test]
    fn test_name() {
        assert_eq!(TcpCheck::new().name(), "TcpCheck");
    }

    #[tokio::test]
    async fn test_listening_port_is_reached() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let task = Task::new("1", Protocol::Tcp, "127.0.0.1", port);

        assert!(TcpCheck::new().check(&task).await.is_ok());
    }

    #[tokio::test]
    async fn test_closed_port_is_not_reached() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap().port()
        };
        let task = Task::new("1", Protocol::Tcp, "127.0.0.1", port);

        assert!(matches!(
            TcpCheck::new().check(&task).await,
            Err(CheckError::Io(_))
        ));
    }

    #[tokio::test]
    async fn test_unresolvable_host_is_not_reached() {
        let task = Task::new("1", Protocol::Tcp, "not a valid host.invalid", 80);

        assert!(TcpCheck::new().check(&task).await.is_err());
    }
}
