use crate::checks::{CheckError, Checker};
use crate::task::Task;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;

/// Issues a GET request over HTTPS and succeeds on any 2xx status.
pub struct HttpCheck {
    name: &'static str,
}

impl HttpCheck {
    pub fn new() -> Self {
        Self { name: "HttpCheck" }
    }
}

#[async_trait]
impl Checker for HttpCheck {
    fn name(&self) -> &str {
        self.name
    }

    async fn check(&self, task: &Task) -> Result<(), CheckError> {
        get_status(&normalize_url(&task.hostname)).await
    }
}

/// Turns a task hostname into a request URL. Anything not already starting with `https://` is
/// wrapped as `https://<hostname>/`, including values carrying an `http://` scheme, so
/// plain-HTTP-only hosts cannot be checked.
pub fn normalize_url(hostname: &str) -> String {
    if hostname.starts_with("https://") {
        hostname.to_string()
    } else {
        format!("https://{}/", hostname)
    }
}

/// Sends a GET request to `url` and succeeds when the final status is 2xx.
async fn get_status(url: &str) -> Result<(), CheckError> {
    debug!("GET {}", url);

    let client = Client::builder().build()?;
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CheckError::Status {
            url: url.to_string(),
            status,
        });
    }
    Ok(())
}
