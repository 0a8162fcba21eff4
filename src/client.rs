//! This module contains the HTTP client for the task source and the report sink.
use crate::config::Config;
use crate::outcome::CheckOutcome;
use crate::task::Task;
use std::fmt::Debug;

use log::debug;
use reqwest::Client;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("JSON deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Server error: {0} - {1}")]
    ServerError(reqwest::StatusCode, String),
}

/// Retrieve the batch of tasks to check.
pub async fn fetch_tasks(config: &Config) -> Result<Vec<Task>, ClientError> {
    let json = get(&config.endpoints.tasks_url).await?;
    let tasks = serde_json::from_str(&json)?;
    Ok(tasks)
}

/// Report the outcome of a task, keyed by the task's protocol tag.
pub async fn report(
    config: &Config,
    task: &Task,
    outcome: CheckOutcome,
) -> Result<(), ClientError> {
    let body = report_body(task, outcome).to_string();
    post(&config.endpoints.report_url, &body).await
}

/// Builds the `{"task_id": ..., "<task_type>": <reached>}` envelope.
pub fn report_body(task: &Task, outcome: CheckOutcome) -> serde_json::Value {
    let mut json = serde_json::json!({"task_id": task.task_id});
    json[task.task_type.as_str()] = serde_json::json!(outcome.reached);
    json
}

/// Send a GET request.
async fn get(url: &str) -> Result<String, ClientError> {
    debug!("GET {}", url);
    let client = Client::new();
    let response = client.get(url).send().await?;
    let status = response.status();
    let body = response.text().await?;
    if status.is_success() {
        Ok(body)
    } else {
        Err(ClientError::ServerError(status, body))
    }
}

/// Send a POST request with a JSON body.
async fn post(url: &str, body: &str) -> Result<(), ClientError> {
    debug!("POST {} with body: {}", url, body);
    let client = Client::new();
    let response = client
        .post(url)
        .header("Content-Type", "application/json")
        .body(body.to_string())
        .send()
        .await?;
    // If we get a 2xx, return Ok(()), otherwise return an error.
    if response.status().is_success() {
        Ok(())
    } else {
        let status = response.status();
        let body = response.text().await?;
        Err(ClientError::ServerError(status, body))
    }
}
