use reqwest::StatusCode;
use serde_json::Value;

use crate::error::TestResult;

/// Test client for making requests to a running [`crate::TestServer`]
#[derive(Clone)]
pub struct TestClient {
    pub client: reqwest::Client,
    base_url: String,
}

impl TestClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET `path` and return the status with the raw body.
    pub async fn get_text(&self, path: &str) -> TestResult<(StatusCode, String)> {
        let response = self.client.get(self.url(path)).send().await?;
        let status = response.status();
        Ok((status, response.text().await?))
    }

    /// GET `path` and decode the body as JSON.
    pub async fn get_json(&self, path: &str) -> TestResult<(StatusCode, Value)> {
        let (status, body) = self.get_text(path).await?;
        Ok((status, serde_json::from_str(&body)?))
    }

    /// GET `/search` with `query` form-encoded as `q`.
    pub async fn search(&self, query: &str) -> TestResult<(StatusCode, Value)> {
        let response = self
            .client
            .get(self.url("/search"))
            .query(&[("q", query)])
            .send()
            .await?;
        let status = response.status();
        Ok((status, response.json().await?))
    }
}
