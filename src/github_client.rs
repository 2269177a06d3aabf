use std::collections::BTreeMap;

use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderMap};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{DeployError, Result};
use crate::types::{ApiResponse, DeploymentRequest};

pub const DEFAULT_API_URL: &str = "https://api.github.com";
const API_VERSION: &str = "2022-11-28";

pub struct GitHubClient {
    http: Client,
    api_url: String,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(api_url: &str, token: Option<String>) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("gh-deploy/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Issues `POST /repos/{owner}/{repo}/deployments`. Any non-2xx status is
    /// returned as [`DeployError::Api`].
    pub async fn create_deployment(&self, request: &DeploymentRequest) -> Result<ApiResponse> {
        let url = format!("{}{}", self.api_url, request.endpoint());
        info!("POST {}", url);

        let mut builder = self
            .http
            .post(&url)
            .header(ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
            .json(request);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await?;
        let status = response.status();
        let url = response.url().to_string();
        let headers = header_map(response.headers());
        let body = response.text().await?;
        debug!("GitHub responded {} with {} bytes", status, body.len());

        if !status.is_success() {
            return Err(DeployError::Api {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        Ok(ApiResponse {
            status: status.as_u16(),
            url,
            headers,
            data: serde_json::from_str(&body)?,
        })
    }
}

fn header_map(headers: &HeaderMap) -> BTreeMap<String, String> {
    headers
        .iter()
        .map(|(name, value)| {
            (
                name.to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect()
}

/// GitHub error bodies carry a `message` field; fall back to the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}
