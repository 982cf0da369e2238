//! HTTP implementation of the project, export and credits services.
//!
//! Thin wrapper over `reqwest`. Response parsing that does not need the
//! network lives in free functions so it can be tested directly.

use super::{CreditsService, ExportArtifact, ExportService, ProjectService};
use crate::config::BuilderConfig;
use pagesmith_core::{BuilderError, BuilderResult, Framework, ProjectId};
use pagesmith_ir::{Project, ProjectContent};
use reqwest::{Method, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const CONNECT_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// CLIENT
// =============================================================================

/// Client for the hosted builder API
#[derive(Debug, Clone)]
pub struct HttpServices {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpServices {
    pub fn new(config: &BuilderConfig) -> BuilderResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| BuilderError::network(e.to_string()))?;
        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token: config.api_token.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, request: RequestBuilder) -> BuilderResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| BuilderError::network(e.to_string()))?;

        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "api response");
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(BuilderError::ServiceStatus {
            status: status.as_u16(),
            body,
        })
    }

    async fn json<T: serde::de::DeserializeOwned>(&self, request: RequestBuilder) -> BuilderResult<T> {
        self.send(request)
            .await?
            .json::<T>()
            .await
            .map_err(|e| BuilderError::network(format!("invalid response body: {}", e)))
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
struct UpdateProjectRequest<'a> {
    content: &'a ProjectContent,
}

#[derive(Serialize)]
struct ExportRequest {
    framework: Framework,
}

#[derive(Serialize)]
struct DeductRequest {
    amount: u64,
}

#[derive(Deserialize)]
struct BalanceResponse {
    balance: u64,
}

// =============================================================================
// SERVICES
// =============================================================================

#[async_trait::async_trait]
impl ProjectService for HttpServices {
    async fn fetch_project(&self, id: ProjectId) -> BuilderResult<Project> {
        let request = self.request(Method::GET, &format!("/api/projects/{}", id));
        self.json(request).await
    }

    async fn update_project(
        &self,
        id: ProjectId,
        content: ProjectContent,
    ) -> BuilderResult<Project> {
        let request = self
            .request(Method::PUT, &format!("/api/projects/{}", id))
            .json(&UpdateProjectRequest { content: &content });
        self.json(request).await
    }
}

#[async_trait::async_trait]
impl ExportService for HttpServices {
    async fn generate_export(
        &self,
        id: ProjectId,
        framework: Framework,
    ) -> BuilderResult<ExportArtifact> {
        let request = self
            .request(Method::POST, &format!("/api/projects/{}/export", id))
            .json(&ExportRequest { framework });
        let response = self.send(request).await?;

        let file_name = response
            .headers()
            .get(reqwest::header::CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(attachment_file_name)
            .unwrap_or_else(|| ExportArtifact::default_file_name(id, framework));
        let bytes = response
            .bytes()
            .await
            .map_err(|e| BuilderError::network(e.to_string()))?;

        Ok(ExportArtifact::new(file_name, bytes.to_vec()))
    }
}

#[async_trait::async_trait]
impl CreditsService for HttpServices {
    async fn balance(&self) -> BuilderResult<u64> {
        let response: BalanceResponse = self.json(self.request(Method::GET, "/api/credits")).await?;
        Ok(response.balance)
    }

    async fn deduct(&self, amount: u64) -> BuilderResult<u64> {
        let request = self
            .request(Method::POST, "/api/credits/deduct")
            .json(&DeductRequest { amount });
        let response: BalanceResponse = self.json(request).await?;
        Ok(response.balance)
    }
}

// =============================================================================
// PARSING
// =============================================================================

/// File name from a `Content-Disposition` header value
fn attachment_file_name(header: &str) -> Option<String> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .map(|name| name.trim_matches('"').to_string())
        .filter(|name| !name.is_empty())
}
