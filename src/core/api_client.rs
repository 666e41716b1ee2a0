// src/core/api_client.rs
//! HTTP client for the job-board REST backend

use std::future::Future;
use std::time::Duration;

use anyhow::Context;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::mapper::ListQuery;
use crate::types::{
    response::{DeleteResponse, ErrorBody},
    JobId, JobPayload, JobPosting,
};

const JOBS_ENDPOINT: &str = "/api/jobs/";

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("backend returned {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Status {
        status: StatusCode,
        message: Option<String>,
    },
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl ApiError {
    /// Message supplied by the backend, if the failure carried one
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// What to show the user: the backend's own words, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.backend_message().unwrap_or(fallback).to_string()
    }
}

/// The REST operations the controllers depend on.
#[cfg_attr(test, mockall::automock)]
pub trait JobApi: Send + Sync {
    fn list_jobs(
        &self,
        query: ListQuery,
    ) -> impl Future<Output = Result<Vec<JobPosting>, ApiError>> + Send;

    fn get_job(&self, id: JobId) -> impl Future<Output = Result<JobPosting, ApiError>> + Send;

    fn create_job(
        &self,
        payload: JobPayload,
    ) -> impl Future<Output = Result<JobPosting, ApiError>> + Send;

    fn update_job(
        &self,
        id: JobId,
        payload: JobPayload,
    ) -> impl Future<Output = Result<JobPosting, ApiError>> + Send;

    fn delete_job(&self, id: JobId) -> impl Future<Output = Result<(), ApiError>> + Send;
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout_seconds: u64) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .default_headers(headers)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}{}", self.base_url, JOBS_ENDPOINT)
    }

    fn item_url(&self, id: JobId) -> String {
        format!("{}{}{}", self.base_url, JOBS_ENDPOINT, id)
    }

    async fn execute(&self, url: &str, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await.map_err(|source| {
            error!("Request to {} failed: {}", url, source);
            ApiError::Transport {
                url: url.to_string(),
                source,
            }
        })?;

        let status = response.status();
        debug!("Response status from {}: {}", url, status);

        if status.is_success() {
            return Ok(response);
        }

        let error_text = response.text().await.unwrap_or_default();
        error!("Backend error response from {}: {} {}", url, status, error_text);

        Err(ApiError::Status {
            status,
            message: extract_backend_message(&error_text),
        })
    }

    async fn send<R>(&self, url: &str, request: RequestBuilder) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
    {
        self.execute(url, request)
            .await?
            .json::<R>()
            .await
            .map_err(|source| ApiError::Decode {
                url: url.to_string(),
                source,
            })
    }
}

impl JobApi for ApiClient {
    async fn list_jobs(&self, query: ListQuery) -> Result<Vec<JobPosting>, ApiError> {
        let url = self.collection_url();
        info!("Fetching jobs with params: {:?}", query.params());

        let request = self.client.get(&url).query(query.params());
        self.send(&url, request).await
    }

    async fn get_job(&self, id: JobId) -> Result<JobPosting, ApiError> {
        let url = self.item_url(id);
        info!("Fetching job {}", id);

        self.send(&url, self.client.get(&url)).await
    }

    async fn create_job(&self, payload: JobPayload) -> Result<JobPosting, ApiError> {
        let url = self.collection_url();
        info!("Creating job: {}", payload.title);

        let request = self.client.post(&url).json(&payload);
        self.send(&url, request).await
    }

    async fn update_job(&self, id: JobId, payload: JobPayload) -> Result<JobPosting, ApiError> {
        let url = self.item_url(id);
        info!("Updating job {}", id);

        let request = self.client.put(&url).json(&payload);
        self.send(&url, request).await
    }

    async fn delete_job(&self, id: JobId) -> Result<(), ApiError> {
        let url = self.item_url(id);
        info!("Deleting job {}", id);

        let response = self.execute(&url, self.client.delete(&url)).await?;

        // The confirmation body is informational only
        let body = response.text().await.unwrap_or_default();
        if let Ok(DeleteResponse {
            message: Some(message),
        }) = serde_json::from_str(&body)
        {
            debug!("Delete confirmation for job {}: {}", id, message);
        }
        Ok(())
    }
}

/// Pull `message` (or `error`) out of a failure body. Bodies that are not
/// JSON carry no usable message.
pub fn extract_backend_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(ErrorBody::into_message)
}
