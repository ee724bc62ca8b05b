//! Pexels API HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, header};
use tracing::{debug, warn};

use super::api::CuratedPhotoApi;
use super::dto::{ErrorResponse, PageEnvelope};
use crate::domain::errors::FetchError;

/// Default Pexels API base URL.
pub const PEXELS_API_BASE: &str = "https://api.pexels.com/v1";
pub(crate) const USER_AGENT: &str = concat!("photogrid/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Pexels curated feed client.
pub struct PexelsClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl PexelsClient {
    /// Creates new client against the public API.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(api_key: Option<String>) -> Result<Self, FetchError> {
        Self::with_base_url(PEXELS_API_BASE, api_key, DEFAULT_TIMEOUT)
    }

    /// Creates client with custom base URL and request timeout.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn with_base_url(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::unexpected(format!("failed to create HTTP client: {e}")))?;

        let api_key = api_key.filter(|key| !key.trim().is_empty());
        if api_key.is_none() {
            warn!("No Pexels API key configured; requests will be rejected");
        }

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn curated_url(&self) -> String {
        format!("{}/curated", self.base_url)
    }

    async fn handle_error_response(status: StatusCode, response: reqwest::Response) -> FetchError {
        let reason = match response.json::<ErrorResponse>().await {
            Ok(body) => body.error,
            Err(_) => status.canonical_reason().unwrap_or_default().to_string(),
        };

        FetchError::http(status.as_u16(), reason)
    }
}

fn map_send_error(e: &reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::transport("request timed out")
    } else if e.is_connect() {
        FetchError::transport("failed to connect to Pexels")
    } else if e.is_request() || e.is_body() {
        FetchError::transport(e.to_string())
    } else {
        FetchError::unexpected(e.to_string())
    }
}

#[async_trait]
impl CuratedPhotoApi for PexelsClient {
    async fn fetch_curated_page(
        &self,
        page: u32,
        per_page: u32,
    ) -> Result<PageEnvelope, FetchError> {
        debug!(page, per_page, "Fetching curated page from Pexels");

        let mut request = self
            .client
            .get(self.curated_url())
            .query(&[("page", page), ("per_page", per_page)]);
        if let Some(key) = &self.api_key {
            request = request.header(header::AUTHORIZATION, key);
        }

        let response = request.send().await.map_err(|e| {
            warn!(error = %e, "Failed to reach Pexels API");
            map_send_error(&e)
        })?;

        let status = response.status();

        if !status.is_success() {
            return Err(Self::handle_error_response(status, response).await);
        }

        let envelope: PageEnvelope = response.json().await.map_err(|e| {
            warn!(error = %e, "Failed to parse curated page");
            if e.is_decode() {
                FetchError::unexpected(format!("failed to parse response: {e}"))
            } else {
                map_send_error(&e)
            }
        })?;

        debug!(
            page = envelope.page,
            count = envelope.photos.len(),
            total = envelope.total_results,
            "Curated page received"
        );

        Ok(envelope)
    }
}
