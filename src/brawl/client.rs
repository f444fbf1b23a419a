use std::fmt;
use std::num::NonZeroU32;
use std::sync::Arc;

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::Response;
use serde::de::DeserializeOwned;
use tracing::trace;

use super::types::ApiErrorDto;
use crate::error::AppError;

#[derive(Clone)]
pub struct BrawlClient {
    http: reqwest::Client,
    limiter: Arc<DefaultDirectRateLimiter>,
    api_key: String,
    base_url: String,
}

impl fmt::Debug for BrawlClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrawlClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl BrawlClient {
    pub fn new(api_key: String, base_url: String, rate_limit_per_second: NonZeroU32) -> Self {
        Self {
            http: reqwest::Client::new(),
            limiter: Arc::new(RateLimiter::direct(Quota::per_second(rate_limit_per_second))),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub(super) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Authenticated GET against the game API, waiting for the rate limiter.
    pub(super) async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, AppError> {
        self.limiter.until_ready().await;
        trace!(url, "🌐 GET");

        let response = self
            .http
            .get(url)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        read_json(response).await
    }

    /// GET against a public endpoint outside the game API.
    pub(super) async fn get_public<T: DeserializeOwned>(&self, url: &str) -> Result<T, AppError> {
        trace!(url, "🌐 GET");
        let response = self.http.get(url).send().await?;
        read_json(response).await
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response.json().await?);
    }

    let message = response
        .json::<ApiErrorDto>()
        .await
        .ok()
        .and_then(|body| body.reason.or(body.message))
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_string());

    Err(AppError::BrawlApi {
        status: status.as_u16(),
        message,
    })
}
