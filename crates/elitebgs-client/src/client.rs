//! HTTP client for the statistics API, plus the trait seam the bot consumes.

use std::future::Future;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{EbgsFaction, EbgsResponse, EbgsSystem};

/// Default public EliteBGS endpoint.
pub const DEFAULT_BASE_URL: &str = "https://elitebgs.app/api/ebgs/v4";

/// Single-lookup contract against the statistics API.
///
/// `Ok(None)` is the not-found outcome; `Err` is a transport-level failure.
pub trait EbgsApi: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    fn fetch_system(
        &self,
        name: &str,
    ) -> impl Future<Output = std::result::Result<Option<EbgsSystem>, Self::Error>> + Send;

    fn fetch_faction(
        &self,
        name: &str,
    ) -> impl Future<Output = std::result::Result<Option<EbgsFaction>, Self::Error>> + Send;
}

/// `reqwest`-backed [`EbgsApi`] implementation.
#[derive(Debug, Clone)]
pub struct EbgsClient {
    http: reqwest::Client,
    base_url: String,
}

impl EbgsClient {
    /// Build a client with a per-request timeout. Timeouts surface as
    /// transport errors, like any other connection failure.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch_one<T: DeserializeOwned>(&self, path: &str, name: &str) -> Result<Option<T>> {
        let url = format!("{}/{}", self.base_url, path);
        let response = self
            .http
            .get(&url)
            .query(&[("name", name.to_lowercase())])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Error::Status(response.status()));
        }
        let body: EbgsResponse<T> = response.json().await?;
        debug!("{} lookup for {:?}: {} match(es)", path, name, body.total);
        Ok(body.docs.into_iter().next())
    }
}

impl EbgsApi for EbgsClient {
    type Error = Error;

    async fn fetch_system(&self, name: &str) -> Result<Option<EbgsSystem>> {
        self.fetch_one("systems", name).await
    }

    async fn fetch_faction(&self, name: &str) -> Result<Option<EbgsFaction>> {
        self.fetch_one("factions", name).await
    }
}
