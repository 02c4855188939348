//! HTTP implementation of the DirectoryClient trait

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, instrument};

use alliance_core::entities::Roster;
use alliance_core::traits::{DirectoryClient, DirectoryError};

use crate::wire::WireRoster;

/// Configuration for the HTTP directory client
#[derive(Debug, Clone)]
pub struct HttpDirectoryConfig {
    /// Base URL of the roster endpoint, without trailing slash
    pub base_url: String,
    /// Game dimension (server shard) the rosters belong to
    pub dimension: u8,
    /// Client-side request timeout
    pub request_timeout: Duration,
}

impl Default for HttpDirectoryConfig {
    fn default() -> Self {
        Self {
            base_url: "http://people.anarchy-online.com/org/stats".to_string(),
            dimension: 5,
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// HTTP roster fetcher for the remote people directory
#[derive(Clone)]
pub struct HttpDirectoryClient {
    client: reqwest::Client,
    config: HttpDirectoryConfig,
}

impl HttpDirectoryClient {
    /// Create a new client. Fails only if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(config: HttpDirectoryConfig) -> Result<Self, DirectoryError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| DirectoryError::Request(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn roster_url(&self, org_id: i32, force_refresh: bool) -> String {
        let mut url = format!(
            "{}/d/{}/name/{}/basicstats.xml?data_type=json",
            self.config.base_url, self.config.dimension, org_id
        );
        if force_refresh {
            // cache-buster so intermediaries hand back a fresh snapshot
            url.push_str(&format!("&ts={}", Utc::now().timestamp()));
        }
        url
    }
}

#[async_trait]
impl DirectoryClient for HttpDirectoryClient {
    #[instrument(skip(self))]
    async fn fetch_roster(
        &self,
        org_id: i32,
        force_refresh: bool,
    ) -> Result<Roster, DirectoryError> {
        let url = self.roster_url(org_id, force_refresh);
        debug!(url = %url, "Fetching org roster");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DirectoryError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryError::Status(status.as_u16()));
        }

        let wire: WireRoster = response
            .json()
            .await
            .map_err(|e| DirectoryError::Decode(e.to_string()))?;

        Ok(wire.into_roster())
    }
}
