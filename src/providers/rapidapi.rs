use crate::core::config::ProviderConfig;
use crate::core::provider::RateProvider;
use crate::core::rate::ApiRateSnapshot;
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use tracing::{debug, error, instrument};

const API_KEY_HEADER: &str = "x-rapidapi-key";
const API_HOST_HEADER: &str = "x-rapidapi-host";

/// Fetches rates from a RapidAPI-hosted exchange rate endpoint.
pub struct RapidApiProvider {
    url: String,
    api_key: String,
    host: String,
    client: reqwest::Client,
}

impl RapidApiProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("ratebook/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            host: config.host.clone(),
            client,
        })
    }

    async fn request_snapshot(&self) -> Result<ApiRateSnapshot> {
        debug!("Requesting rates from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .header(API_KEY_HEADER, &self.api_key)
            .header(API_HOST_HEADER, &self.host)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} URL: {}", e, self.url))?;

        debug!(status = %response.status(), "Received rates response");

        let response = response
            .error_for_status()
            .context("Rates API returned an error status")?;
        let body = response
            .text()
            .await
            .context("Failed to get response text")?;

        serde_json::from_str(&body).with_context(|| format!("Malformed rates response: {body}"))
    }
}

#[async_trait]
impl RateProvider for RapidApiProvider {
    #[instrument(name = "RatesFetch", skip(self), fields(url = %self.url))]
    async fn fetch_rates(&self) -> Option<ApiRateSnapshot> {
        match self.request_snapshot().await {
            Ok(snapshot) => {
                debug!(count = snapshot.rates.len(), "Fetched rates");
                Some(snapshot)
            }
            Err(e) => {
                error!(error = ?e, "Failed to fetch rates");
                None
            }
        }
    }
}
