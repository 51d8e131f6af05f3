use crate::models::{NewListing, PropertyRecord};
use crate::sources::traits::{ListingSource, ListingSubmitter};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

const USER_AGENT: &str = concat!("dwelldex/", env!("CARGO_PKG_VERSION"));

fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .context("Failed to create HTTP client")
}

/// Fetches listings as a JSON array from a remote endpoint
pub struct HttpListingSource {
    client: Client,
    url: String,
}

impl HttpListingSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            url: url.into(),
        })
    }
}

#[async_trait]
impl ListingSource for HttpListingSource {
    async fn fetch(&self) -> Result<Vec<PropertyRecord>> {
        debug!("Fetching URL: {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .context("Failed to fetch listings")?;

        if !response.status().is_success() {
            warn!("Listing endpoint returned status: {}", response.status());
            anyhow::bail!("Failed to fetch listings: {}", response.status());
        }

        let listings: Vec<PropertyRecord> = response
            .json()
            .await
            .context("Failed to decode listings")?;

        info!("Fetched {} listings from {}", listings.len(), self.url);
        Ok(listings)
    }

    fn source_name(&self) -> &'static str {
        "http"
    }
}

/// Posts new listings as JSON and reads back the accepted listing
pub struct HttpSubmitter {
    client: Client,
    url: String,
}

impl HttpSubmitter {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            url: url.into(),
        })
    }
}

#[async_trait]
impl ListingSubmitter for HttpSubmitter {
    async fn submit(&self, listing: NewListing) -> Result<NewListing> {
        debug!("Posting listing '{}' to {}", listing.title(), self.url);

        let response = self
            .client
            .post(&self.url)
            .json(&listing)
            .send()
            .await
            .context("Failed to submit listing")?;

        if !response.status().is_success() {
            warn!("Submission endpoint returned status: {}", response.status());
            anyhow::bail!("Failed to submit listing: {}", response.status());
        }

        response
            .json()
            .await
            .context("Failed to decode submitted listing")
    }

    fn submitter_name(&self) -> &'static str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_endpoint_is_an_error() {
        let source =
            HttpListingSource::new("http://127.0.0.1:9/listings", Duration::from_secs(2)).unwrap();
        let err = source.fetch().await.unwrap_err();
        assert!(err.to_string().contains("Failed to fetch listings"));
        assert_eq!(source.source_name(), "http");
    }
}
