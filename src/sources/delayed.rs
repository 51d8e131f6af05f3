use crate::models::NewListing;
use crate::sources::traits::ListingSubmitter;
use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Accepts every listing unchanged after a fixed delay, standing in for a
/// backend round trip.
pub struct DelayedSubmitter {
    delay: Duration,
}

impl DelayedSubmitter {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for DelayedSubmitter {
    fn default() -> Self {
        Self::new(Duration::from_millis(800))
    }
}

#[async_trait]
impl ListingSubmitter for DelayedSubmitter {
    async fn submit(&self, listing: NewListing) -> Result<NewListing> {
        debug!("Simulating submission of '{}'", listing.title());
        tokio::time::sleep(self.delay).await;
        Ok(listing)
    }

    fn submitter_name(&self) -> &'static str {
        "delayed"
    }
}
