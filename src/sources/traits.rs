use crate::models::{NewListing, PropertyRecord};
use anyhow::Result;
use async_trait::async_trait;

/// Where the listing store gets its initial listings from.
/// Implementations range from the built-in sample data to a remote API.
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Fetch the full listing sequence
    async fn fetch(&self) -> Result<Vec<PropertyRecord>>;

    /// Get the name of the listing source
    fn source_name(&self) -> &'static str;
}

/// Accepts a validated listing before it is committed to the store
#[async_trait]
pub trait ListingSubmitter: Send + Sync {
    /// Submit the listing, returning it as accepted by the backend
    async fn submit(&self, listing: NewListing) -> Result<NewListing>;

    fn submitter_name(&self) -> &'static str;
}
