use crate::error::StoreError;
use crate::models::{NewListing, PropertyRecord};
use chrono::Utc;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Canonical in-memory listing sequence.
///
/// The store starts out pending and is populated exactly once; afterwards it
/// only grows through [`ListingStore::add`]. Insertion order is preserved.
#[derive(Debug, Default)]
pub struct ListingStore {
    listings: Vec<PropertyRecord>,
    ready: bool,
    last_id: i64,
}

impl ListingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Fill the store from a completed fetch. Only the first call succeeds.
    /// A fetch repeating an id is rejected whole and the store stays pending.
    pub fn initialize(&mut self, listings: Vec<PropertyRecord>) -> Result<(), StoreError> {
        if self.ready {
            return Err(StoreError::AlreadyPopulated);
        }
        let mut seen = HashSet::with_capacity(listings.len());
        if let Some(dup) = listings.iter().find(|p| !seen.insert(p.id)) {
            warn!("Fetched listings repeat id {}", dup.id);
            return Err(StoreError::DuplicateId(dup.id));
        }
        self.last_id = listings.iter().map(|p| p.id).max().unwrap_or(0);
        info!("Listing store populated with {} listings", listings.len());
        self.listings = listings;
        self.ready = true;
        Ok(())
    }

    /// Append a listing under a fresh id and return the committed record.
    /// The listing is re-checked against the draft rules first, so nothing
    /// invalid is ever stored.
    pub fn add(&mut self, listing: NewListing) -> Result<PropertyRecord, StoreError> {
        if !self.ready {
            return Err(StoreError::NotReady);
        }
        let errors = listing.validate();
        if !errors.is_empty() {
            return Err(StoreError::InvalidListing(errors));
        }
        let id = self.next_id()?;
        let record = listing.into_record(id);
        debug!("Added listing {} ('{}')", record.id, record.title);
        self.listings.push(record.clone());
        Ok(record)
    }

    /// Current listings, empty while pending
    pub fn all(&self) -> &[PropertyRecord] {
        &self.listings
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    // Creation-time milliseconds, bumped so ids stay unique even when two
    // listings land within the same millisecond.
    fn next_id(&mut self) -> Result<i64, StoreError> {
        let floor = self.last_id.checked_add(1).ok_or(StoreError::IdsExhausted)?;
        let id = Utc::now().timestamp_millis().max(floor);
        self.last_id = id;
        Ok(id)
    }
}
