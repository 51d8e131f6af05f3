//! Browsing session state: the listing store, the current criteria, the
//! favorites and the add-property form, plus the derived filtered view.
//!
//! All mutation goes through `&mut self`, so a pending fetch or submission
//! blocks every other event and the filtered view is always re-derived to
//! completion before the next one is handled.

use crate::config::AppConfig;
use crate::draft::DraftForm;
use crate::error::{DraftError, SessionError, StoreError};
use crate::favorites::{FavoriteChange, FavoriteSet};
use crate::filters::{self, FilterCriteria};
use crate::models::PropertyRecord;
use crate::sources::{
    DelayedSubmitter, HttpListingSource, HttpSubmitter, ListingSource, ListingSubmitter,
    SeedListingSource,
};
use crate::store::ListingStore;
use anyhow::Result;
use serde::Serialize;
use std::fmt;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Number of listings previewed under the map
const MAP_PREVIEW_LEN: usize = 3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    Map,
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewMode::Grid => f.write_str("grid"),
            ViewMode::Map => f.write_str("map"),
        }
    }
}

/// User-facing event for the presentation layer to show as a toast
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    FiltersApplied,
    FavoriteAdded(i64),
    FavoriteRemoved(i64),
    ViewSwitched(ViewMode),
    PropertyAdded(i64),
    FormInvalid,
    SubmitFailed,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::FiltersApplied => f.write_str("Filters applied successfully!"),
            Notice::FavoriteAdded(_) => f.write_str("Added to favorites"),
            Notice::FavoriteRemoved(_) => f.write_str("Removed from favorites"),
            Notice::ViewSwitched(mode) => write!(f, "Switched to {} view", mode),
            Notice::PropertyAdded(_) => f.write_str("Property added successfully!"),
            Notice::FormInvalid => f.write_str("Please fix the errors in the form"),
            Notice::SubmitFailed => f.write_str("Failed to add property. Please try again."),
        }
    }
}

pub struct BrowsingSession {
    store: ListingStore,
    criteria: FilterCriteria,
    favorites: FavoriteSet,
    view: Vec<PropertyRecord>,
    view_mode: ViewMode,
    form: Option<DraftForm>,
    notices: Vec<Notice>,
    source: Box<dyn ListingSource>,
    submitter: Box<dyn ListingSubmitter>,
    cancel: CancellationToken,
}

impl BrowsingSession {
    pub fn new(source: Box<dyn ListingSource>, submitter: Box<dyn ListingSubmitter>) -> Self {
        Self {
            store: ListingStore::new(),
            criteria: FilterCriteria::any(),
            favorites: FavoriteSet::new(),
            view: Vec::new(),
            view_mode: ViewMode::default(),
            form: None,
            notices: Vec::new(),
            source,
            submitter,
            cancel: CancellationToken::new(),
        }
    }

    /// Pick HTTP or simulated endpoints depending on the config
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let source: Box<dyn ListingSource> = match &config.source_url {
            Some(url) => Box::new(HttpListingSource::new(url.clone(), config.http_timeout)?),
            None => Box::new(SeedListingSource::new(config.fetch_delay)),
        };
        let submitter: Box<dyn ListingSubmitter> = match &config.submit_url {
            Some(url) => Box::new(HttpSubmitter::new(url.clone(), config.http_timeout)?),
            None => Box::new(DelayedSubmitter::new(config.submit_delay)),
        };
        Ok(Self::new(source, submitter))
    }

    /// Populate the store from the listing source. Runs the fetch at most
    /// once successfully; later calls return the current count.
    pub async fn load(&mut self) -> Result<usize, SessionError> {
        if self.store.is_ready() {
            debug!("Listings already loaded, skipping fetch");
            return Ok(self.store.len());
        }

        let source_name = self.source.source_name();
        info!("Loading listings from {} source", source_name);

        let cancel = self.cancel.clone();
        let fetched = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                warn!("Listing load cancelled, discarding result");
                return Err(SessionError::Cancelled);
            }
            result = self.source.fetch() => result,
        };

        let listings = fetched.map_err(|e| {
            warn!("Failed to load listings: {:#}", e);
            SessionError::Fetch {
                source_name,
                reason: format!("{:#}", e),
            }
        })?;

        self.store.initialize(listings)?;
        self.refresh();
        Ok(self.store.len())
    }

    pub fn is_loading(&self) -> bool {
        !self.store.is_ready()
    }

    /// Every listing in insertion order
    pub fn listings(&self) -> &[PropertyRecord] {
        self.store.all()
    }

    /// Listings matching the current criteria
    pub fn filtered(&self) -> &[PropertyRecord] {
        &self.view
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn set_filter(&mut self, name: &str, value: &str) -> Result<(), SessionError> {
        self.criteria.set(name, value)?;
        self.refresh();
        Ok(())
    }

    pub fn reset_filters(&mut self) {
        self.criteria.reset();
        self.refresh();
    }

    /// Explicit search submit. The view is already current, so this only
    /// confirms to the user.
    pub fn apply_filters(&mut self) -> &[PropertyRecord] {
        self.notify(Notice::FiltersApplied);
        &self.view
    }

    pub fn toggle_favorite(&mut self, id: i64) -> FavoriteChange {
        let change = self.favorites.toggle(id);
        self.notify(match change {
            FavoriteChange::Added => Notice::FavoriteAdded(id),
            FavoriteChange::Removed => Notice::FavoriteRemoved(id),
        });
        change
    }

    pub fn is_favorite(&self, id: i64) -> bool {
        self.favorites.contains(id)
    }

    pub fn favorites(&self) -> &FavoriteSet {
        &self.favorites
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
        self.notify(Notice::ViewSwitched(mode));
    }

    /// The first few filtered listings shown beside the map
    pub fn map_preview(&self) -> &[PropertyRecord] {
        &self.view[..self.view.len().min(MAP_PREVIEW_LEN)]
    }

    /// Open the add-property form, keeping an already open draft
    pub fn open_form(&mut self) -> &mut DraftForm {
        self.form.get_or_insert_with(DraftForm::new)
    }

    pub fn close_form(&mut self) {
        if self.form.take().is_some() {
            debug!("Add-property form closed");
        }
    }

    pub fn form(&self) -> Option<&DraftForm> {
        self.form.as_ref()
    }

    pub fn edit_form(&mut self, name: &str, value: &str) -> Result<(), SessionError> {
        let form = self.form.as_mut().ok_or(SessionError::NoOpenForm)?;
        form.edit(name, value)?;
        Ok(())
    }

    /// Validate and submit the open form.
    ///
    /// Invalid drafts record their errors on the form and change nothing
    /// else. A failed or cancelled submission leaves the form open and the
    /// store untouched. On success the listing is committed, the view
    /// re-derived and the form closed.
    pub async fn submit_form(&mut self) -> Result<PropertyRecord, SessionError> {
        if !self.store.is_ready() {
            return Err(StoreError::NotReady.into());
        }
        let form = self.form.as_mut().ok_or(SessionError::NoOpenForm)?;

        let errors = form.draft.validate();
        if !errors.is_empty() {
            form.errors = errors.clone();
            self.notify(Notice::FormInvalid);
            return Err(SessionError::InvalidDraft(errors));
        }

        let listing = match form.draft.clone().into_listing() {
            Ok(listing) => listing,
            Err(DraftError::Invalid(errors)) => return Err(SessionError::InvalidDraft(errors)),
            Err(e) => {
                warn!("Could not prepare listing: {}", e);
                self.notify(Notice::SubmitFailed);
                return Err(SessionError::Submit(e.to_string()));
            }
        };

        form.submitting = true;
        info!(
            "Submitting '{}' via {} submitter",
            listing.title(),
            self.submitter.submitter_name()
        );

        let cancel = self.cancel.clone();
        let submitted = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            result = self.submitter.submit(listing) => Some(result),
        };

        if let Some(form) = self.form.as_mut() {
            form.submitting = false;
        }

        let accepted = match submitted {
            None => {
                warn!("Submission cancelled, discarding result");
                return Err(SessionError::Cancelled);
            }
            Some(Err(e)) => {
                warn!("Submission failed: {:#}", e);
                self.notify(Notice::SubmitFailed);
                return Err(SessionError::Submit(format!("{:#}", e)));
            }
            Some(Ok(accepted)) => accepted,
        };

        let record = match self.store.add(accepted) {
            Ok(record) => record,
            Err(StoreError::InvalidListing(errors)) => {
                let fields: Vec<_> = errors.fields().map(|f| f.as_str()).collect();
                warn!("Submitter returned an invalid listing ({})", fields.join(", "));
                self.notify(Notice::SubmitFailed);
                return Err(SessionError::Submit(format!(
                    "backend returned an invalid listing: {}",
                    fields.join(", ")
                )));
            }
            Err(e) => return Err(e.into()),
        };
        info!("Added listing {} ('{}')", record.id, record.title);
        self.refresh();
        self.notify(Notice::PropertyAdded(record.id));
        self.form = None;
        Ok(record)
    }

    /// Token that discards pending fetches and submissions when cancelled
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn shutdown(&self) {
        info!("Shutting down browsing session");
        self.cancel.cancel();
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn notify(&mut self, notice: Notice) {
        info!("{}", notice);
        self.notices.push(notice);
    }

    fn refresh(&mut self) {
        self.view = if self.store.is_ready() {
            filters::apply(&self.criteria, self.store.all())
        } else {
            Vec::new()
        };
        debug!(
            "Filtered view: {} of {} listings",
            self.view.len(),
            self.store.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::DraftField;
    use crate::models::NewListing;
    use crate::sources::seed_listings;
    use async_trait::async_trait;
    use std::time::Duration;

    struct FailingSource;

    #[async_trait]
    impl ListingSource for FailingSource {
        async fn fetch(&self) -> Result<Vec<PropertyRecord>> {
            anyhow::bail!("connection refused")
        }

        fn source_name(&self) -> &'static str {
            "failing"
        }
    }

    struct FailingSubmitter;

    #[async_trait]
    impl ListingSubmitter for FailingSubmitter {
        async fn submit(&self, _listing: NewListing) -> Result<NewListing> {
            anyhow::bail!("backend unavailable")
        }

        fn submitter_name(&self) -> &'static str {
            "failing"
        }
    }

    /// Echoes back a listing with its title blanked and bad numbers
    struct CorruptingSubmitter;

    #[async_trait]
    impl ListingSubmitter for CorruptingSubmitter {
        async fn submit(&self, listing: NewListing) -> Result<NewListing> {
            let mut echoed = listing;
            echoed.title = String::new();
            echoed.price = -5.0;
            echoed.bedrooms = 0;
            Ok(echoed)
        }

        fn submitter_name(&self) -> &'static str {
            "corrupting"
        }
    }

    struct DuplicatingSource;

    #[async_trait]
    impl ListingSource for DuplicatingSource {
        async fn fetch(&self) -> Result<Vec<PropertyRecord>> {
            let mut listings = seed_listings();
            listings[3].id = 1;
            Ok(listings)
        }

        fn source_name(&self) -> &'static str {
            "duplicating"
        }
    }

    fn session() -> BrowsingSession {
        BrowsingSession::new(
            Box::new(SeedListingSource::default()),
            Box::new(DelayedSubmitter::default()),
        )
    }

    async fn loaded_session() -> BrowsingSession {
        let mut session = session();
        session.load().await.unwrap();
        session
    }

    fn fill_form(session: &mut BrowsingSession) {
        session.open_form();
        for (name, value) in [
            ("title", "Harbor Condo"),
            ("description", "Walk to the ferry"),
            ("type", "apartment"),
            ("status", "for-rent"),
            ("price", "2100"),
            ("area", "900"),
            ("bedrooms", "2"),
            ("bathrooms", "1.5"),
            ("image", "https://example.com/condo.jpg"),
            ("address.street", "77 Pier St"),
            ("address.city", "Seattle"),
            ("address.state", "WA"),
            ("address.zipCode", "98101"),
        ] {
            session.edit_form(name, value).unwrap();
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_view_is_empty_until_loaded() {
        let mut session = session();
        assert!(session.is_loading());
        session.set_filter("status", "for-rent").unwrap();
        assert!(session.filtered().is_empty());

        assert_eq!(session.load().await.unwrap(), 6);
        assert!(!session.is_loading());
        assert_eq!(session.filtered().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_runs_once() {
        let mut session = loaded_session().await;
        let started = tokio::time::Instant::now();
        assert_eq!(session.load().await.unwrap(), 6);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_load_stays_pending() {
        let mut session =
            BrowsingSession::new(Box::new(FailingSource), Box::new(DelayedSubmitter::default()));

        let err = session.load().await.unwrap_err();
        assert!(matches!(err, SessionError::Fetch { source_name: "failing", .. }));
        assert!(session.is_loading());
        assert!(session.listings().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_filters_rederive_on_every_change() {
        let mut session = loaded_session().await;
        assert_eq!(session.filtered().len(), 6);

        session.set_filter("type", "house").unwrap();
        assert_eq!(session.filtered().len(), 3);
        session.set_filter("status", "for-rent").unwrap();
        let titles: Vec<_> = session.filtered().iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["Charming Cottage", "Mountain Retreat"]);

        assert!(session.set_filter("status", "sold").is_err());
        assert_eq!(session.filtered().len(), 2);

        session.reset_filters();
        assert_eq!(session.filtered(), seed_listings().as_slice());
    }

    #[tokio::test(start_paused = true)]
    async fn test_apply_filters_notifies() {
        let mut session = loaded_session().await;
        session.set_filter("bedrooms", "3").unwrap();
        assert_eq!(session.apply_filters().len(), 3);
        assert_eq!(session.take_notices(), [Notice::FiltersApplied]);
        assert!(session.take_notices().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_favorites_survive_filtering() {
        let mut session = loaded_session().await;
        assert_eq!(session.toggle_favorite(2), FavoriteChange::Added);

        session.set_filter("status", "for-rent").unwrap();
        assert!(session.filtered().iter().all(|p| p.id != 2));
        assert!(session.is_favorite(2));

        assert_eq!(session.toggle_favorite(2), FavoriteChange::Removed);
        assert_eq!(
            session.take_notices(),
            [Notice::FavoriteAdded(2), Notice::FavoriteRemoved(2)]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_map_preview_takes_first_three() {
        let mut session = loaded_session().await;
        session.set_view_mode(ViewMode::Map);
        assert_eq!(session.view_mode(), ViewMode::Map);
        let ids: Vec<_> = session.map_preview().iter().map(|p| p.id).collect();
        assert_eq!(ids, [1, 2, 3]);

        session.set_filter("type", "land").unwrap();
        assert!(session.map_preview().is_empty());
        assert_eq!(
            session.take_notices()[0].to_string(),
            "Switched to map view"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_adds_listing_and_closes_form() {
        let mut session = loaded_session().await;
        session.set_filter("location", "seattle").unwrap();
        assert!(session.filtered().is_empty());

        fill_form(&mut session);
        let record = session.submit_form().await.unwrap();

        assert_eq!(record.title, "Harbor Condo");
        assert_eq!(record.bathrooms, 1.5);
        assert_eq!(session.listings().len(), 7);
        assert_eq!(session.filtered(), std::slice::from_ref(&record));
        assert!(session.form().is_none());
        assert_eq!(session.take_notices(), [Notice::PropertyAdded(record.id)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_form_blocks_submission() {
        let mut session = loaded_session().await;
        fill_form(&mut session);
        session.edit_form("title", "").unwrap();
        session.edit_form("price", "-5").unwrap();

        match session.submit_form().await {
            Err(SessionError::InvalidDraft(errors)) => assert_eq!(errors.len(), 2),
            other => panic!("expected invalid draft, got {:?}", other),
        }

        let form = session.form().unwrap();
        assert!(form.errors.contains(DraftField::Title));
        assert!(form.errors.contains(DraftField::Price));
        assert!(!form.submitting);
        assert_eq!(session.listings().len(), 6);
        assert_eq!(session.take_notices(), [Notice::FormInvalid]);

        session.edit_form("title", "Fixed").unwrap();
        assert!(!session.form().unwrap().errors.contains(DraftField::Title));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_submission_keeps_form_open() {
        let mut session =
            BrowsingSession::new(Box::new(SeedListingSource::default()), Box::new(FailingSubmitter));
        session.load().await.unwrap();
        fill_form(&mut session);

        let err = session.submit_form().await.unwrap_err();
        assert!(matches!(err, SessionError::Submit(ref msg) if msg.contains("backend unavailable")));
        assert_eq!(session.listings().len(), 6);

        let form = session.form().unwrap();
        assert!(!form.submitting);
        assert_eq!(form.draft.title, "Harbor Condo");
        assert_eq!(session.take_notices(), [Notice::SubmitFailed]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_echo_is_a_submission_failure() {
        let mut session =
            BrowsingSession::new(Box::new(SeedListingSource::default()), Box::new(CorruptingSubmitter));
        session.load().await.unwrap();
        fill_form(&mut session);

        let err = session.submit_form().await.unwrap_err();
        assert!(matches!(err, SessionError::Submit(ref msg) if msg.contains("title")));
        assert_eq!(session.listings().len(), 6);
        assert!(session.listings().iter().all(|p| !p.title.is_empty()));

        let form = session.form().unwrap();
        assert!(!form.submitting);
        assert_eq!(form.draft.title, "Harbor Condo");
        assert_eq!(session.take_notices(), [Notice::SubmitFailed]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_duplicate_ids_keep_session_loading() {
        let mut session = BrowsingSession::new(
            Box::new(DuplicatingSource),
            Box::new(DelayedSubmitter::default()),
        );

        let err = session.load().await.unwrap_err();
        assert!(matches!(err, SessionError::Store(StoreError::DuplicateId(1))));
        assert!(session.is_loading());
        assert!(session.filtered().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_without_form() {
        let mut session = loaded_session().await;
        assert!(matches!(
            session.submit_form().await,
            Err(SessionError::NoOpenForm)
        ));
        assert!(matches!(
            session.edit_form("title", "x"),
            Err(SessionError::NoOpenForm)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_discards_pending_load() {
        let mut session = session();
        let token = session.cancel_token();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            token.cancel();
        });

        assert!(matches!(session.load().await, Err(SessionError::Cancelled)));
        assert!(session.is_loading());
        assert!(session.listings().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_discards_pending_submission() {
        let mut session = loaded_session().await;
        fill_form(&mut session);

        let token = session.cancel_token();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            token.cancel();
        });

        assert!(matches!(session.submit_form().await, Err(SessionError::Cancelled)));
        assert_eq!(session.listings().len(), 6);
        assert!(session.form().is_some());

        session.shutdown();
        assert!(matches!(session.submit_form().await, Err(SessionError::Cancelled)));
    }
}
