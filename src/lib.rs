pub mod config;
pub mod draft;
pub mod error;
pub mod favorites;
pub mod filters;
pub mod format;
pub mod models;
pub mod session;
pub mod sources;
pub mod store;

pub use config::AppConfig;
pub use draft::{DraftField, DraftForm, PropertyDraft, ValidationErrors};
pub use error::{CriteriaError, DraftError, SessionError, StoreError};
pub use favorites::{FavoriteChange, FavoriteSet};
pub use filters::{FilterCriteria, PriceRange};
pub use models::{Address, ListingStatus, NewListing, PropertyRecord, PropertyType};
pub use session::{BrowsingSession, Notice, ViewMode};
pub use store::ListingStore;
