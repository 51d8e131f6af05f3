pub mod delayed;
pub mod http;
pub mod seed;
pub mod traits;

pub use delayed::DelayedSubmitter;
pub use http::{HttpListingSource, HttpSubmitter};
pub use seed::{seed_listings, SeedListingSource};
pub use traits::{ListingSource, ListingSubmitter};
