pub mod criteria;
pub mod engine;

pub use criteria::{FilterCriteria, PriceRange};
pub use engine::{apply, matches};
