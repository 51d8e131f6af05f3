//! Derivation of the visible listing list from the current criteria.
//!
//! Everything here is pure: the same criteria and listings always give the
//! same result, in the same relative order as the input.

use crate::filters::criteria::{FilterCriteria, PriceRange};
use crate::models::{ListingStatus, PropertyRecord, PropertyType};

/// Sale buckets are expressed in thousands of dollars
const SALE_BUCKET_SCALE: f64 = 1000.0;

/// Keep the listings matching every set criterion, preserving input order.
pub fn apply(criteria: &FilterCriteria, listings: &[PropertyRecord]) -> Vec<PropertyRecord> {
    listings
        .iter()
        .filter(|property| matches(criteria, property))
        .cloned()
        .collect()
}

/// Conjunction of all predicates. Unset fields never exclude a listing.
pub fn matches(criteria: &FilterCriteria, property: &PropertyRecord) -> bool {
    matches_location(&criteria.location, property)
        && matches_type(criteria.property_type, property)
        && matches_price(criteria.price_range, property)
        && matches_bedrooms(criteria.bedrooms, property)
        && matches_status(criteria.status, property)
}

pub fn matches_location(location: &str, property: &PropertyRecord) -> bool {
    if location.is_empty() {
        return true;
    }
    property
        .address
        .city
        .to_lowercase()
        .contains(&location.to_lowercase())
}

pub fn matches_type(property_type: Option<PropertyType>, property: &PropertyRecord) -> bool {
    property_type.map_or(true, |wanted| property.property_type == wanted)
}

/// Bucket check with status-dependent scaling: rents are compared against
/// the raw bounds, sale prices against the bounds times 1000. Both bounds
/// are inclusive.
pub fn matches_price(range: PriceRange, property: &PropertyRecord) -> bool {
    let Some((min, max)) = range.bounds() else {
        return true;
    };

    let scale = match property.status {
        ListingStatus::ForRent => 1.0,
        ListingStatus::ForSale => SALE_BUCKET_SCALE,
    };

    property.price >= min * scale && max.map_or(true, |max| property.price <= max * scale)
}

pub fn matches_bedrooms(min_bedrooms: Option<u32>, property: &PropertyRecord) -> bool {
    min_bedrooms.map_or(true, |min| property.bedrooms >= min)
}

pub fn matches_status(status: Option<ListingStatus>, property: &PropertyRecord) -> bool {
    status.map_or(true, |wanted| property.status == wanted)
}
