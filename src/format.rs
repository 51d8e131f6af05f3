//! Display strings shown on listing cards.

use crate::models::{ListingStatus, PropertyRecord};

/// `$750,000` for sales, `$2,500/month` for rentals
pub fn format_price(price: f64, status: ListingStatus) -> String {
    let amount = group_thousands(price);
    match status {
        ListingStatus::ForRent => format!("${}/month", amount),
        ListingStatus::ForSale => format!("${}", amount),
    }
}

pub fn bedrooms_label(bedrooms: u32) -> String {
    if bedrooms == 1 {
        "1 Bed".to_string()
    } else {
        format!("{} Beds", bedrooms)
    }
}

pub fn bathrooms_label(bathrooms: f64) -> String {
    if bathrooms == 1.0 {
        "1 Bath".to_string()
    } else {
        format!("{} Baths", bathrooms)
    }
}

/// One-line summary, e.g. `Charming Cottage (Portland, OR) $1,800/month`
pub fn summary(property: &PropertyRecord) -> String {
    format!(
        "{} ({}, {}) {}",
        property.title,
        property.address.city,
        property.address.state,
        format_price(property.price, property.status)
    )
}

// en-US grouping with at most three fraction digits
fn group_thousands(value: f64) -> String {
    let rendered = format!("{:.3}", value.abs());
    let (whole, fraction) = rendered.split_once('.').unwrap_or((rendered.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    if fraction.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, fraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::seed_listings;

    #[test]
    fn test_format_price_by_status() {
        assert_eq!(format_price(2500.0, ListingStatus::ForRent), "$2,500/month");
        assert_eq!(format_price(750_000.0, ListingStatus::ForSale), "$750,000");
        assert_eq!(format_price(1_200_000.0, ListingStatus::ForSale), "$1,200,000");
        assert_eq!(format_price(950.0, ListingStatus::ForRent), "$950/month");
        assert_eq!(format_price(1234.5, ListingStatus::ForSale), "$1,234.5");
    }

    #[test]
    fn test_labels_pluralize() {
        assert_eq!(bedrooms_label(1), "1 Bed");
        assert_eq!(bedrooms_label(3), "3 Beds");
        assert_eq!(bathrooms_label(1.0), "1 Bath");
        assert_eq!(bathrooms_label(2.5), "2.5 Baths");
        assert_eq!(bathrooms_label(2.0), "2 Baths");
    }

    #[test]
    fn test_summary() {
        let cottage = &seed_listings()[3];
        assert_eq!(summary(cottage), "Charming Cottage (Portland, OR) $1,800/month");
    }
}
