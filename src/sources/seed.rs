use crate::models::{Address, ListingStatus, PropertyRecord, PropertyType};
use crate::sources::traits::ListingSource;
use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;
use tracing::info;

/// Listing source that serves the built-in sample listings after a delay,
/// standing in for a remote fetch.
pub struct SeedListingSource {
    delay: Duration,
}

impl SeedListingSource {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SeedListingSource {
    fn default() -> Self {
        Self::new(Duration::from_millis(1500))
    }
}

#[async_trait]
impl ListingSource for SeedListingSource {
    async fn fetch(&self) -> Result<Vec<PropertyRecord>> {
        info!("Loading sample listings ({} ms simulated latency)", self.delay.as_millis());
        tokio::time::sleep(self.delay).await;
        Ok(seed_listings())
    }

    fn source_name(&self) -> &'static str {
        "seed"
    }
}

fn address(street: &str, city: &str, state: &str, zip_code: &str) -> Address {
    Address {
        street: street.to_string(),
        city: city.to_string(),
        state: state.to_string(),
        zip_code: zip_code.to_string(),
        country: "USA".to_string(),
    }
}

/// The six sample listings every fresh session starts from
pub fn seed_listings() -> Vec<PropertyRecord> {
    vec![
        PropertyRecord {
            id: 1,
            title: "Modern Apartment with City View".to_string(),
            description: "Stunning apartment with panoramic city views, modern finishes, and open floor plan".to_string(),
            property_type: PropertyType::Apartment,
            status: ListingStatus::ForRent,
            price: 2500.0,
            bedrooms: 2,
            bathrooms: 2.0,
            area: 1200.0,
            year_built: 2019,
            image: "https://images.unsplash.com/photo-1522708323590-d24dbb6b0267?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop&w=2340&q=80".to_string(),
            address: address("123 Main St", "San Francisco", "CA", "94105"),
        },
        PropertyRecord {
            id: 2,
            title: "Spacious Family Home".to_string(),
            description: "Beautiful family home with large backyard, updated kitchen, and spacious bedrooms".to_string(),
            property_type: PropertyType::House,
            status: ListingStatus::ForSale,
            price: 750_000.0,
            bedrooms: 4,
            bathrooms: 3.0,
            area: 2800.0,
            year_built: 2005,
            image: "https://images.unsplash.com/photo-1564013799919-ab600027ffc6?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop&w=2340&q=80".to_string(),
            address: address("456 Oak Drive", "Austin", "TX", "73301"),
        },
        PropertyRecord {
            id: 3,
            title: "Luxury Penthouse".to_string(),
            description: "Exclusive penthouse with private terrace, high-end appliances, and breathtaking views".to_string(),
            property_type: PropertyType::Apartment,
            status: ListingStatus::ForSale,
            price: 1_200_000.0,
            bedrooms: 3,
            bathrooms: 3.5,
            area: 2200.0,
            year_built: 2020,
            image: "https://images.unsplash.com/photo-1512917774080-9991f1c4c750?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop&w=2340&q=80".to_string(),
            address: address("789 Skyline Blvd", "Miami", "FL", "33101"),
        },
        PropertyRecord {
            id: 4,
            title: "Charming Cottage".to_string(),
            description: "Cozy cottage with character, updated while maintaining historic charm".to_string(),
            property_type: PropertyType::House,
            status: ListingStatus::ForRent,
            price: 1800.0,
            bedrooms: 2,
            bathrooms: 1.0,
            area: 1100.0,
            year_built: 1935,
            image: "https://images.unsplash.com/photo-1605276374104-dee2a0ed3cd6?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop&w=2340&q=80".to_string(),
            address: address("321 Maple Lane", "Portland", "OR", "97204"),
        },
        PropertyRecord {
            id: 5,
            title: "Downtown Loft".to_string(),
            description: "Industrial chic loft in the heart of downtown with exposed brick and high ceilings".to_string(),
            property_type: PropertyType::Apartment,
            status: ListingStatus::ForSale,
            price: 550_000.0,
            bedrooms: 1,
            bathrooms: 1.5,
            area: 950.0,
            year_built: 2008,
            image: "https://images.unsplash.com/photo-1560448204-e02f11c3d0e2?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop&w=2340&q=80".to_string(),
            address: address("555 Urban St", "Chicago", "IL", "60601"),
        },
        PropertyRecord {
            id: 6,
            title: "Mountain Retreat".to_string(),
            description: "Secluded mountain home with stunning views, perfect for nature lovers".to_string(),
            property_type: PropertyType::House,
            status: ListingStatus::ForRent,
            price: 3200.0,
            bedrooms: 3,
            bathrooms: 2.0,
            area: 1800.0,
            year_built: 2015,
            image: "https://images.unsplash.com/photo-1518780664697-55e3ad937233?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop&w=2340&q=80".to_string(),
            address: address("123 Pine Road", "Denver", "CO", "80202"),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_shape() {
        let listings = seed_listings();
        assert_eq!(listings.len(), 6);

        let cities: Vec<_> = listings.iter().map(|p| p.address.city.as_str()).collect();
        assert_eq!(
            cities,
            ["San Francisco", "Austin", "Miami", "Portland", "Chicago", "Denver"]
        );

        let prices: Vec<_> = listings.iter().map(|p| p.price).collect();
        assert_eq!(prices, [2500.0, 750_000.0, 1_200_000.0, 1800.0, 550_000.0, 3200.0]);

        let houses = listings
            .iter()
            .filter(|p| p.property_type == PropertyType::House)
            .count();
        let rentals = listings
            .iter()
            .filter(|p| p.status == ListingStatus::ForRent)
            .count();
        assert_eq!(houses, 3);
        assert_eq!(rentals, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_waits_for_delay() {
        let source = SeedListingSource::default();
        let started = tokio::time::Instant::now();

        let listings = source.fetch().await.unwrap();

        assert_eq!(listings.len(), 6);
        assert!(started.elapsed() >= Duration::from_millis(1500));
        assert_eq!(source.source_name(), "seed");
    }
}
