use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of property being listed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    House,
    Apartment,
    Land,
    Commercial,
}

impl PropertyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::House => "house",
            PropertyType::Apartment => "apartment",
            PropertyType::Land => "land",
            PropertyType::Commercial => "commercial",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "house" => Ok(PropertyType::House),
            "apartment" => Ok(PropertyType::Apartment),
            "land" => Ok(PropertyType::Land),
            "commercial" => Ok(PropertyType::Commercial),
            other => Err(format!("unknown property type '{}'", other)),
        }
    }
}

/// Whether a listing is offered for sale or for rent.
///
/// The status decides how `price` is read: a total price for sale, a monthly
/// rent for rent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ListingStatus {
    ForSale,
    ForRent,
}

impl ListingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingStatus::ForSale => "for-sale",
            ListingStatus::ForRent => "for-rent",
        }
    }
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "for-sale" => Ok(ListingStatus::ForSale),
            "for-rent" => Ok(ListingStatus::ForRent),
            other => Err(format!("unknown listing status '{}'", other)),
        }
    }
}

/// Postal address of a property
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    #[serde(default = "default_country")]
    pub country: String,
}

pub fn default_country() -> String {
    "USA".to_string()
}

/// Core property listing model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRecord {
    pub id: i64,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub status: ListingStatus,
    pub price: f64,
    pub bedrooms: u32,
    pub bathrooms: f64,
    pub area: f64,
    pub year_built: i32,
    pub image: String,
    pub address: Address,
}

/// A validated listing that has not been assigned an id yet.
///
/// Built by [`crate::draft::PropertyDraft::into_listing`] after validation,
/// or read back from a submission backend echoing one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewListing {
    pub(crate) title: String,
    pub(crate) description: String,
    #[serde(rename = "type")]
    pub(crate) property_type: PropertyType,
    pub(crate) status: ListingStatus,
    pub(crate) price: f64,
    pub(crate) bedrooms: u32,
    pub(crate) bathrooms: f64,
    pub(crate) area: f64,
    pub(crate) year_built: i32,
    pub(crate) image: String,
    pub(crate) address: Address,
}

impl NewListing {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn status(&self) -> ListingStatus {
        self.status
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    /// Attach an id, producing the committed record.
    pub(crate) fn into_record(self, id: i64) -> PropertyRecord {
        PropertyRecord {
            id,
            title: self.title,
            description: self.description,
            property_type: self.property_type,
            status: self.status,
            price: self.price,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            area: self.area,
            year_built: self.year_built,
            image: self.image,
            address: self.address,
        }
    }
}
