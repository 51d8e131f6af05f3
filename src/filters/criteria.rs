use crate::error::CriteriaError;
use crate::models::{ListingStatus, PropertyType};
use serde::{Deserialize, Serialize};

/// Fixed price buckets offered by the search form.
///
/// Bounds are in dollars for rentals and in thousands of dollars for sales;
/// the engine scales them per listing.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum PriceRange {
    #[default]
    #[serde(rename = "any")]
    Any,
    #[serde(rename = "0-2000")]
    UpTo2000,
    #[serde(rename = "2000-5000")]
    From2000To5000,
    #[serde(rename = "5000-10000")]
    From5000To10000,
    #[serde(rename = "10000-")]
    Above10000,
}

impl PriceRange {
    pub const ALL: [PriceRange; 5] = [
        PriceRange::Any,
        PriceRange::UpTo2000,
        PriceRange::From2000To5000,
        PriceRange::From5000To10000,
        PriceRange::Above10000,
    ];

    pub fn token(&self) -> &'static str {
        match self {
            PriceRange::Any => "any",
            PriceRange::UpTo2000 => "0-2000",
            PriceRange::From2000To5000 => "2000-5000",
            PriceRange::From5000To10000 => "5000-10000",
            PriceRange::Above10000 => "10000-",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|range| range.token() == token)
    }

    /// Raw `(min, max)` of the bucket, `None` for `Any`. A missing max is
    /// unbounded.
    pub fn bounds(&self) -> Option<(f64, Option<f64>)> {
        match self {
            PriceRange::Any => None,
            PriceRange::UpTo2000 => Some((0.0, Some(2000.0))),
            PriceRange::From2000To5000 => Some((2000.0, Some(5000.0))),
            PriceRange::From5000To10000 => Some((5000.0, Some(10000.0))),
            PriceRange::Above10000 => Some((10000.0, None)),
        }
    }
}

/// Current search selections applied to the listing list.
///
/// `None` (or an empty `location`) means the field is unset and its
/// predicate is skipped.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Case-insensitive substring of the city
    pub location: String,
    #[serde(rename = "type")]
    pub property_type: Option<PropertyType>,
    pub price_range: PriceRange,
    /// Minimum number of bedrooms
    pub bedrooms: Option<u32>,
    pub status: Option<ListingStatus>,
}

const MIN_BEDROOM_CHOICES: [u32; 4] = [1, 2, 3, 4];

impl FilterCriteria {
    /// Every field at its "any" sentinel
    pub fn any() -> Self {
        Self::default()
    }

    pub fn is_unfiltered(&self) -> bool {
        *self == Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Update one field from a form-style `name`/`value` pair.
    ///
    /// The criteria are left untouched when either the name or the value is
    /// not recognised.
    pub fn set(&mut self, name: &str, value: &str) -> Result<(), CriteriaError> {
        match name {
            "location" => self.location = value.to_string(),
            "type" => self.property_type = parse_type(value)?,
            "priceRange" => {
                self.price_range =
                    PriceRange::from_token(value).ok_or_else(|| CriteriaError::InvalidValue {
                        field: "priceRange",
                        value: value.to_string(),
                    })?
            }
            "bedrooms" => self.bedrooms = parse_bedrooms(value)?,
            "status" => self.status = parse_status(value)?,
            other => return Err(CriteriaError::UnknownField(other.to_string())),
        }
        Ok(())
    }
}

fn parse_type(value: &str) -> Result<Option<PropertyType>, CriteriaError> {
    // The form starts out with an empty type, which behaves like "any"
    if value.is_empty() || value == "any" {
        return Ok(None);
    }
    value
        .parse::<PropertyType>()
        .map(Some)
        .map_err(|_| CriteriaError::InvalidValue {
            field: "type",
            value: value.to_string(),
        })
}

fn parse_bedrooms(value: &str) -> Result<Option<u32>, CriteriaError> {
    if value == "any" {
        return Ok(None);
    }
    value
        .parse::<u32>()
        .ok()
        .filter(|n| MIN_BEDROOM_CHOICES.contains(n))
        .map(Some)
        .ok_or_else(|| CriteriaError::InvalidValue {
            field: "bedrooms",
            value: value.to_string(),
        })
}

fn parse_status(value: &str) -> Result<Option<ListingStatus>, CriteriaError> {
    if value == "any" {
        return Ok(None);
    }
    value
        .parse::<ListingStatus>()
        .map(Some)
        .map_err(|_| CriteriaError::InvalidValue {
            field: "status",
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_each_field() {
        let mut criteria = FilterCriteria::any();
        criteria.set("location", "port").unwrap();
        criteria.set("type", "house").unwrap();
        criteria.set("priceRange", "10000-").unwrap();
        criteria.set("bedrooms", "3").unwrap();
        criteria.set("status", "for-sale").unwrap();

        assert_eq!(criteria.location, "port");
        assert_eq!(criteria.property_type, Some(PropertyType::House));
        assert_eq!(criteria.price_range, PriceRange::Above10000);
        assert_eq!(criteria.bedrooms, Some(3));
        assert_eq!(criteria.status, Some(ListingStatus::ForSale));
        assert!(!criteria.is_unfiltered());

        criteria.reset();
        assert!(criteria.is_unfiltered());
    }

    #[test]
    fn test_sentinels_clear_fields() {
        let mut criteria = FilterCriteria::any();
        criteria.set("type", "land").unwrap();
        criteria.set("type", "").unwrap();
        assert_eq!(criteria.property_type, None);

        criteria.set("bedrooms", "2").unwrap();
        criteria.set("bedrooms", "any").unwrap();
        assert_eq!(criteria.bedrooms, None);
    }

    #[test]
    fn test_rejected_values_leave_criteria_untouched() {
        let mut criteria = FilterCriteria::any();
        criteria.set("bedrooms", "2").unwrap();

        assert_eq!(
            criteria.set("bedrooms", "7"),
            Err(CriteriaError::InvalidValue {
                field: "bedrooms",
                value: "7".to_string()
            })
        );
        assert!(criteria.set("priceRange", "1-2").is_err());
        assert!(criteria.set("status", "sold").is_err());
        assert_eq!(
            criteria.set("colour", "red"),
            Err(CriteriaError::UnknownField("colour".to_string()))
        );
        assert_eq!(criteria.bedrooms, Some(2));
        assert_eq!(criteria.price_range, PriceRange::Any);
    }

    #[test]
    fn test_price_range_tokens() {
        for range in PriceRange::ALL {
            assert_eq!(PriceRange::from_token(range.token()), Some(range));
        }
        assert_eq!(PriceRange::Above10000.bounds(), Some((10000.0, None)));
        assert_eq!(PriceRange::Any.bounds(), None);
    }
}
