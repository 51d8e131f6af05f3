//! The add-property form: raw draft input, its validation rules and the
//! coercion into a [`NewListing`].

use crate::error::DraftError;
use crate::models::{default_country, Address, ListingStatus, NewListing, PropertyType};
use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Form field names, with dotted names for the address parts
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DraftField {
    Title,
    Description,
    Type,
    Status,
    Price,
    Bedrooms,
    Bathrooms,
    Area,
    YearBuilt,
    Image,
    Street,
    City,
    State,
    ZipCode,
    Country,
}

impl DraftField {
    pub const ALL: [DraftField; 15] = [
        DraftField::Title,
        DraftField::Description,
        DraftField::Type,
        DraftField::Status,
        DraftField::Price,
        DraftField::Bedrooms,
        DraftField::Bathrooms,
        DraftField::Area,
        DraftField::YearBuilt,
        DraftField::Image,
        DraftField::Street,
        DraftField::City,
        DraftField::State,
        DraftField::ZipCode,
        DraftField::Country,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DraftField::Title => "title",
            DraftField::Description => "description",
            DraftField::Type => "type",
            DraftField::Status => "status",
            DraftField::Price => "price",
            DraftField::Bedrooms => "bedrooms",
            DraftField::Bathrooms => "bathrooms",
            DraftField::Area => "area",
            DraftField::YearBuilt => "yearBuilt",
            DraftField::Image => "image",
            DraftField::Street => "address.street",
            DraftField::City => "address.city",
            DraftField::State => "address.state",
            DraftField::ZipCode => "address.zipCode",
            DraftField::Country => "address.country",
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DraftField {
    type Err = DraftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| DraftError::UnknownField(s.to_string()))
    }
}

/// Field-level validation messages. Empty means the draft is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<DraftField, String>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: DraftField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: DraftField) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn fields(&self) -> impl Iterator<Item = DraftField> + '_ {
        self.errors.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DraftField, &str)> {
        self.errors.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    pub fn clear(&mut self, field: DraftField) {
        self.errors.remove(&field);
    }

    fn insert(&mut self, field: DraftField, message: &str) {
        self.errors.insert(field, message.to_string());
    }
}

/// Address part of a draft
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

impl Default for DraftAddress {
    fn default() -> Self {
        Self {
            street: String::new(),
            city: String::new(),
            state: String::new(),
            zip_code: String::new(),
            country: default_country(),
        }
    }
}

/// In-progress new listing, holding the raw text the user typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDraft {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub status: ListingStatus,
    pub price: String,
    pub bedrooms: String,
    pub bathrooms: String,
    pub area: String,
    pub year_built: String,
    pub image: String,
    pub address: DraftAddress,
}

impl Default for PropertyDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            property_type: PropertyType::House,
            status: ListingStatus::ForSale,
            price: String::new(),
            bedrooms: "1".to_string(),
            bathrooms: "1".to_string(),
            area: String::new(),
            year_built: Utc::now().year().to_string(),
            image: String::new(),
            address: DraftAddress::default(),
        }
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

fn positive_number(raw: &str) -> Option<f64> {
    parse_number(raw).filter(|n| *n > 0.0)
}

impl PropertyDraft {
    /// Update one field from a form-style `name`/`value` pair
    pub fn set(&mut self, field: DraftField, value: &str) -> Result<(), DraftError> {
        let invalid_choice = || DraftError::InvalidChoice {
            field: field.as_str(),
            value: value.to_string(),
        };
        let value_owned = value.to_string();
        match field {
            DraftField::Title => self.title = value_owned,
            DraftField::Description => self.description = value_owned,
            DraftField::Type => self.property_type = value.parse::<PropertyType>().map_err(|_| invalid_choice())?,
            DraftField::Status => self.status = value.parse::<ListingStatus>().map_err(|_| invalid_choice())?,
            DraftField::Price => self.price = value_owned,
            DraftField::Bedrooms => self.bedrooms = value_owned,
            DraftField::Bathrooms => self.bathrooms = value_owned,
            DraftField::Area => self.area = value_owned,
            DraftField::YearBuilt => self.year_built = value_owned,
            DraftField::Image => self.image = value_owned,
            DraftField::Street => self.address.street = value_owned,
            DraftField::City => self.address.city = value_owned,
            DraftField::State => self.address.state = value_owned,
            DraftField::ZipCode => self.address.zip_code = value_owned,
            DraftField::Country => self.address.country = value_owned,
        }
        Ok(())
    }

    /// Check every rule independently and collect one message per failing
    /// field.
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::default();

        let required = [
            (DraftField::Title, &self.title, "Title is required"),
            (DraftField::Description, &self.description, "Description is required"),
            (DraftField::Street, &self.address.street, "Street address is required"),
            (DraftField::City, &self.address.city, "City is required"),
            (DraftField::State, &self.address.state, "State is required"),
            (DraftField::ZipCode, &self.address.zip_code, "Zip code is required"),
            (DraftField::Image, &self.image, "Image URL is required"),
        ];
        for (field, value, message) in required {
            if value.trim().is_empty() {
                errors.insert(field, message);
            }
        }

        let positive = [
            (DraftField::Price, &self.price, "Price is required", "Price must be a positive number"),
            (DraftField::Area, &self.area, "Area is required", "Area must be a positive number"),
        ];
        for (field, value, missing, not_positive) in positive {
            if value.trim().is_empty() {
                errors.insert(field, missing);
            } else if positive_number(value).is_none() {
                errors.insert(field, not_positive);
            }
        }

        errors
    }

    /// Validate, then coerce the numeric fields into a [`NewListing`].
    pub fn into_listing(self) -> Result<NewListing, DraftError> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(DraftError::Invalid(errors));
        }

        let coercion = |field: DraftField, value: &str| DraftError::Coercion {
            field: field.as_str(),
            value: value.to_string(),
        };

        let price = positive_number(&self.price).ok_or_else(|| coercion(DraftField::Price, &self.price))?;
        let area = positive_number(&self.area).ok_or_else(|| coercion(DraftField::Area, &self.area))?;
        let bedrooms = self
            .bedrooms
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| coercion(DraftField::Bedrooms, &self.bedrooms))?;
        let bathrooms = positive_number(&self.bathrooms)
            .ok_or_else(|| coercion(DraftField::Bathrooms, &self.bathrooms))?;
        let year_built = self
            .year_built
            .trim()
            .parse::<i32>()
            .map_err(|_| coercion(DraftField::YearBuilt, &self.year_built))?;

        let country = if self.address.country.trim().is_empty() {
            default_country()
        } else {
            self.address.country
        };

        Ok(NewListing {
            title: self.title,
            description: self.description,
            property_type: self.property_type,
            status: self.status,
            price,
            bedrooms,
            bathrooms,
            area,
            year_built,
            image: self.image,
            address: Address {
                street: self.address.street,
                city: self.address.city,
                state: self.address.state,
                zip_code: self.address.zip_code,
                country,
            },
        })
    }
}

impl NewListing {
    /// Re-check a listing that did not come straight out of
    /// [`PropertyDraft::into_listing`], such as a backend's echo. Applies
    /// the draft rules plus the positivity of the coerced counts.
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::default();

        let required = [
            (DraftField::Title, &self.title, "Title is required"),
            (DraftField::Description, &self.description, "Description is required"),
            (DraftField::Street, &self.address.street, "Street address is required"),
            (DraftField::City, &self.address.city, "City is required"),
            (DraftField::State, &self.address.state, "State is required"),
            (DraftField::ZipCode, &self.address.zip_code, "Zip code is required"),
            (DraftField::Image, &self.image, "Image URL is required"),
        ];
        for (field, value, message) in required {
            if value.trim().is_empty() {
                errors.insert(field, message);
            }
        }

        let positive = [
            (DraftField::Price, self.price, "Price must be a positive number"),
            (DraftField::Area, self.area, "Area must be a positive number"),
            (DraftField::Bathrooms, self.bathrooms, "Bathrooms must be a positive number"),
        ];
        for (field, value, message) in positive {
            if !(value.is_finite() && value > 0.0) {
                errors.insert(field, message);
            }
        }

        if self.bedrooms == 0 {
            errors.insert(DraftField::Bedrooms, "Bedrooms must be at least 1");
        }

        errors
    }
}

/// State of the open add-property form
#[derive(Debug, Clone, Default)]
pub struct DraftForm {
    pub draft: PropertyDraft,
    pub errors: ValidationErrors,
    pub submitting: bool,
}

impl DraftForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Edit a field by name; editing clears any error shown for it.
    pub fn edit(&mut self, name: &str, value: &str) -> Result<(), DraftError> {
        let field: DraftField = name.parse()?;
        self.draft.set(field, value)?;
        self.errors.clear(field);
        Ok(())
    }
}
