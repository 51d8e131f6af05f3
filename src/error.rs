use thiserror::Error;

use crate::draft::ValidationErrors;

/// Rejected filter update
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CriteriaError {
    #[error("unknown filter field '{0}'")]
    UnknownField(String),

    #[error("invalid value '{value}' for filter '{field}'")]
    InvalidValue { field: &'static str, value: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("listing store is already populated")]
    AlreadyPopulated,

    #[error("listing store is still loading")]
    NotReady,

    #[error("duplicate listing id {0}")]
    DuplicateId(i64),

    #[error("listing has {} invalid field(s)", .0.len())]
    InvalidListing(ValidationErrors),

    #[error("no listing ids left")]
    IdsExhausted,
}

/// Problems with the add-property draft
#[derive(Debug, Error, PartialEq)]
pub enum DraftError {
    #[error("unknown form field '{0}'")]
    UnknownField(String),

    #[error("invalid choice '{value}' for '{field}'")]
    InvalidChoice { field: &'static str, value: String },

    #[error("the form has {} invalid field(s)", .0.len())]
    Invalid(ValidationErrors),

    #[error("could not convert '{value}' for '{field}'")]
    Coercion { field: &'static str, value: String },
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to fetch listings from {source_name}: {reason}")]
    Fetch {
        source_name: &'static str,
        reason: String,
    },

    #[error("the form has {} invalid field(s)", .0.len())]
    InvalidDraft(ValidationErrors),

    #[error("failed to add property: {0}")]
    Submit(String),

    #[error("no add-property form is open")]
    NoOpenForm,

    #[error("operation cancelled")]
    Cancelled,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Criteria(#[from] CriteriaError),

    #[error(transparent)]
    Draft(#[from] DraftError),
}
