//! Core type definitions for OSDI list exchange.
//!
//! This crate defines the plain data model shared by the fetchers and their
//! callers:
//! - Credentials for a remote OSDI server
//! - List summaries and open-schema person records
//! - Caller-supplied custom fields and the enrichment merge
//! - The stored organization features blob that carries the credentials
//!
//! Nothing here performs I/O.

mod credential;
mod features;
mod list;
mod person;

pub use credential::OsdiCredential;
pub use features::OrganizationFeatures;
pub use list::{ListFilter, OsdiList};
pub use person::{CustomFieldEntry, EnrichedPerson, OsdiPerson, enrich, validate_custom_fields};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while validating inputs before any remote call.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("missing credential field: {0}")]
    MissingCredential(&'static str),

    #[error("custom field #{index} has an empty key")]
    EmptyFieldKey { index: usize },

    #[error("OSDI integration is not enabled for this organization")]
    OsdiDisabled,

    #[error("malformed organization features: {0}")]
    Features(#[from] serde_json::Error),
}
