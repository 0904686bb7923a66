//! Credentials for a remote OSDI server.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// API location and token for one organization's OSDI server.
///
/// Always passed explicitly into each fetch; nothing in the workspace keeps
/// credentials around between calls.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OsdiCredential {
    /// Base URL of the OSDI API, e.g. `https://example.org/osdi`.
    pub api_url: String,
    /// Value sent in the `OSDI-API-Token` header.
    pub api_token: String,
}

impl OsdiCredential {
    pub fn new(api_url: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            api_token: api_token.into(),
        }
    }

    /// Checks that both fields are present. No format validation is done.
    pub fn validate(&self) -> Result<()> {
        if self.api_url.trim().is_empty() {
            return Err(Error::MissingCredential("api_url"));
        }
        if self.api_token.trim().is_empty() {
            return Err(Error::MissingCredential("api_token"));
        }
        Ok(())
    }

    /// The API URL without trailing slashes, ready for path joins.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.api_url.trim().trim_end_matches('/')
    }
}

impl fmt::Debug for OsdiCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OsdiCredential")
            .field("api_url", &self.api_url)
            .field("api_token", &"<redacted>")
            .finish()
    }
}
