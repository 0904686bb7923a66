//! Organization feature blob.
//!
//! Organizations store their OSDI settings inside a free-form JSON features
//! document next to unrelated flags. Only the OSDI keys are interpreted.

use crate::{Error, OsdiCredential, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrganizationFeatures {
    pub osdi_enabled: bool,
    pub osdi_api_url: String,
    pub osdi_api_token: String,
    /// Every other feature key, kept so the blob can be written back intact.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl OrganizationFeatures {
    /// Parses a stored features document.
    ///
    /// Absent keys take their defaults; a document that is not a JSON object
    /// is an error rather than a silent fallback.
    pub fn parse(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The credential to fetch with, provided OSDI is switched on and both
    /// fields are filled in.
    pub fn osdi_credential(&self) -> Result<OsdiCredential> {
        if !self.osdi_enabled {
            return Err(Error::OsdiDisabled);
        }
        let credential = OsdiCredential::new(&self.osdi_api_url, &self.osdi_api_token);
        credential.validate()?;
        Ok(credential)
    }
}
