//! Paginated list synchronization against OSDI servers.
//!
//! Two fetchers share one pagination loop:
//! - **Catalog**: every list summary under `{api_url}/lists`
//! - **Items**: every member of one list under `{api_url}/lists/{id}/items`,
//!   optionally capped and enriched with caller-supplied fields
//!
//! # Pagination
//!
//! Pages are requested strictly in order starting at `page=1`. A page's
//! `_links.next` is the only signal that another page exists. Every request
//! carries the `OSDI-API-Token` header and is bounded by the configured
//! timeout.
//!
//! # Failure model
//!
//! A fetch either returns everything it was asked for or an [`OsdiError`].
//! There are no internal retries; [`OsdiError::is_retryable`] tells callers
//! whether trying again is worthwhile. A [`CancelToken`] stops a fetch
//! between pages or mid-request.
//!
//! # Example
//!
//! ```no_run
//! use osdi_sync::{OsdiClient, OsdiClientConfig, PeopleQuery};
//! use osdi_types::OsdiCredential;
//!
//! # async fn run() -> osdi_sync::OsdiResult<()> {
//! let client = OsdiClient::new(OsdiClientConfig::default())?;
//! let credential = OsdiCredential::new("https://osdi.example.org", "token");
//!
//! let lists = client.fetch_lists(&credential).await?;
//! let query = PeopleQuery::default().with_limit(500).with_field("source", "import");
//! let people = client.fetch_list_people(&credential, &lists[0].id, &query).await?;
//! # Ok(())
//! # }
//! ```

mod cancel;
mod client;
mod config;
mod error;
pub mod pagination;

pub use cancel::CancelToken;
pub use client::{OsdiClient, PeopleQuery};
pub use config::{API_TOKEN_HEADER, OsdiClientConfig};
pub use error::{FetchFailure, MAX_ERROR_BODY, OsdiError, OsdiResult};
pub use pagination::Paginator;
