//! Error types for OSDI fetches.

use thiserror::Error;

/// Result type for OSDI fetch operations.
pub type OsdiResult<T> = Result<T, OsdiError>;

/// Errors that abort an OSDI fetch. A fetch never returns partial results.
#[derive(Debug, Error)]
pub enum OsdiError {
    /// Inputs were unusable; raised before any network request.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A page could not be fetched or understood.
    #[error("remote fetch failed for {url} (page {page}): {cause}")]
    RemoteFetch {
        url: String,
        page: u32,
        list_id: Option<String>,
        cause: FetchFailure,
    },

    /// The caller cancelled the fetch.
    #[error("fetch cancelled after {pages_fetched} page(s)")]
    Cancelled { pages_fetched: u32 },
}

/// Underlying reason a page request failed.
#[derive(Debug, Error)]
pub enum FetchFailure {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("request timed out")]
    Timeout,

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Malformed(String),

    /// The request could not be built, e.g. an unparsable base URL or a
    /// token that is not a valid header value.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Longest remote error body kept on a [`FetchFailure::Status`], in bytes.
pub const MAX_ERROR_BODY: usize = 512;

impl FetchFailure {
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_builder() {
            FetchFailure::InvalidRequest(err.to_string())
        } else if err.is_timeout() {
            FetchFailure::Timeout
        } else if err.is_decode() {
            FetchFailure::Malformed(err.to_string())
        } else {
            FetchFailure::Transport(err.to_string())
        }
    }

    /// Builds a status failure, cutting the body down to [`MAX_ERROR_BODY`].
    pub(crate) fn status(status: u16, body: String) -> Self {
        FetchFailure::Status {
            status,
            body: truncate_body(body),
        }
    }
}

fn truncate_body(mut body: String) -> String {
    if body.len() <= MAX_ERROR_BODY {
        return body;
    }
    let mut end = MAX_ERROR_BODY;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    body.truncate(end);
    body.push_str("...");
    body
}

impl OsdiError {
    /// HTTP status of the failed page, if the remote answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            OsdiError::RemoteFetch {
                cause: FetchFailure::Status { status, .. },
                ..
            } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the remote reported the list or endpoint as missing.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Whether re-invoking the same fetch later might succeed.
    ///
    /// Transport failures, timeouts, 429 and 5xx responses qualify.
    /// Configuration errors, cancellations, malformed pages and requests
    /// that could not be built do not.
    pub fn is_retryable(&self) -> bool {
        match self {
            OsdiError::RemoteFetch { cause, .. } => match cause {
                FetchFailure::Transport(_) | FetchFailure::Timeout => true,
                FetchFailure::Status { status, .. } => *status == 429 || *status >= 500,
                FetchFailure::Malformed(_) | FetchFailure::InvalidRequest(_) => false,
            },
            _ => false,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, OsdiError::Cancelled { .. })
    }
}

impl From<osdi_types::Error> for OsdiError {
    fn from(err: osdi_types::Error) -> Self {
        OsdiError::Configuration(err.to_string())
    }
}
