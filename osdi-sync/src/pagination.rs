//! Sequential page walking over OSDI collection envelopes.
//!
//! An OSDI collection page looks like
//!
//! ```json
//! {
//!   "_embedded": { "osdi:lists": [ ... ] },
//!   "_links": { "next": { "href": "..." } }
//! }
//! ```
//!
//! Only the embedded array and the presence of `_links.next` are read. Pages
//! are numbered from 1 and requested one at a time; page `n + 1` is only
//! requested once page `n` reported a next link.

use crate::cancel::CancelToken;
use crate::config::API_TOKEN_HEADER;
use crate::error::{FetchFailure, OsdiError, OsdiResult};
use futures::Stream;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::marker::PhantomData;
use tracing::{debug, warn};

/// Embedded key holding list summaries.
pub const LISTS_KEY: &str = "osdi:lists";
/// Embedded key holding list members.
pub const ITEMS_KEY: &str = "osdi:items";

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "_embedded")]
    embedded: Option<Map<String, Value>>,
    #[serde(rename = "_links")]
    links: Option<Links>,
}

#[derive(Debug, Deserialize)]
struct Links {
    next: Option<Value>,
}

/// Lazy, restartable sequence of pages from one OSDI collection.
///
/// Each call to [`next_page`](Self::next_page) performs at most one request.
/// A failed page leaves the cursor where it was, so calling again retries
/// that page; [`reset`](Self::reset) starts over from page 1.
pub struct Paginator<T> {
    http: Client,
    url: String,
    token: String,
    collection_key: &'static str,
    list_id: Option<String>,
    next: Option<u32>,
    pages_fetched: u32,
    cancel: CancelToken,
    _item: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> Paginator<T> {
    pub(crate) fn new(
        http: Client,
        url: String,
        token: String,
        collection_key: &'static str,
        list_id: Option<String>,
    ) -> Self {
        Self {
            http,
            url,
            token,
            collection_key,
            list_id,
            next: Some(1),
            pages_fetched: 0,
            cancel: CancelToken::new(),
            _item: PhantomData,
        }
    }

    /// Ties this paginator to a caller-held cancellation token.
    #[must_use]
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Collection URL, without the page query.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The page the next call will request, or `None` once exhausted.
    pub fn current_page(&self) -> Option<u32> {
        self.next
    }

    pub fn is_exhausted(&self) -> bool {
        self.next.is_none()
    }

    /// Pages successfully fetched since creation or the last reset.
    pub fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }

    /// Rewinds to page 1.
    pub fn reset(&mut self) {
        self.next = Some(1);
        self.pages_fetched = 0;
    }

    /// Fetches the next page, or returns `Ok(None)` when the remote has no
    /// more pages.
    pub async fn next_page(&mut self) -> OsdiResult<Option<Vec<T>>> {
        let Some(page) = self.next else {
            return Ok(None);
        };
        if self.cancel.is_cancelled() {
            return Err(self.cancelled());
        }

        let cancel = self.cancel.clone();
        let fetched = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            result = self.fetch_page(page) => Some(result),
        };
        let Some(result) = fetched else {
            debug!(url = %self.url, page, "OSDI page request cancelled in flight");
            return Err(self.cancelled());
        };

        let (items, has_next) = result?;
        let next = match (has_next, page.checked_add(1)) {
            (false, _) => None,
            (true, Some(next)) => Some(next),
            (true, None) => {
                return Err(self.failure(
                    page,
                    FetchFailure::Malformed("next link past the last page number".into()),
                ));
            }
        };
        self.pages_fetched += 1;
        self.next = next;
        Ok(Some(items))
    }

    /// Turns the paginator into a stream of pages.
    pub fn into_stream(self) -> impl Stream<Item = OsdiResult<Vec<T>>> {
        futures::stream::try_unfold(self, |mut pager| async move {
            let page = pager.next_page().await?;
            Ok::<_, OsdiError>(page.map(|items| (items, pager)))
        })
    }

    async fn fetch_page(&self, page: u32) -> OsdiResult<(Vec<T>, bool)> {
        debug!(url = %self.url, page, "requesting OSDI page");

        let response = self
            .http
            .get(&self.url)
            .header(API_TOKEN_HEADER, &self.token)
            .query(&[("page", page)])
            .send()
            .await
            .map_err(|e| self.failure(page, FetchFailure::from_reqwest(e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(self.failure(page, FetchFailure::status(status.as_u16(), body)));
        }

        let envelope: Envelope = response
            .json()
            .await
            .map_err(|e| self.failure(page, FetchFailure::from_reqwest(e)))?;

        let has_next = envelope.links.and_then(|links| links.next).is_some();
        let collection = envelope
            .embedded
            .and_then(|mut embedded| embedded.remove(self.collection_key))
            .ok_or_else(|| {
                self.failure(
                    page,
                    FetchFailure::Malformed(format!("missing _embedded.{}", self.collection_key)),
                )
            })?;
        let items: Vec<T> = serde_json::from_value(collection).map_err(|e| {
            self.failure(
                page,
                FetchFailure::Malformed(format!("invalid {} entry: {e}", self.collection_key)),
            )
        })?;

        debug!(url = %self.url, page, count = items.len(), has_next, "received OSDI page");
        Ok((items, has_next))
    }

    fn failure(&self, page: u32, cause: FetchFailure) -> OsdiError {
        warn!(url = %self.url, page, error = %cause, "OSDI page request failed");
        OsdiError::RemoteFetch {
            url: self.url.clone(),
            page,
            list_id: self.list_id.clone(),
            cause,
        }
    }

    fn cancelled(&self) -> OsdiError {
        OsdiError::Cancelled {
            pages_fetched: self.pages_fetched,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn next_link_on_last_page_number_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("page", u32::MAX.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "_embedded": { "osdi:lists": [] },
                "_links": { "next": { "href": "/lists?page=0" } }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let url = format!("{}/lists", server.uri());
        let mut pager = Paginator::<Value>::new(Client::new(), url, "tok".into(), LISTS_KEY, None);
        pager.next = Some(u32::MAX);

        let err = pager.next_page().await.unwrap_err();
        assert!(matches!(
            err,
            OsdiError::RemoteFetch {
                page: u32::MAX,
                cause: FetchFailure::Malformed(_),
                ..
            }
        ));
        assert!(!err.is_retryable());
        assert_eq!(pager.current_page(), Some(u32::MAX));
        assert_eq!(pager.pages_fetched(), 0);
    }
}
