//! OSDI client: list catalog and list item fetchers.
//!
//! Both fetchers validate their inputs before touching the network, then
//! drain a [`Paginator`] page by page. Any error aborts the whole fetch.

use crate::cancel::CancelToken;
use crate::config::OsdiClientConfig;
use crate::error::{OsdiError, OsdiResult};
use crate::pagination::{ITEMS_KEY, LISTS_KEY, Paginator};
use osdi_types::{
    CustomFieldEntry, EnrichedPerson, ListFilter, OsdiCredential, OsdiList, OsdiPerson, enrich,
    validate_custom_fields,
};
use reqwest::Client;
use tracing::{debug, info};

/// Options for [`OsdiClient::fetch_list_people`].
#[derive(Debug, Clone, Default)]
pub struct PeopleQuery {
    /// Maximum number of people to return. Paging stops once reached.
    pub limit: Option<usize>,
    /// Fields merged into every returned person, overriding remote values.
    pub extra_fields: Vec<CustomFieldEntry>,
}

impl PeopleQuery {
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_fields.push(CustomFieldEntry::new(key, value));
        self
    }
}

/// Fetches list catalogs and list members from any OSDI server.
///
/// Holds no per-organization state: credentials are passed to every call,
/// so one client can serve concurrent fetches for different organizations.
#[derive(Debug, Clone)]
pub struct OsdiClient {
    http: Client,
    config: OsdiClientConfig,
}

impl OsdiClient {
    /// Creates a client with the given timeouts and user agent.
    pub fn new(config: OsdiClientConfig) -> OsdiResult<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(config.connect_timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| OsdiError::Configuration(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &OsdiClientConfig {
        &self.config
    }

    /// Page sequence over `{api_url}/lists`.
    pub fn list_pages(&self, credential: &OsdiCredential) -> OsdiResult<Paginator<OsdiList>> {
        credential.validate()?;
        let url = format!("{}/lists", credential.base_url());
        Ok(Paginator::new(
            self.http.clone(),
            url,
            credential.api_token.clone(),
            LISTS_KEY,
            None,
        ))
    }

    /// Page sequence over `{api_url}/lists/{list_id}/items`.
    pub fn item_pages(
        &self,
        credential: &OsdiCredential,
        list_id: &str,
    ) -> OsdiResult<Paginator<OsdiPerson>> {
        credential.validate()?;
        if list_id.trim().is_empty() {
            return Err(OsdiError::Configuration("list id must not be empty".to_string()));
        }
        let url = format!(
            "{}/lists/{}/items",
            credential.base_url(),
            urlencoding::encode(list_id)
        );
        Ok(Paginator::new(
            self.http.clone(),
            url,
            credential.api_token.clone(),
            ITEMS_KEY,
            Some(list_id.to_string()),
        ))
    }

    /// Fetches every list in the remote catalog, in server order.
    pub async fn fetch_lists(&self, credential: &OsdiCredential) -> OsdiResult<Vec<OsdiList>> {
        self.fetch_lists_cancellable(credential, &CancelToken::new()).await
    }

    /// Like [`fetch_lists`](Self::fetch_lists), but stops when `cancel` fires.
    pub async fn fetch_lists_cancellable(
        &self,
        credential: &OsdiCredential,
        cancel: &CancelToken,
    ) -> OsdiResult<Vec<OsdiList>> {
        let mut pages = self.list_pages(credential)?.with_cancel(cancel.clone());

        let mut lists = Vec::new();
        while let Some(page) = pages.next_page().await? {
            lists.extend(page);
        }

        info!(
            url = pages.url(),
            pages = pages.pages_fetched(),
            lists = lists.len(),
            "fetched OSDI list catalog"
        );
        Ok(lists)
    }

    /// Fetches the catalog and keeps the lists matching `filter`.
    pub async fn fetch_lists_filtered(
        &self,
        credential: &OsdiCredential,
        filter: &ListFilter,
    ) -> OsdiResult<Vec<OsdiList>> {
        self.fetch_lists_filtered_cancellable(credential, filter, &CancelToken::new()).await
    }

    /// Like [`fetch_lists_filtered`](Self::fetch_lists_filtered), but stops
    /// when `cancel` fires.
    pub async fn fetch_lists_filtered_cancellable(
        &self,
        credential: &OsdiCredential,
        filter: &ListFilter,
        cancel: &CancelToken,
    ) -> OsdiResult<Vec<OsdiList>> {
        let lists = self.fetch_lists_cancellable(credential, cancel).await?;
        let total = lists.len();
        let lists = filter.apply(lists);
        debug!(total, kept = lists.len(), "filtered OSDI list catalog");
        Ok(lists)
    }

    /// Fetches the members of `list_id`, enriched with `query.extra_fields`.
    pub async fn fetch_list_people(
        &self,
        credential: &OsdiCredential,
        list_id: &str,
        query: &PeopleQuery,
    ) -> OsdiResult<Vec<EnrichedPerson>> {
        self.fetch_list_people_cancellable(credential, list_id, query, &CancelToken::new()).await
    }

    /// Like [`fetch_list_people`](Self::fetch_list_people), but stops when
    /// `cancel` fires.
    pub async fn fetch_list_people_cancellable(
        &self,
        credential: &OsdiCredential,
        list_id: &str,
        query: &PeopleQuery,
        cancel: &CancelToken,
    ) -> OsdiResult<Vec<EnrichedPerson>> {
        let mut pages = self
            .item_pages(credential, list_id)?
            .with_cancel(cancel.clone());
        validate_custom_fields(&query.extra_fields)?;

        let limit = query.limit.unwrap_or(usize::MAX);
        let mut people = Vec::new();

        while people.len() < limit {
            let Some(page) = pages.next_page().await? else {
                break;
            };
            let remaining = limit - people.len();
            people.extend(
                page.into_iter()
                    .take(remaining)
                    .map(|raw| enrich(raw, &query.extra_fields)),
            );
        }

        if !pages.is_exhausted() {
            debug!(list_id, limit, "stopped paging at record limit");
        }
        info!(
            list_id,
            pages = pages.pages_fetched(),
            people = people.len(),
            "fetched OSDI list items"
        );
        Ok(people)
    }
}
