//! HTTP client for the two directory sources and the combined search.

use std::time::Duration;

use annuaire_core::text::clean;
use annuaire_core::{AppConfig, Business, Query};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::directory;
use crate::error::ProviderError;
use crate::registry;

/// Client over the business registry (source A) and the phone directory
/// (source B).
///
/// Every fetch is a single best-effort attempt: no caching, retry, or
/// backoff. The request timeout configured on the underlying client is the
/// only latency bound.
pub struct DirectoryClient {
    client: reqwest::Client,
    registry_url: String,
    phone_directory_url: String,
}

impl DirectoryClient {
    /// Creates a client with the configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        registry_url: &str,
        phone_directory_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            registry_url: registry_url.trim_end_matches('/').to_owned(),
            phone_directory_url: phone_directory_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Creates a client from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, ProviderError> {
        Self::new(
            &config.registry_url,
            &config.phone_directory_url,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// Resolves a partial query into every matching registry business, in
    /// document order. The list is never empty.
    ///
    /// # Errors
    ///
    /// - [`ProviderError::Status`] on a non-2xx registry response.
    /// - [`ProviderError::Candidates`] when the result page is malformed.
    /// - [`ProviderError::NoBusiness`] when nothing matches the query.
    pub async fn search_business(&self, query: &Query) -> Result<Vec<Business>, ProviderError> {
        let clean_query = Query {
            id: clean(&query.id),
            name: clean(&query.name),
            street: clean(&query.street),
            town: clean(&query.town),
        };
        let page = self.fetch_business_page(&clean_query).await?;
        registry::extract_businesses(&page, &clean_query)
    }

    /// Recovers the phone number of a resolved business from the directory,
    /// keyed by the business's town and name.
    ///
    /// # Errors
    ///
    /// - [`ProviderError::Status`] on a non-2xx directory response.
    /// - [`ProviderError::Candidates`] when the page is malformed.
    /// - [`ProviderError::NoPhone`] when no entry matches the business.
    pub async fn look_up_phone(&self, business: &Business) -> Result<String, ProviderError> {
        let page = self.fetch_phone_page(business).await?;
        directory::extract_phone(&page, business)
    }

    /// Full search: resolve businesses, then fan out one phone lookup per
    /// business on the same task.
    ///
    /// The lookups are polled concurrently and joined; each failure is
    /// downgraded to an absent phone on its own business, so a single
    /// lookup never fails the search. Output order is the resolver's
    /// document order regardless of lookup completion order.
    ///
    /// # Errors
    ///
    /// Propagates any [`Self::search_business`] failure unchanged.
    pub async fn search(&self, query: &Query) -> Result<Vec<Business>, ProviderError> {
        let mut businesses = self.search_business(query).await?;

        let lookups = businesses
            .iter()
            .map(|business| self.look_up_phone(business));
        let phones = futures::future::join_all(lookups).await;

        for (business, phone) in businesses.iter_mut().zip(phones) {
            business.phone = match phone {
                Ok(phone) => Some(phone),
                Err(error) => {
                    tracing::debug!(business = %business.name, error = %error, "phone lookup failed");
                    None
                }
            };
        }
        Ok(businesses)
    }

    async fn fetch_business_page(&self, query: &Query) -> Result<String, ProviderError> {
        let response = self
            .client
            .post(&self.registry_url)
            .form(&registry::search_form(query))
            .send()
            .await?;
        Self::page_text("business", response).await
    }

    async fn fetch_phone_page(&self, business: &Business) -> Result<String, ProviderError> {
        let town = utf8_percent_encode(&business.town, NON_ALPHANUMERIC);
        let name = utf8_percent_encode(&business.name, NON_ALPHANUMERIC);
        let url = format!("{}/recherche/auto/{town}/{name}", self.phone_directory_url);
        let response = self.client.get(&url).send().await?;
        Self::page_text("phone", response).await
    }

    async fn page_text(
        kind: &'static str,
        response: reqwest::Response,
    ) -> Result<String, ProviderError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                kind,
                status: status.as_u16(),
            });
        }
        Ok(response.text().await?)
    }
}
