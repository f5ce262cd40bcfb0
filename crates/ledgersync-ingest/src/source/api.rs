//! Remote listing source reader
//!
//! Cursor-paginated client for the platform's REST listing endpoints. Each
//! page fetch is one `GET /v1/{collection}?limit=N[&starting_after=id]` with
//! bearer auth; the sequence terminates when the upstream reports
//! `has_more: false`. Listings are trusted by construction: the endpoint
//! determines the entity kind, so no schema gate runs on this path.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::config::StripeConfig;
use ledgersync_common::{EntityKind, Result, SyncError};

/// One page of a remote listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ListPage {
    #[serde(default)]
    pub data: Vec<Value>,
    #[serde(default)]
    pub has_more: bool,
}

/// Read-only client for the platform listing API.
#[derive(Debug, Clone)]
pub struct StripeClient {
    http: reqwest::Client,
    api_base: String,
    api_key: String,
    page_size: u16,
}

impl StripeClient {
    pub fn new(config: &StripeConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(SyncError::Config(
                "STRIPE_API_KEY is required for API-backed sync".to_string(),
            ));
        }

        Ok(Self {
            http: reqwest::Client::new(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            page_size: config.page_size,
        })
    }

    /// List every object of one kind, paging until the upstream is drained.
    pub async fn list_all(&self, kind: EntityKind) -> Result<Vec<Value>> {
        let mut objects = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let page = self.list_page(kind, cursor.as_deref()).await?;
            let has_more = page.has_more;

            cursor = page
                .data
                .last()
                .and_then(|obj| obj.get("id"))
                .and_then(Value::as_str)
                .map(str::to_string);

            objects.extend(page.data);

            // A page with no usable cursor cannot be continued, whatever
            // has_more claims.
            if !has_more || cursor.is_none() {
                break;
            }
        }

        debug!(entity = %kind, count = objects.len(), "Remote listing drained");
        Ok(objects)
    }

    async fn list_page(&self, kind: EntityKind, starting_after: Option<&str>) -> Result<ListPage> {
        let url = format!("{}/v1/{}", self.api_base, kind.collection());

        let mut request = self
            .http
            .get(&url)
            .bearer_auth(&self.api_key)
            .query(&[("limit", self.page_size.to_string())]);

        if let Some(cursor) = starting_after {
            request = request.query(&[("starting_after", cursor)]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SyncError::SourceUnavailable(format!("{}: {}", url, e)))?
            .error_for_status()
            .map_err(|e| SyncError::SourceUnavailable(format!("{}: {}", url, e)))?;

        let page: ListPage = response
            .json()
            .await
            .map_err(|e| SyncError::SourceUnavailable(format!("{}: {}", url, e)))?;

        debug!(
            entity = %kind,
            count = page.data.len(),
            has_more = page.has_more,
            "Fetched listing page"
        );

        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SyncConfig;

    #[test]
    fn missing_api_key_is_a_config_error() {
        let config = SyncConfig::default();
        assert!(matches!(
            StripeClient::new(&config.stripe),
            Err(SyncError::Config(_))
        ));
    }

    #[test]
    fn trailing_slash_in_base_is_trimmed() {
        let mut config = SyncConfig::default();
        config.stripe.api_key = "sk_test_123".to_string();
        config.stripe.api_base = "https://api.example.test/".to_string();

        let client = StripeClient::new(&config.stripe).unwrap();
        assert_eq!(client.api_base, "https://api.example.test");
    }

    #[test]
    fn list_page_deserializes_partial_envelopes() {
        let page: ListPage = serde_json::from_str(r#"{ "object": "list" }"#).unwrap();
        assert!(page.data.is_empty());
        assert!(!page.has_more);
    }
}
