//! REST catalog implementation
//!
//! Fetches catalog rows from a PostgREST-style HTTP endpoint. The row
//! shapes match the campaign schema: `organizations`, `products`, and
//! `user_personas`, with products and personas filtered by
//! `organization_id`.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::{Company, Product, UserPersona};

use super::CatalogProvider;

// ─────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────

/// Configuration for the REST catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestCatalogConfig {
    /// API base URL (e.g., "https://project.supabase.co/rest/v1")
    pub base_url: String,

    /// API key sent as `apikey` and bearer token (empty = anonymous)
    pub api_key: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for RestCatalogConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            timeout_secs: 30,
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Row types (as served by the catalog)
// ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct OrganizationRow {
    id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct OwnedRow {
    id: String,
    name: String,
    organization_id: String,
}

// ─────────────────────────────────────────────────────────────────
// REST Catalog
// ─────────────────────────────────────────────────────────────────

/// Catalog source backed by a PostgREST-style row API
pub struct RestCatalog {
    config: RestCatalogConfig,
    client: Client,
}

impl RestCatalog {
    /// Create a new REST catalog from configuration
    pub fn new(config: RestCatalogConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Build a resource URL from the base and a path + query string
    fn resource_url(&self, path_and_query: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path_and_query
        )
    }

    /// Fetch and decode a list of rows from the given resource
    async fn fetch_rows<T>(&self, resource: &str, path_and_query: &str) -> Result<Vec<T>>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = self.resource_url(path_and_query);
        debug!(resource, url = %url, "Fetching catalog rows");

        let mut request = self.client.get(&url);
        if !self.config.api_key.is_empty() {
            request = request
                .header("apikey", &self.config.api_key)
                .bearer_auth(&self.config.api_key);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::CatalogTimeout {
                    resource: resource.to_string(),
                    timeout_secs: self.config.timeout_secs,
                }
            } else {
                Error::catalog_fetch(resource, e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::catalog_fetch(
                resource,
                format!("catalog returned HTTP {}", status),
            ));
        }

        response
            .json::<Vec<T>>()
            .await
            .map_err(|e| Error::catalog_decode(resource, e.to_string()))
    }
}

#[async_trait]
impl CatalogProvider for RestCatalog {
    fn name(&self) -> &'static str {
        "rest"
    }

    async fn companies(&self) -> Result<Vec<Company>> {
        let rows: Vec<OrganizationRow> = self
            .fetch_rows("organizations", "organizations?select=id,name")
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| Company::new(row.id, row.name))
            .collect())
    }

    async fn products_for(&self, company_id: &str) -> Result<Vec<Product>> {
        let query = format!(
            "products?select=id,name,organization_id&organization_id=eq.{}",
            company_id
        );
        let rows: Vec<OwnedRow> = self.fetch_rows("products", &query).await?;

        Ok(rows
            .into_iter()
            .map(|row| Product::new(row.id, row.name, row.organization_id))
            .collect())
    }

    async fn personas_for(&self, company_id: &str) -> Result<Vec<UserPersona>> {
        let query = format!(
            "user_personas?select=id,name,organization_id&organization_id=eq.{}",
            company_id
        );
        let rows: Vec<OwnedRow> = self.fetch_rows("user_personas", &query).await?;

        Ok(rows
            .into_iter()
            .map(|row| UserPersona::new(row.id, row.name, row.organization_id))
            .collect())
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
