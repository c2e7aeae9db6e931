//! Catalog trait definitions
//!
//! Defines the CatalogProvider trait that all catalog sources implement.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Company, Product, UserPersona};

/// Core trait for catalog sources
///
/// A catalog exposes row-fetch operations for the three entity kinds the
/// workflow selects from. Any call may fail with a generic fetch error;
/// the workflow's contract is to log and degrade to an empty candidate
/// list, never to crash. The trait is object-safe for dynamic dispatch.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Get the catalog source name (e.g., "rest", "demo")
    fn name(&self) -> &'static str;

    /// Fetch all companies
    async fn companies(&self) -> Result<Vec<Company>>;

    /// Fetch the products owned by the given company
    async fn products_for(&self, company_id: &str) -> Result<Vec<Product>>;

    /// Fetch the user personas owned by the given company
    async fn personas_for(&self, company_id: &str) -> Result<Vec<UserPersona>>;
}

/// Type alias for a shared catalog reference
pub type SharedCatalog = Arc<dyn CatalogProvider>;
