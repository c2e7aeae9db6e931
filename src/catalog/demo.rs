//! Demo catalog
//!
//! An in-memory catalog with a small bundled dataset. Used by the CLI when
//! no catalog URL is configured, and by tests that need deterministic rows,
//! call counting, and injectable failures.

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::error::{Error, Result};
use crate::types::{Company, Product, UserPersona};

use super::CatalogProvider;

// ─────────────────────────────────────────────────────────────────
// Demo Catalog Configuration
// ─────────────────────────────────────────────────────────────────

/// Configuration for demo catalog behavior
#[derive(Debug, Clone, Default)]
pub struct DemoConfig {
    /// Whether to fail specific operations (for exercising error paths)
    pub fail_companies: bool,
    pub fail_products: bool,
    pub fail_personas: bool,
}

/// Track method call counts for verification
#[derive(Debug, Default)]
struct CallCounts {
    companies: u32,
    products: u32,
    personas: u32,
}

// ─────────────────────────────────────────────────────────────────
// Demo Catalog
// ─────────────────────────────────────────────────────────────────

/// In-memory catalog source
pub struct DemoCatalog {
    config: DemoConfig,
    companies: Vec<Company>,
    products: Vec<Product>,
    personas: Vec<UserPersona>,
    call_counts: RwLock<CallCounts>,
}

impl DemoCatalog {
    /// Create a demo catalog with the bundled dataset
    pub fn new() -> Self {
        let companies = vec![
            Company::new("acme", "Acme Coffee"),
            Company::new("borealis", "Borealis Fitness"),
        ];
        let products = vec![
            Product::new("acme-coldbrew", "Cold Brew Kit", "acme"),
            Product::new("acme-espresso", "Espresso Subscription", "acme"),
            Product::new("borealis-band", "Pulse Band", "borealis"),
            Product::new("borealis-app", "Coach App", "borealis"),
        ];
        let personas = vec![
            UserPersona::new("acme-commuter", "Busy Commuter", "acme"),
            UserPersona::new("acme-student", "Night-Owl Student", "acme"),
            UserPersona::new("borealis-runner", "Weekend Runner", "borealis"),
        ];

        Self::with_rows(companies, products, personas)
    }

    /// Create a demo catalog from caller-supplied rows
    pub fn with_rows(
        companies: Vec<Company>,
        products: Vec<Product>,
        personas: Vec<UserPersona>,
    ) -> Self {
        Self {
            config: DemoConfig::default(),
            companies,
            products,
            personas,
            call_counts: RwLock::new(CallCounts::default()),
        }
    }

    /// Override the failure toggles
    pub fn with_config(mut self, config: DemoConfig) -> Self {
        self.config = config;
        self
    }

    /// Get the number of times a method was called
    pub fn call_count(&self, method: &str) -> u32 {
        let counts = self.call_counts.read();
        match method {
            "companies" => counts.companies,
            "products_for" => counts.products,
            "personas_for" => counts.personas,
            _ => 0,
        }
    }
}

impl Default for DemoCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogProvider for DemoCatalog {
    fn name(&self) -> &'static str {
        "demo"
    }

    async fn companies(&self) -> Result<Vec<Company>> {
        self.call_counts.write().companies += 1;

        if self.config.fail_companies {
            return Err(Error::catalog_fetch("organizations", "demo catalog failure"));
        }

        Ok(self.companies.clone())
    }

    async fn products_for(&self, company_id: &str) -> Result<Vec<Product>> {
        self.call_counts.write().products += 1;

        if self.config.fail_products {
            return Err(Error::catalog_fetch("products", "demo catalog failure"));
        }

        Ok(self
            .products
            .iter()
            .filter(|p| p.company_id == company_id)
            .cloned()
            .collect())
    }

    async fn personas_for(&self, company_id: &str) -> Result<Vec<UserPersona>> {
        self.call_counts.write().personas += 1;

        if self.config.fail_personas {
            return Err(Error::catalog_fetch("user_personas", "demo catalog failure"));
        }

        Ok(self
            .personas
            .iter()
            .filter(|p| p.company_id == company_id)
            .cloned()
            .collect())
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
