//! Catalog module for companies, products, and user personas
//!
//! This module provides the row-fetch abstraction the workflow depends on
//! and implementations for a REST catalog and an in-memory demo catalog.

mod demo;
mod rest;
mod traits;

pub use demo::{DemoCatalog, DemoConfig};
pub use rest::{RestCatalog, RestCatalogConfig};
pub use traits::*;
