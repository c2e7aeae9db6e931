//! Catalog row types
//!
//! Companies, products, and user personas are sourced from an external
//! catalog and are immutable from the workflow's perspective. Products and
//! personas each belong to exactly one company.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────
// Company
// ─────────────────────────────────────────────────────────────────

/// A company (the catalog stores these as "organizations")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Catalog identifier
    pub id: String,

    /// Display name
    pub name: String,
}

impl Company {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Product
// ─────────────────────────────────────────────────────────────────

/// A product offered by a company
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Identifier of the owning company
    pub company_id: String,
}

impl Product {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        company_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            company_id: company_id.into(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// User Persona
// ─────────────────────────────────────────────────────────────────

/// A target user persona defined by a company
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPersona {
    /// Catalog identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Identifier of the owning company
    pub company_id: String,
}

impl UserPersona {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        company_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            company_id: company_id.into(),
        }
    }
}
