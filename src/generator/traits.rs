//! Generator trait definitions
//!
//! Defines the ConceptGenerator trait that all generation backends
//! implement.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{GeneratedConcept, GenerateRequest};

/// Core trait for concept generation backends
///
/// The workflow treats generation as an opaque asynchronous operation that
/// can fail; a real model backend can be substituted for the template stub
/// without touching the controller. Implementations return exactly `count`
/// records on success. The trait is object-safe for dynamic dispatch.
#[async_trait]
pub trait ConceptGenerator: Send + Sync {
    /// Get the backend name (e.g., "template")
    fn name(&self) -> &'static str;

    /// Produce `count` concept records for the given request
    async fn generate(
        &self,
        request: &GenerateRequest,
        count: u32,
    ) -> Result<Vec<GeneratedConcept>>;
}

/// Type alias for a shared generator reference
pub type SharedGenerator = Arc<dyn ConceptGenerator>;
