//! Template generator
//!
//! A stand-in for a real generation backend. Produces deterministic
//! string templates interpolating the product and persona names and a
//! 1-based index, after a fixed simulated latency. No randomness.

use std::time::Duration;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::{GeneratedConcept, GenerateRequest};

use super::ConceptGenerator;

// ─────────────────────────────────────────────────────────────────
// Template Generator Configuration
// ─────────────────────────────────────────────────────────────────

/// Configuration for template generator behavior
#[derive(Debug, Clone)]
pub struct TemplateConfig {
    /// Simulated latency per batch (ms)
    pub latency_ms: u64,

    /// Largest batch a single call may request
    pub max_count: u32,

    /// Whether to fail generation (for exercising error paths)
    pub fail_generate: bool,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            latency_ms: 1000,
            max_count: 10,
            fail_generate: false,
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Template Generator
// ─────────────────────────────────────────────────────────────────

/// Template-based implementation of ConceptGenerator
pub struct TemplateGenerator {
    config: TemplateConfig,
    call_count: RwLock<u32>,
}

impl TemplateGenerator {
    /// Create a new template generator with default configuration
    pub fn new() -> Self {
        Self::with_config(TemplateConfig::default())
    }

    /// Create a new template generator with custom configuration
    pub fn with_config(config: TemplateConfig) -> Self {
        Self {
            config,
            call_count: RwLock::new(0),
        }
    }

    /// Get the number of generate calls made so far
    pub fn call_count(&self) -> u32 {
        *self.call_count.read()
    }

    /// Simulate backend latency
    async fn simulate_latency(&self) {
        if self.config.latency_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.latency_ms)).await;
        }
    }

    /// Render the concept record for the given 1-based index
    fn render(&self, request: &GenerateRequest, index: u32) -> GeneratedConcept {
        let product = &request.product_name;
        let persona = &request.user_persona_name;

        GeneratedConcept {
            concept: format!("AI concept {}: {} for {}", index, product, persona),
            copy_out: format!(
                "Discover how {} transforms the life of {}.",
                product, persona
            ),
            copy_in: format!("{} is for you!", product),
            cta: format!("Learn more about {}", product),
        }
    }
}

impl Default for TemplateGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConceptGenerator for TemplateGenerator {
    fn name(&self) -> &'static str {
        "template"
    }

    async fn generate(
        &self,
        request: &GenerateRequest,
        count: u32,
    ) -> Result<Vec<GeneratedConcept>> {
        *self.call_count.write() += 1;

        if count == 0 || count > self.config.max_count {
            return Err(Error::InvalidCount {
                count,
                max: self.config.max_count,
            });
        }

        if self.config.fail_generate {
            return Err(Error::generation_failed("template generator failure"));
        }

        debug!(
            company = %request.company_name,
            product = %request.product_name,
            persona = %request.user_persona_name,
            brief = request.campaign_brief.is_some(),
            count,
            "Generating creative concepts"
        );

        // One delay per batch, matching the backend this stands in for
        self.simulate_latency().await;

        Ok((1..=count).map(|i| self.render(request, i)).collect())
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
