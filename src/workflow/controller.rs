//! Campaign workflow controller
//!
//! Orchestrates the selection → brief → generate → edit cycle. Catalog
//! fetch failures are logged and degrade to an empty candidate list;
//! generation failures are logged, leave the concept list unchanged, and
//! propagate so callers can surface a notice.
//!
//! All methods take `&mut self`: the workflow is single-threaded and
//! cooperative, so state updates after a resolved await are applied
//! atomically with respect to any reader.

use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::catalog::SharedCatalog;
use crate::error::{Error, Result};
use crate::generator::SharedGenerator;
use crate::types::{Company, Concept, ConceptField, GenerateRequest, Product, UserPersona};

use super::{Brief, FetchToken, SelectionState};

// ─────────────────────────────────────────────────────────────────
// Campaign Workflow
// ─────────────────────────────────────────────────────────────────

/// The selection & workflow controller for one campaign session
pub struct CampaignWorkflow {
    catalog: SharedCatalog,
    generator: SharedGenerator,

    companies: Vec<Company>,
    products: Vec<Product>,
    personas: Vec<UserPersona>,

    selection: SelectionState,
    concepts: Vec<Concept>,

    /// Set for the duration of a generation call
    generating: bool,

    /// Current dependent-fetch generation; bumped on company change
    fetch_token: u64,
}

impl CampaignWorkflow {
    /// Create a workflow over the given catalog and generator
    pub fn new(catalog: SharedCatalog, generator: SharedGenerator) -> Self {
        Self {
            catalog,
            generator,
            companies: Vec::new(),
            products: Vec::new(),
            personas: Vec::new(),
            selection: SelectionState::default(),
            concepts: Vec::new(),
            generating: false,
            fetch_token: 0,
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Catalog Loading
    // ─────────────────────────────────────────────────────────────

    /// Fetch the company list; on failure, log and leave it empty
    pub async fn load_companies(&mut self) {
        match self.catalog.companies().await {
            Ok(companies) => {
                debug!(count = companies.len(), "Loaded companies");
                self.companies = companies;
            }
            Err(e) => {
                warn!(error = %e.format_for_log(), "Error fetching companies");
                self.companies = Vec::new();
            }
        }
    }

    /// Fetch the products for the selected company
    ///
    /// The response is applied only if `token` is still current; a stale
    /// response for an abandoned company selection is discarded. On fetch
    /// failure, logs the error and leaves the candidate list empty.
    pub async fn refresh_products(&mut self, token: FetchToken) {
        let Some(company_id) = self.selection.company.clone() else {
            return;
        };

        let result = self.catalog.products_for(&company_id).await;

        if token.0 != self.fetch_token {
            debug!(company = %company_id, "Discarding stale product response");
            return;
        }

        match result {
            Ok(products) => {
                debug!(company = %company_id, count = products.len(), "Loaded products");
                self.products = products;
            }
            Err(e) => {
                warn!(error = %e.format_for_log(), "Error fetching products");
                self.products = Vec::new();
            }
        }
    }

    /// Fetch the user personas for the selected company
    ///
    /// Same token and failure semantics as [`Self::refresh_products`].
    pub async fn refresh_personas(&mut self, token: FetchToken) {
        let Some(company_id) = self.selection.company.clone() else {
            return;
        };

        let result = self.catalog.personas_for(&company_id).await;

        if token.0 != self.fetch_token {
            debug!(company = %company_id, "Discarding stale persona response");
            return;
        }

        match result {
            Ok(personas) => {
                debug!(company = %company_id, count = personas.len(), "Loaded personas");
                self.personas = personas;
            }
            Err(e) => {
                warn!(error = %e.format_for_log(), "Error fetching user personas");
                self.personas = Vec::new();
            }
        }
    }

    /// Fetch both dependent candidate lists for the current token
    pub async fn refresh_dependents(&mut self, token: FetchToken) {
        self.refresh_products(token).await;
        self.refresh_personas(token).await;
    }

    // ─────────────────────────────────────────────────────────────
    // Selection
    // ─────────────────────────────────────────────────────────────

    /// Select a company
    ///
    /// Clears the product and persona selections and their candidate
    /// lists (they must be refetched with the returned token).
    pub fn select_company(&mut self, id: impl Into<String>) -> FetchToken {
        self.selection.company = Some(id.into());
        self.clear_dependents()
    }

    /// Clear the company selection and everything that depends on it
    pub fn clear_company(&mut self) -> FetchToken {
        self.selection.company = None;
        self.clear_dependents()
    }

    fn clear_dependents(&mut self) -> FetchToken {
        self.selection.product = None;
        self.selection.persona = None;
        self.products = Vec::new();
        self.personas = Vec::new();
        self.fetch_token += 1;
        FetchToken(self.fetch_token)
    }

    /// Select a product; ignored unless a company is selected
    pub fn select_product(&mut self, id: impl Into<String>) -> bool {
        if self.selection.company.is_none() {
            warn!("Ignoring product selection without a company");
            return false;
        }
        self.selection.product = Some(id.into());
        true
    }

    /// Select a user persona; ignored unless a company is selected
    pub fn select_persona(&mut self, id: impl Into<String>) -> bool {
        if self.selection.company.is_none() {
            warn!("Ignoring persona selection without a company");
            return false;
        }
        self.selection.persona = Some(id.into());
        true
    }

    /// Update the brief text; ignored while opted out
    pub fn set_brief(&mut self, text: impl Into<String>) {
        if self.selection.brief.is_opted_out() {
            debug!("Ignoring brief text while opted out");
            return;
        }
        self.selection.brief = Brief::Text(text.into());
    }

    /// Set or clear the opt-out flag; opting out discards any brief text
    pub fn set_no_brief(&mut self, opted_out: bool) {
        self.selection.brief = if opted_out {
            Brief::OptedOut
        } else {
            Brief::Unset
        };
    }

    // ─────────────────────────────────────────────────────────────
    // Generation
    // ─────────────────────────────────────────────────────────────

    /// Whether generation is currently allowed
    ///
    /// True iff company, product, and persona are all selected and the
    /// brief is either non-blank or explicitly opted out.
    pub fn can_generate(&self) -> bool {
        self.selection.is_complete() && self.selection.brief.satisfied()
    }

    /// Generate `count` concepts and append them to the session list
    ///
    /// Guarded by [`Self::can_generate`] and the busy flag. On success,
    /// appends exactly `count` concepts with fresh session-unique ids,
    /// empty feedback, and editing off, and returns the number appended.
    /// On failure the list is unchanged, the busy flag is cleared, and
    /// the error propagates so callers can surface it.
    pub async fn generate_concepts(&mut self, count: u32) -> Result<usize> {
        if self.generating {
            return Err(Error::GenerationBusy);
        }
        if let Some(missing) = self.selection.first_missing() {
            return Err(Error::SelectionIncomplete { missing });
        }
        if !self.selection.brief.satisfied() {
            return Err(Error::BriefMissing);
        }

        let request = self.resolve_request()?;

        self.generating = true;
        let result = self.generator.generate(&request, count).await;
        self.generating = false;

        match result {
            Ok(generated) => {
                let appended = generated.len();
                self.concepts
                    .extend(generated.into_iter().map(Concept::from_generated));
                info!(
                    appended,
                    total = self.concepts.len(),
                    "Appended generated concepts"
                );
                Ok(appended)
            }
            Err(e) => {
                error!(error = %e.format_for_log(), "Error generating concepts");
                Err(e)
            }
        }
    }

    /// Resolve the selected ids to display names for the generator
    fn resolve_request(&self) -> Result<GenerateRequest> {
        let company_id = self.selection.company.as_deref().unwrap_or_default();
        let product_id = self.selection.product.as_deref().unwrap_or_default();
        let persona_id = self.selection.persona.as_deref().unwrap_or_default();

        let company = self
            .companies
            .iter()
            .find(|c| c.id == company_id)
            .ok_or_else(|| Error::unknown_selection("company", company_id))?;
        let product = self
            .products
            .iter()
            .find(|p| p.id == product_id)
            .ok_or_else(|| Error::unknown_selection("product", product_id))?;
        let persona = self
            .personas
            .iter()
            .find(|p| p.id == persona_id)
            .ok_or_else(|| Error::unknown_selection("persona", persona_id))?;

        Ok(GenerateRequest {
            company_name: company.name.clone(),
            product_name: product.name.clone(),
            user_persona_name: persona.name.clone(),
            campaign_brief: self.selection.brief.as_option().map(str::to_string),
        })
    }

    // ─────────────────────────────────────────────────────────────
    // Concept Editing
    // ─────────────────────────────────────────────────────────────

    /// Enter editing mode for the identified concept
    pub fn begin_edit(&mut self, id: Uuid) -> bool {
        self.set_editing(id, true)
    }

    /// Leave editing mode, keeping the edited values
    ///
    /// No external persistence occurs.
    pub fn save_edit(&mut self, id: Uuid) -> bool {
        // TODO: persist edits once the campaign API exposes a write endpoint
        let found = self.set_editing(id, false);
        if found {
            info!(concept = %id, "Concept saved");
        }
        found
    }

    /// Leave editing mode without saving
    ///
    /// Edits already applied through [`Self::edit_field`] are kept; cancel
    /// only clears the editing flag.
    pub fn cancel_edit(&mut self, id: Uuid) -> bool {
        self.set_editing(id, false)
    }

    fn set_editing(&mut self, id: Uuid, editing: bool) -> bool {
        match self.concepts.iter_mut().find(|c| c.id == id) {
            Some(concept) => {
                concept.editing = editing;
                true
            }
            None => false,
        }
    }

    /// Write `value` into one field of the identified concept
    ///
    /// No other concept is touched.
    pub fn edit_field(&mut self, id: Uuid, field: ConceptField, value: impl Into<String>) -> bool {
        match self.concepts.iter_mut().find(|c| c.id == id) {
            Some(concept) => {
                field.apply(concept, value);
                true
            }
            None => false,
        }
    }

    /// Remove the identified concept from the session list
    ///
    /// Removes at most one entity and preserves the relative order of the
    /// rest. Interactive confirmation is the caller's responsibility.
    pub fn delete_concept(&mut self, id: Uuid) -> bool {
        let before = self.concepts.len();
        self.concepts.retain(|c| c.id != id);
        let removed = self.concepts.len() < before;
        if removed {
            info!(concept = %id, "Concept deleted");
        }
        removed
    }

    // ─────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────

    /// Companies available for selection
    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    /// Products available for the selected company
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// User personas available for the selected company
    pub fn personas(&self) -> &[UserPersona] {
        &self.personas
    }

    /// The current selections and brief
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// The concepts generated so far, in append order
    pub fn concepts(&self) -> &[Concept] {
        &self.concepts
    }

    /// Look up one concept by id
    pub fn concept(&self, id: Uuid) -> Option<&Concept> {
        self.concepts.iter().find(|c| c.id == id)
    }

    /// Whether a generation call is in flight
    pub fn is_generating(&self) -> bool {
        self.generating
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::catalog::{DemoCatalog, DemoConfig};
    use crate::generator::{TemplateConfig, TemplateGenerator};

    fn test_workflow() -> CampaignWorkflow {
        test_workflow_with(DemoCatalog::new(), fast_generator())
    }

    fn fast_generator() -> TemplateGenerator {
        TemplateGenerator::with_config(TemplateConfig {
            latency_ms: 0,
            ..Default::default()
        })
    }

    fn test_workflow_with(
        catalog: DemoCatalog,
        generator: TemplateGenerator,
    ) -> CampaignWorkflow {
        CampaignWorkflow::new(Arc::new(catalog), Arc::new(generator))
    }

    /// Drive the workflow to a generation-ready state on the demo catalog
    async fn ready_workflow() -> CampaignWorkflow {
        let mut workflow = test_workflow();
        workflow.load_companies().await;
        let token = workflow.select_company("acme");
        workflow.refresh_dependents(token).await;
        workflow.select_product("acme-coldbrew");
        workflow.select_persona("acme-commuter");
        workflow.set_no_brief(true);
        workflow
    }

    // ─────────────────────────────────────────────────────────────
    // can_generate
    // ─────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_can_generate_truth_table() {
        let mut workflow = test_workflow();
        workflow.load_companies().await;

        // Nothing selected
        assert!(!workflow.can_generate());

        let token = workflow.select_company("acme");
        workflow.refresh_dependents(token).await;
        assert!(!workflow.can_generate());

        workflow.select_product("acme-coldbrew");
        assert!(!workflow.can_generate());

        workflow.select_persona("acme-commuter");
        // Selection complete, but no brief and no opt-out
        assert!(!workflow.can_generate());

        workflow.set_brief("Summer cold brew push");
        assert!(workflow.can_generate());

        // Blank brief does not satisfy
        workflow.set_brief("   ");
        assert!(!workflow.can_generate());

        workflow.set_no_brief(true);
        assert!(workflow.can_generate());

        workflow.set_no_brief(false);
        assert!(!workflow.can_generate());
    }

    #[tokio::test]
    async fn test_no_persona_blocks_generation_regardless_of_brief() {
        let mut workflow = test_workflow();
        workflow.load_companies().await;
        let token = workflow.select_company("acme");
        workflow.refresh_dependents(token).await;
        workflow.select_product("acme-coldbrew");
        workflow.set_brief("A very thorough brief");

        assert!(!workflow.can_generate());
        let err = workflow.generate_concepts(2).await.unwrap_err();
        assert!(matches!(
            err,
            Error::SelectionIncomplete { missing: "persona" }
        ));
    }

    // ─────────────────────────────────────────────────────────────
    // Selection and candidate lists
    // ─────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_company_change_clears_dependents_before_refetch() {
        let mut workflow = ready_workflow().await;
        assert!(!workflow.products().is_empty());
        assert!(!workflow.personas().is_empty());

        // Reselect: dependent selections and lists clear immediately,
        // before any refetch completes
        workflow.select_company("borealis");
        assert!(workflow.products().is_empty());
        assert!(workflow.personas().is_empty());
        assert!(workflow.selection().product.is_none());
        assert!(workflow.selection().persona.is_none());
    }

    #[tokio::test]
    async fn test_stale_fetch_token_is_discarded() {
        let mut workflow = test_workflow();
        workflow.load_companies().await;

        let stale = workflow.select_company("acme");
        let current = workflow.select_company("borealis");

        // A response carrying the stale token must not touch the lists
        workflow.refresh_products(stale).await;
        assert!(workflow.products().is_empty());

        workflow.refresh_products(current).await;
        assert_eq!(workflow.products().len(), 2);
        assert!(workflow.products().iter().all(|p| p.company_id == "borealis"));
    }

    #[tokio::test]
    async fn test_dependent_selection_requires_company() {
        let mut workflow = test_workflow();
        assert!(!workflow.select_product("acme-coldbrew"));
        assert!(!workflow.select_persona("acme-commuter"));
        assert!(workflow.selection().product.is_none());
        assert!(workflow.selection().persona.is_none());
    }

    #[tokio::test]
    async fn test_fetch_failure_degrades_to_empty_list() {
        let catalog = DemoCatalog::new().with_config(DemoConfig {
            fail_products: true,
            ..Default::default()
        });
        let mut workflow = test_workflow_with(catalog, fast_generator());
        workflow.load_companies().await;

        let token = workflow.select_company("acme");
        workflow.refresh_dependents(token).await;

        assert!(workflow.products().is_empty());
        // Persona fetch still succeeded
        assert_eq!(workflow.personas().len(), 2);
    }

    #[tokio::test]
    async fn test_companies_fetch_failure_degrades_to_empty_list() {
        let catalog = DemoCatalog::new().with_config(DemoConfig {
            fail_companies: true,
            ..Default::default()
        });
        let mut workflow = test_workflow_with(catalog, fast_generator());
        workflow.load_companies().await;
        assert!(workflow.companies().is_empty());
    }

    #[tokio::test]
    async fn test_brief_text_ignored_while_opted_out() {
        let mut workflow = test_workflow();
        workflow.set_no_brief(true);
        workflow.set_brief("should be ignored");
        assert_eq!(workflow.selection().brief, Brief::OptedOut);

        workflow.set_no_brief(false);
        workflow.set_brief("now it sticks");
        assert_eq!(
            workflow.selection().brief,
            Brief::Text("now it sticks".to_string())
        );
    }

    // ─────────────────────────────────────────────────────────────
    // Generation
    // ─────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_generate_appends_exactly_count() {
        let mut workflow = ready_workflow().await;

        let appended = workflow.generate_concepts(2).await.unwrap();
        assert_eq!(appended, 2);
        assert_eq!(workflow.concepts().len(), 2);

        // A second batch appends, never replaces
        let first_ids: Vec<Uuid> = workflow.concepts().iter().map(|c| c.id).collect();
        workflow.generate_concepts(3).await.unwrap();
        assert_eq!(workflow.concepts().len(), 5);
        for (i, id) in first_ids.iter().enumerate() {
            assert_eq!(workflow.concepts()[i].id, *id);
        }
    }

    #[tokio::test]
    async fn test_generated_ids_are_unique() {
        let mut workflow = ready_workflow().await;
        workflow.generate_concepts(3).await.unwrap();
        workflow.generate_concepts(3).await.unwrap();

        let mut ids: Vec<Uuid> = workflow.concepts().iter().map(|c| c.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 6);
    }

    #[tokio::test]
    async fn test_generate_scenario_texts_contain_names_and_indices() {
        // Company with products {P1, P2} and personas {U1}
        let catalog = DemoCatalog::with_rows(
            vec![Company::new("c", "C")],
            vec![
                Product::new("p1", "P1", "c"),
                Product::new("p2", "P2", "c"),
            ],
            vec![UserPersona::new("u1", "U1", "c")],
        );
        let mut workflow = test_workflow_with(catalog, fast_generator());
        workflow.load_companies().await;
        let token = workflow.select_company("c");
        workflow.refresh_dependents(token).await;
        workflow.select_product("p1");
        workflow.select_persona("u1");
        workflow.set_no_brief(true);

        assert!(workflow.concepts().is_empty());
        workflow.generate_concepts(2).await.unwrap();

        assert_eq!(workflow.concepts().len(), 2);
        for (i, concept) in workflow.concepts().iter().enumerate() {
            assert!(concept.concept.contains("P1"));
            assert!(concept.concept.contains("U1"));
            assert!(concept.concept.contains(&(i + 1).to_string()));
            assert!(concept.feedback.is_empty());
            assert!(!concept.editing);
        }
    }

    #[tokio::test]
    async fn test_generate_passes_brief_unless_opted_out() {
        let mut workflow = ready_workflow().await;
        workflow.set_no_brief(false);
        workflow.set_brief("Focus on mornings");

        let request = workflow.resolve_request().unwrap();
        assert_eq!(request.campaign_brief.as_deref(), Some("Focus on mornings"));

        workflow.set_no_brief(true);
        let request = workflow.resolve_request().unwrap();
        assert!(request.campaign_brief.is_none());
    }

    #[tokio::test]
    async fn test_generate_failure_leaves_list_unchanged() {
        let generator = TemplateGenerator::with_config(TemplateConfig {
            latency_ms: 0,
            fail_generate: true,
            ..Default::default()
        });
        let mut workflow = test_workflow_with(DemoCatalog::new(), generator);
        workflow.load_companies().await;
        let token = workflow.select_company("acme");
        workflow.refresh_dependents(token).await;
        workflow.select_product("acme-coldbrew");
        workflow.select_persona("acme-commuter");
        workflow.set_no_brief(true);

        let err = workflow.generate_concepts(2).await.unwrap_err();
        assert!(matches!(err, Error::GenerationFailed { .. }));
        assert!(workflow.concepts().is_empty());
        // Busy flag cleared so the user may retry
        assert!(!workflow.is_generating());
    }

    #[tokio::test]
    async fn test_generate_with_unresolvable_selection_fails() {
        let mut workflow = ready_workflow().await;
        workflow.select_product("not-in-candidates");

        let err = workflow.generate_concepts(2).await.unwrap_err();
        assert!(matches!(
            err,
            Error::UnknownSelection { kind: "product", .. }
        ));
        assert!(workflow.concepts().is_empty());
    }

    #[tokio::test]
    async fn test_generate_without_brief_refused() {
        let mut workflow = ready_workflow().await;
        workflow.set_no_brief(false);

        let err = workflow.generate_concepts(2).await.unwrap_err();
        assert!(matches!(err, Error::BriefMissing));
    }

    // ─────────────────────────────────────────────────────────────
    // Editing lifecycle
    // ─────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_edit_lifecycle() {
        let mut workflow = ready_workflow().await;
        workflow.generate_concepts(1).await.unwrap();
        let id = workflow.concepts()[0].id;

        assert!(!workflow.concept(id).unwrap().editing);

        assert!(workflow.begin_edit(id));
        assert!(workflow.concept(id).unwrap().editing);

        assert!(workflow.save_edit(id));
        assert!(!workflow.concept(id).unwrap().editing);

        workflow.begin_edit(id);
        assert!(workflow.cancel_edit(id));
        assert!(!workflow.concept(id).unwrap().editing);
    }

    #[tokio::test]
    async fn test_edit_field_touches_only_target_concept() {
        let mut workflow = ready_workflow().await;
        workflow.generate_concepts(2).await.unwrap();
        let first = workflow.concepts()[0].id;
        let second = workflow.concepts()[1].id;
        let untouched = workflow.concept(second).unwrap().clone();

        workflow.begin_edit(first);
        assert!(workflow.edit_field(first, ConceptField::Cta, "Order now"));
        assert!(workflow.edit_field(first, ConceptField::Feedback, "punchier"));

        let edited = workflow.concept(first).unwrap();
        assert_eq!(edited.cta, "Order now");
        assert_eq!(edited.feedback, "punchier");

        let other = workflow.concept(second).unwrap();
        assert_eq!(other.cta, untouched.cta);
        assert_eq!(other.feedback, untouched.feedback);
    }

    #[tokio::test]
    async fn test_cancel_keeps_edits() {
        // Documented behavior: cancel only leaves editing mode; values
        // changed through edit_field are not reverted.
        let mut workflow = ready_workflow().await;
        workflow.generate_concepts(1).await.unwrap();
        let id = workflow.concepts()[0].id;

        workflow.begin_edit(id);
        workflow.edit_field(id, ConceptField::Concept, "Rewritten headline");
        workflow.cancel_edit(id);

        let concept = workflow.concept(id).unwrap();
        assert!(!concept.editing);
        assert_eq!(concept.concept, "Rewritten headline");
    }

    #[tokio::test]
    async fn test_edit_unknown_concept_reports_not_found() {
        let mut workflow = ready_workflow().await;
        let ghost = Uuid::new_v4();

        assert!(!workflow.begin_edit(ghost));
        assert!(!workflow.save_edit(ghost));
        assert!(!workflow.cancel_edit(ghost));
        assert!(!workflow.edit_field(ghost, ConceptField::Cta, "x"));
        assert!(!workflow.delete_concept(ghost));
    }

    #[tokio::test]
    async fn test_delete_removes_one_and_preserves_order() {
        let mut workflow = ready_workflow().await;
        workflow.generate_concepts(3).await.unwrap();
        let ids: Vec<Uuid> = workflow.concepts().iter().map(|c| c.id).collect();

        assert!(workflow.delete_concept(ids[1]));
        assert_eq!(workflow.concepts().len(), 2);
        assert_eq!(workflow.concepts()[0].id, ids[0]);
        assert_eq!(workflow.concepts()[1].id, ids[2]);

        // Deleting again is a no-op
        assert!(!workflow.delete_concept(ids[1]));
        assert_eq!(workflow.concepts().len(), 2);
    }
}
