//! Creative concept types
//!
//! A generated concept carries a headline, two ad-copy variants, and a
//! call-to-action. The generator returns bare records; the workflow wraps
//! them into session-scoped `Concept` entities with an id, feedback, and
//! an editing flag. Wire names are camelCase, mirroring the TypeScript
//! definitions of the campaign backend.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─────────────────────────────────────────────────────────────────
// Generation Request
// ─────────────────────────────────────────────────────────────────

/// Resolved inputs for a generation call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    /// Display name of the selected company
    pub company_name: String,

    /// Display name of the selected product
    pub product_name: String,

    /// Display name of the selected user persona
    pub user_persona_name: String,

    /// Optional campaign brief; absent when the user opted out
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign_brief: Option<String>,
}

// ─────────────────────────────────────────────────────────────────
// Generated Concept
// ─────────────────────────────────────────────────────────────────

/// A single concept record as returned by the generation collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedConcept {
    /// Headline text of the creative idea
    pub concept: String,

    /// Outward-facing copy variant
    pub copy_out: String,

    /// Inward-facing copy variant
    pub copy_in: String,

    /// Call-to-action string
    pub cta: String,
}

// ─────────────────────────────────────────────────────────────────
// Concept (session entity)
// ─────────────────────────────────────────────────────────────────

/// A concept tracked by the workflow for the duration of the session
///
/// Created from a [`GeneratedConcept`]; the workflow assigns the id and
/// initializes feedback and the editing flag. Nothing here survives the
/// process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Concept {
    /// Session-unique identifier
    pub id: Uuid,

    /// Headline text of the creative idea
    pub concept: String,

    /// Outward-facing copy variant
    pub copy_out: String,

    /// Inward-facing copy variant
    pub copy_in: String,

    /// Call-to-action string
    pub cta: String,

    /// Free-text feedback for steering future generations
    pub feedback: String,

    /// Whether the concept is currently in editing mode
    pub editing: bool,

    /// When the concept was appended to the session
    pub created_at: DateTime<Utc>,
}

impl Concept {
    /// Wrap a generated record into a fresh session entity
    pub fn from_generated(generated: GeneratedConcept) -> Self {
        Self {
            id: Uuid::new_v4(),
            concept: generated.concept,
            copy_out: generated.copy_out,
            copy_in: generated.copy_in,
            cta: generated.cta,
            feedback: String::new(),
            editing: false,
            created_at: Utc::now(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Editable Fields
// ─────────────────────────────────────────────────────────────────

/// The concept fields that can be edited in place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConceptField {
    Concept,
    CopyOut,
    CopyIn,
    Cta,
    Feedback,
}

impl ConceptField {
    /// All editable fields
    pub fn all() -> &'static [ConceptField] {
        &[
            ConceptField::Concept,
            ConceptField::CopyOut,
            ConceptField::CopyIn,
            ConceptField::Cta,
            ConceptField::Feedback,
        ]
    }

    /// Write `value` into this field of `concept`
    pub fn apply(&self, concept: &mut Concept, value: impl Into<String>) {
        let value = value.into();
        match self {
            ConceptField::Concept => concept.concept = value,
            ConceptField::CopyOut => concept.copy_out = value,
            ConceptField::CopyIn => concept.copy_in = value,
            ConceptField::Cta => concept.cta = value,
            ConceptField::Feedback => concept.feedback = value,
        }
    }
}

impl fmt::Display for ConceptField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConceptField::Concept => "concept",
            ConceptField::CopyOut => "copy-out",
            ConceptField::CopyIn => "copy-in",
            ConceptField::Cta => "cta",
            ConceptField::Feedback => "feedback",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for ConceptField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "concept" => Ok(ConceptField::Concept),
            "copy-out" | "copyout" | "copy_out" => Ok(ConceptField::CopyOut),
            "copy-in" | "copyin" | "copy_in" => Ok(ConceptField::CopyIn),
            "cta" => Ok(ConceptField::Cta),
            "feedback" => Ok(ConceptField::Feedback),
            _ => Err(format!(
                "Unknown concept field '{}'. Valid: concept, copy-out, copy-in, cta, feedback",
                s
            )),
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
