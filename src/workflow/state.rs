//! Selection state types
//!
//! The brief is a tagged optional value so "no brief requested" stays
//! distinguishable from "brief left blank". Dependent-list fetches carry
//! a token; only the response matching the workflow's current token may
//! update state.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────
// Campaign Brief
// ─────────────────────────────────────────────────────────────────

/// The campaign brief supplied (or declined) by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "kind", content = "text")]
pub enum Brief {
    /// Nothing entered yet
    Unset,
    /// Free text, possibly blank
    Text(String),
    /// The user explicitly declined to supply a brief
    OptedOut,
}

impl Brief {
    /// Whether the brief requirement for generation is met:
    /// non-blank text, or an explicit opt-out
    pub fn satisfied(&self) -> bool {
        match self {
            Brief::Unset => false,
            Brief::Text(text) => !text.trim().is_empty(),
            Brief::OptedOut => true,
        }
    }

    /// The brief text to pass to the generator, if any
    pub fn as_option(&self) -> Option<&str> {
        match self {
            Brief::Text(text) => Some(text.as_str()),
            Brief::Unset | Brief::OptedOut => None,
        }
    }

    /// Whether the user opted out of supplying a brief
    pub fn is_opted_out(&self) -> bool {
        matches!(self, Brief::OptedOut)
    }
}

impl Default for Brief {
    fn default() -> Self {
        Brief::Unset
    }
}

// ─────────────────────────────────────────────────────────────────
// Fetch Token
// ─────────────────────────────────────────────────────────────────

/// Token identifying one generation of dependent-list fetches
///
/// Bumped every time the company selection changes; a fetch response is
/// applied only while its token is still current, so a late response for
/// an abandoned selection cannot overwrite the candidate lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchToken(pub(crate) u64);

// ─────────────────────────────────────────────────────────────────
// Selection State
// ─────────────────────────────────────────────────────────────────

/// The current selections and brief
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    /// Selected company id, if any
    pub company: Option<String>,

    /// Selected product id, if any; meaningful only with a company
    pub product: Option<String>,

    /// Selected persona id, if any; meaningful only with a company
    pub persona: Option<String>,

    /// The campaign brief
    pub brief: Brief,
}

impl SelectionState {
    /// Whether company, product, and persona are all selected
    pub fn is_complete(&self) -> bool {
        self.company.is_some() && self.product.is_some() && self.persona.is_some()
    }

    /// The first unselected entity kind, if any
    pub fn first_missing(&self) -> Option<&'static str> {
        if self.company.is_none() {
            Some("company")
        } else if self.product.is_none() {
            Some("product")
        } else if self.persona.is_none() {
            Some("persona")
        } else {
            None
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brief_unset_not_satisfied() {
        assert!(!Brief::Unset.satisfied());
        assert!(Brief::Unset.as_option().is_none());
    }

    #[test]
    fn test_brief_blank_text_not_satisfied() {
        assert!(!Brief::Text(String::new()).satisfied());
        assert!(!Brief::Text("   ".to_string()).satisfied());
    }

    #[test]
    fn test_brief_text_satisfied() {
        let brief = Brief::Text("Summer launch".to_string());
        assert!(brief.satisfied());
        assert_eq!(brief.as_option(), Some("Summer launch"));
    }

    #[test]
    fn test_brief_opt_out_satisfied_without_text() {
        assert!(Brief::OptedOut.satisfied());
        assert!(Brief::OptedOut.as_option().is_none());
        assert!(Brief::OptedOut.is_opted_out());
    }

    #[test]
    fn test_selection_completeness() {
        let mut selection = SelectionState::default();
        assert!(!selection.is_complete());
        assert_eq!(selection.first_missing(), Some("company"));

        selection.company = Some("acme".to_string());
        assert_eq!(selection.first_missing(), Some("product"));

        selection.product = Some("acme-coldbrew".to_string());
        assert_eq!(selection.first_missing(), Some("persona"));

        selection.persona = Some("acme-commuter".to_string());
        assert!(selection.is_complete());
        assert_eq!(selection.first_missing(), None);
    }
}
