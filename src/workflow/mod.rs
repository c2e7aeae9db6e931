//! Workflow module for selection state and the campaign controller
//!
//! Holds the in-memory state for the chosen company, product, persona,
//! and brief, plus the accumulating list of generated concepts, and
//! orchestrates when generation is allowed.

mod controller;
mod state;

pub use controller::CampaignWorkflow;
pub use state::*;
