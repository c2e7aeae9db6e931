//! Generator module for concept generation
//!
//! This module provides the abstraction the workflow calls to produce
//! creative concepts, and the template-based stub implementation that
//! stands in for a real generation backend.

mod template;
mod traits;

pub use template::{TemplateConfig, TemplateGenerator};
pub use traits::*;
