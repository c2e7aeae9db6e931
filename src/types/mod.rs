//! Type definitions for the AdLab studio
//!
//! This module contains the catalog row types and the creative concept
//! records used throughout the workflow.

mod catalog;
mod concept;

pub use catalog::*;
pub use concept::*;
