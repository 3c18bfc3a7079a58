//! Core abstractions for diagram generation
//!
//! Descriptor types, configuration, the metadata provider trait, errors and
//! logging shared by the graph engine and its collaborators.

pub mod chumsky_utils;
mod error;
pub mod logging;
mod provider;
mod types;

pub use error::*;
pub use logging::*;
pub use provider::*;
pub use types::*;
