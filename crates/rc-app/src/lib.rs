//! Registry Console Application Orchestration Layer
//!
//! This crate contains use cases and the delete-by-date workflow orchestration.

pub mod deps;
pub mod settings;
pub mod usecases;

pub use deps::AppDeps;
pub use settings::{ConsoleSettings, RetentionTimings};
