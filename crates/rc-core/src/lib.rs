//! # rc-core
//!
//! Core domain models and retention rules for the registry console.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

// Public module exports
pub mod config;
pub mod events;
pub mod format;
pub mod image;
pub mod ports;
pub mod retention;
pub mod stats;

// Re-export commonly used types at the crate root
pub use config::AppConfig;
pub use events::{ConsoleEvent, Notification, NotificationVariant, OutcomeNotice};
pub use image::{ImageRanking, ImageRecord};
pub use retention::{
    AgeThreshold, ConfirmationState, DeletionFailure, DeletionOutcome, DeletionStatus,
    FrozenSelection, PreviewResult,
};
pub use stats::{GlobalStats, RepositoryLimit, RepositorySize};
