//! Command handlers.
//!
//! Each handler runs inside a `command.<area>.<name>` span, calls a use case
//! or the delete-by-date orchestrator, and returns a DTO or a [`CommandError`].

pub mod delete_by_date;
pub mod dto;
pub mod error;
pub mod images;
pub mod notifications;
pub mod repositories;

pub use error::CommandError;
