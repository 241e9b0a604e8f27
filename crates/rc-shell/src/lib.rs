//! # rc-shell
//!
//! Outer layer of the registry console.
//!
//! ## Modules
//!
//! - **bootstrap**: config loading, tracing, dependency wiring, `AppRuntime`
//! - **commands**: command handlers returning DTOs or `CommandError`
//! - **events**: broadcast event bus feeding the presentation layer

pub mod bootstrap;
pub mod commands;
pub mod events;

pub use bootstrap::{create_runtime, AppRuntime};
pub use events::EventBus;
