//! Port interfaces for the application layer
//!
//! Ports define the contract between the application logic (use cases)
//! and infrastructure implementations. The core never talks to HTTP,
//! the system clock or the presentation layer directly.
//!
//! ## Port Placement Guidelines
//!
//! A port belongs here when it represents a business capability, is used by
//! more than one use case, and is implemented by the infrastructure or shell
//! layer. Otherwise keep it next to the use case that needs it.

mod clock;
mod console_event;
mod errors;
mod registry;

pub use clock::ClockPort;
pub use console_event::ConsoleEventPort;
pub use errors::FetchError;
pub use registry::{DeleteByDateRequest, DeleteImagesRequest, RegistryPort};
