pub mod config;
pub mod runtime;
pub mod tracing;
pub mod wiring;

pub use config::{apply_env_overrides, load_config, resolve_config};
pub use runtime::{create_runtime, AppRuntime, UseCases};
pub use wiring::wire_dependencies;
