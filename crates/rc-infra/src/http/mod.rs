//! HTTP adapter for the registry admin API.

mod endpoint;
mod registry_client;
mod wire;

pub use endpoint::ApiEndpoint;
pub use registry_client::HttpRegistryClient;
