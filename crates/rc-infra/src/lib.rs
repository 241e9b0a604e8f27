pub mod fs;
pub mod http;
pub mod time;

pub use http::{ApiEndpoint, HttpRegistryClient};
pub use time::SystemClock;
