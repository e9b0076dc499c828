/// Network adapters for the ClearlyDefined API
mod clearlydefined_client;
mod coordinates;
mod retry;

pub use clearlydefined_client::{ClearlyDefinedClient, ClearlyDefinedConfig, DEFAULT_API_URL};
pub use coordinates::Coordinates;
pub use retry::{AttemptError, RetryPolicy};
