//! Classifier gateway: wraps a sentiment inference backend behind lazy,
//! idempotent initialization and normalizes its predictions.

mod gateway;
mod remote;

pub use gateway::{ClassifierBackend, DEFAULT_INIT_TIMEOUT, Gateway, GatewayError};
pub use remote::RemoteClassifier;
