//! `engine` crate: domain models, the operation table, the typed client and
//! the per-item dispatcher.

pub mod client;
pub mod dispatcher;
pub mod error;
pub mod models;
pub mod operations;
pub mod request;

pub use client::Api3Client;
pub use dispatcher::ResourceDispatcher;
pub use error::{EngineError, NodeError};
pub use models::{
    Credentials, NodeContext, PairedItem, Parameters, Resource, ResultItem, DEFAULT_BASE_URL,
    DEFAULT_NODE_NAME,
};
pub use request::build_call;
