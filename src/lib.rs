pub mod api;
pub mod config;
pub mod error;
pub mod service;
pub mod types;

pub use error::SolverError;
pub use service::webhook_flow::{FlowOutcome, WebhookFlow};
