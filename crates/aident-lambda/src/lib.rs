//! Lambda functions for the Aident detection chain.
//!
//! This crate provides:
//! - `start-detection`: starts label detection and face search for uploaded videos
//! - `job-completion`: turns Rekognition completion notifications into
//!   reports published to SNS and, optionally, Messenger
//! - Configuration loaded once per cold start
//! - Logging setup shared by both binaries

pub mod clients;
pub mod config;
pub mod error;
pub mod events;
pub mod handlers;
pub mod logging;

pub use config::{CompletionConfig, StarterConfig};
pub use error::{AppError, AppResult};
pub use handlers::{
    handle_job_completion, handle_upload, CompletionOutcome, CompletionServices, StartedJobs,
    SUCCESS,
};
pub use logging::{init_tracing, JobLogger};
