//! Invocation handlers.
//!
//! Handlers receive the parsed Lambda payload together with the
//! configuration and service clients created at cold start. Every error is
//! returned to the caller; nothing is retried here.

pub mod job_completion;
pub mod start_detection;


pub use job_completion::{
    handle_job_completion, process_face_search, process_label_detection, process_notification,
    CompletionOutcome, CompletionServices,
};
pub use start_detection::{handle_upload, start_detection, StartedJobs};

/// Value returned by both functions on success.
pub const SUCCESS: &str = "success";
