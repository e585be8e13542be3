// src/output/mod.rs
//! Output handling with separate planning and execution.
//!
//! Callers build an [`OutputPlan`] of [`DeliveryTarget`]s; [`deliver`]
//! performs the I/O and reports per-target outcomes.

mod clipboard;
mod paths;
mod types;
mod writer;

pub use clipboard::copy_to_clipboard;
pub use paths::{details_path, prompt_path, standups_path, timestamp_suffix};
pub use types::{
    CompletedOperation, DeliveryTarget, ExecutionStats, FailedOperation, OutputPlan, OutputReport,
};
pub use writer::{deliver, deliver_all, to_pretty_json};
