//! Azure Batch control-plane client.
//!
//! Covers the three operations a launch needs (pool-add, job-add, task-add)
//! with shared-key request signing. The service owns scheduling, autoscaling
//! and retries; this crate only gets requests accepted.

pub mod auth;
pub mod client;
pub mod error;
pub mod models;

pub use auth::SharedKeyCredentials;
pub use client::BatchClient;
pub use error::{BatchError, BatchResult};
