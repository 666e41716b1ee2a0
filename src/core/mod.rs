// src/core/mod.rs
//! Backend access

pub mod api_client;

pub use api_client::{ApiClient, ApiError, JobApi};
