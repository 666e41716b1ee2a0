// src/lib.rs
//! Terminal client for a job-board REST backend: listing with filters and
//! sorting, plus creating, editing and deleting postings.

pub mod cli;
pub mod config;
pub mod controllers;
pub mod core;
pub mod mapper;
pub mod shell;
pub mod types;
pub mod utils;

pub use config::ClientConfig;
pub use controllers::App;
pub use crate::core::{ApiClient, ApiError, JobApi};
