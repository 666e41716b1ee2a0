// src/controllers/mod.rs
//! Presentation state for the list and form views

pub mod app;
pub mod filter_panel;
pub mod form;
pub mod list_view;

pub use app::{App, View};
pub use filter_panel::{Criteria, FilterField, FilterPanel};
pub use form::{FormController, FormField, FormMode, FormStatus, SubmitError};
pub use list_view::{AutoConfirm, Confirm, DeleteOutcome};
