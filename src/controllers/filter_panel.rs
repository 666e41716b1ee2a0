// src/controllers/filter_panel.rs
//! Draft filter/sort state, kept apart from what the list currently shows.

use crate::mapper::{JobFilters, JobTypeFilter, SortDirective};

/// Filters and ordering applied together to the list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    pub filters: JobFilters,
    pub sort: SortDirective,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Title,
    Location,
    Tags,
}

#[derive(Debug, Clone, Default)]
pub struct FilterPanel {
    draft: Criteria,
}

impl FilterPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &Criteria {
        &self.draft
    }

    pub fn set_field(&mut self, field: FilterField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FilterField::Title => self.draft.filters.title = value,
            FilterField::Location => self.draft.filters.location = value,
            FilterField::Tags => self.draft.filters.tags = value,
        }
    }

    pub fn set_job_type(&mut self, job_type: JobTypeFilter) {
        self.draft.filters.job_type = job_type;
    }

    /// Sort choices take effect right away; the returned directive is meant
    /// to be applied without waiting for a search.
    pub fn select_sort(&mut self, sort: SortDirective) -> SortDirective {
        self.draft.sort = sort;
        sort
    }

    /// Push the whole draft up as the active criteria
    pub fn search(&self) -> Criteria {
        self.draft.clone()
    }

    /// Clear the draft; the returned defaults replace the active criteria too.
    pub fn reset(&mut self) -> Criteria {
        self.draft = Criteria::default();
        self.draft.clone()
    }
}
