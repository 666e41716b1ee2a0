// src/mapper.rs
//! Translation between the client's field names/shapes and the backend's
//! REST contract. Nothing in here fails: malformed input is dropped or
//! passed through as empty.

use std::fmt;
use std::str::FromStr;

use crate::types::{JobPayload, JobPosting, JobType, UnknownJobType};
use crate::utils::{non_blank, split_comma_list};

const SORT_NEWEST_FIRST: &str = "posting_date_desc";
const SORT_OLDEST_FIRST: &str = "posting_date_asc";

/// Job type selection in the filter panel. `All` is the "no constraint" sentinel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JobTypeFilter {
    #[default]
    All,
    Only(JobType),
}

impl FromStr for JobTypeFilter {
    type Err = UnknownJobType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() || s.trim().eq_ignore_ascii_case("all") {
            return Ok(JobTypeFilter::All);
        }
        s.parse().map(JobTypeFilter::Only)
    }
}

impl fmt::Display for JobTypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobTypeFilter::All => f.write_str("all"),
            JobTypeFilter::Only(job_type) => fmt::Display::fmt(job_type, f),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilters {
    pub title: String,
    pub location: String,
    pub tags: String,
    pub job_type: JobTypeFilter,
}

/// Ordering by posting date
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirective {
    #[default]
    Unset,
    NewestFirst,
    OldestFirst,
}

impl SortDirective {
    /// Parse the panel's sort keys. Anything unrecognised means no ordering.
    pub fn from_key(key: &str) -> Self {
        match key.trim() {
            "date_desc" => SortDirective::NewestFirst,
            "date_asc" => SortDirective::OldestFirst,
            _ => SortDirective::Unset,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            SortDirective::Unset => "none",
            SortDirective::NewestFirst => "date_desc",
            SortDirective::OldestFirst => "date_asc",
        }
    }

    fn api_value(&self) -> Option<&'static str> {
        match self {
            SortDirective::Unset => None,
            SortDirective::NewestFirst => Some(SORT_NEWEST_FIRST),
            SortDirective::OldestFirst => Some(SORT_OLDEST_FIRST),
        }
    }
}

impl fmt::Display for SortDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SortDirective::Unset => "unsorted",
            SortDirective::NewestFirst => "newest first",
            SortDirective::OldestFirst => "oldest first",
        };
        f.write_str(label)
    }
}

/// Query parameters for `GET /api/jobs/`, in a stable order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    params: Vec<(&'static str, String)>,
}

impl ListQuery {
    pub fn params(&self) -> &[(&'static str, String)] {
        &self.params
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Blank values are omitted; anything else is sent untouched.
    fn push_non_blank(&mut self, key: &'static str, value: &str) {
        if non_blank(value).is_some() {
            self.params.push((key, value.to_string()));
        }
    }
}

pub fn build_list_query(filters: Option<&JobFilters>, sort: SortDirective) -> ListQuery {
    let mut query = ListQuery::default();

    if let Some(filters) = filters {
        query.push_non_blank("title", &filters.title);
        query.push_non_blank("location", &filters.location);
        query.push_non_blank("tag", &filters.tags);
        if let JobTypeFilter::Only(job_type) = filters.job_type {
            query.params.push(("job_type", job_type.as_str().to_string()));
        }
    }

    if let Some(sort) = sort.api_value() {
        query.params.push(("sort", sort.to_string()));
    }

    query
}

/// Editable form model; tags are kept as the user typed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobForm {
    pub title: String,
    pub company: String,
    pub location: String,
    pub job_type: Option<JobType>,
    pub tags: String,
}

impl JobForm {
    pub fn from_posting(posting: &JobPosting) -> Self {
        Self {
            title: posting.title.clone(),
            company: posting.company.clone(),
            location: posting.location.clone(),
            job_type: posting.job_type,
            tags: posting.tags.join(", "),
        }
    }

    pub fn has_required_fields(&self) -> bool {
        [&self.title, &self.company, &self.location]
            .iter()
            .all(|field| non_blank(field).is_some())
    }
}

pub fn build_write_payload(form: &JobForm) -> JobPayload {
    JobPayload {
        title: form.title.clone(),
        company: form.company.clone(),
        location: form.location.clone(),
        job_type: form.job_type,
        tags: split_comma_list(&form.tags),
    }
}
