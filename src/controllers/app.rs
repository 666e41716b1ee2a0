// src/controllers/app.rs
//! Root controller: owns the job list, the active criteria and the current view.

use tracing::{info, warn};

use super::filter_panel::Criteria;
use super::form::{FormController, SubmitError};
use super::list_view::{self, Confirm, DeleteOutcome};
use crate::core::JobApi;
use crate::mapper::{build_list_query, JobFilters, SortDirective};
use crate::types::{JobId, JobPosting};

pub const FETCH_FAILED_MESSAGE: &str = "Failed to load jobs.";

/// State changes that cause the list to be fetched again
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefetchTrigger {
    Filters,
    Sort,
}

pub const REFETCH_TRIGGERS: [RefetchTrigger; 2] = [RefetchTrigger::Filters, RefetchTrigger::Sort];

/// Which of the triggers differ between two sets of criteria
pub fn changed_triggers(before: &Criteria, after: &Criteria) -> Vec<RefetchTrigger> {
    REFETCH_TRIGGERS
        .into_iter()
        .filter(|trigger| match trigger {
            RefetchTrigger::Filters => before.filters != after.filters,
            RefetchTrigger::Sort => before.sort != after.sort,
        })
        .collect()
}

#[derive(Debug, Clone)]
pub enum View {
    List,
    Form(FormController),
}

pub struct App<A> {
    api: A,
    jobs: Vec<JobPosting>,
    criteria: Criteria,
    selected: Option<JobPosting>,
    view: View,
    fetch_error: Option<String>,
}

impl<A: JobApi> App<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            jobs: Vec::new(),
            criteria: Criteria::default(),
            selected: None,
            view: View::List,
            fetch_error: None,
        }
    }

    pub fn jobs(&self) -> &[JobPosting] {
        &self.jobs
    }

    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    pub fn selected(&self) -> Option<&JobPosting> {
        self.selected.as_ref()
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    /// Non-blocking banner left by the last failed fetch
    pub fn fetch_error(&self) -> Option<&str> {
        self.fetch_error.as_deref()
    }

    /// Fetch the list for the active criteria. On failure the previous list
    /// stays in place and the error banner is set.
    pub async fn refresh(&mut self) -> bool {
        let query = build_list_query(Some(&self.criteria.filters), self.criteria.sort);

        match self.api.list_jobs(query).await {
            Ok(jobs) => {
                info!("Loaded {} jobs", jobs.len());
                self.jobs = jobs;
                self.fetch_error = None;
                true
            }
            Err(e) => {
                warn!("Keeping last job list after fetch failure: {}", e);
                self.fetch_error = Some(e.user_message(FETCH_FAILED_MESSAGE));
                false
            }
        }
    }

    /// Replace both filters and sort, as the panel's Search and Reset do.
    /// Always fetches exactly once.
    pub async fn apply_criteria(&mut self, criteria: Criteria) -> bool {
        let changed = changed_triggers(&self.criteria, &criteria);
        info!("Applying criteria, changed: {:?}", changed);

        self.criteria = criteria;
        self.refresh().await
    }

    pub async fn set_filters(&mut self, filters: JobFilters) -> bool {
        let next = Criteria {
            filters,
            sort: self.criteria.sort,
        };
        self.update_if_changed(next).await
    }

    pub async fn set_sort(&mut self, sort: SortDirective) -> bool {
        let next = Criteria {
            filters: self.criteria.filters.clone(),
            sort,
        };
        self.update_if_changed(next).await
    }

    async fn update_if_changed(&mut self, next: Criteria) -> bool {
        if changed_triggers(&self.criteria, &next).is_empty() {
            return true;
        }
        self.criteria = next;
        self.refresh().await
    }

    pub fn open_create(&mut self) {
        self.selected = None;
        self.view = View::Form(FormController::create());
    }

    /// Route to the form seeded from a listed posting. Returns false when the
    /// id is not in the current list.
    pub fn open_edit(&mut self, id: JobId) -> bool {
        let Some(job) = self.jobs.iter().find(|job| job.id == id).cloned() else {
            return false;
        };

        self.view = View::Form(FormController::edit(&job));
        self.selected = Some(job);
        true
    }

    pub fn form_mut(&mut self) -> Option<&mut FormController> {
        match &mut self.view {
            View::Form(form) => Some(form),
            View::List => None,
        }
    }

    pub fn close_form(&mut self) {
        self.selected = None;
        self.view = View::List;
    }

    /// Submit the open form. A successful save refreshes the list and routes
    /// back to it; a failed one leaves the form open for another attempt.
    pub async fn submit_form(&mut self) -> Option<Result<JobPosting, SubmitError>> {
        let View::Form(form) = &mut self.view else {
            return None;
        };

        let result = form.submit(&self.api).await;
        if result.is_ok() {
            self.refresh().await;
            self.close_form();
        }
        Some(result)
    }

    pub async fn delete<C>(&mut self, id: JobId, confirm: &mut C) -> DeleteOutcome
    where
        C: Confirm + ?Sized,
    {
        let outcome = list_view::delete_job(&self.api, confirm, id).await;
        if outcome == DeleteOutcome::Deleted {
            self.refresh().await;
        }
        outcome
    }
}
