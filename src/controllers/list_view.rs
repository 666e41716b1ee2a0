// src/controllers/list_view.rs
//! Text rendering of the job list and the per-item delete flow

use tracing::{info, warn};

use crate::core::JobApi;
use crate::types::{JobId, JobPosting};

pub const EMPTY_LIST_MESSAGE: &str = "No jobs found.";
pub const DELETE_FAILED_MESSAGE: &str = "Failed to delete job.";
pub const DELETE_CONFIRM_TITLE: &str = "Are you sure?";
pub const DELETE_CONFIRM_DESCRIPTION: &str =
    "This action cannot be undone. The job will be permanently deleted.";

/// Asks the user to confirm a destructive action.
pub trait Confirm {
    fn confirm(&mut self, title: &str, description: &str) -> bool;
}

/// Always answers the same way, e.g. for `--yes`
pub struct AutoConfirm(pub bool);

impl Confirm for AutoConfirm {
    fn confirm(&mut self, _title: &str, _description: &str) -> bool {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Cancelled,
    /// The list must be re-fetched
    Deleted,
    /// Alert text for the user; the list is left as it was
    Failed(String),
}

pub fn render_jobs(jobs: &[JobPosting]) -> String {
    if jobs.is_empty() {
        return format!("{}\n", EMPTY_LIST_MESSAGE);
    }

    jobs.iter().map(render_job).collect::<Vec<_>>().join("\n")
}

pub fn render_job(job: &JobPosting) -> String {
    let job_type = job.job_type.map(|t| t.as_str()).unwrap_or("unspecified");
    let posted = job
        .posting_date
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let mut lines = vec![
        format!("#{} {}", job.id, job.title),
        format!("   {} - {} ({})", job.company, job.location, job_type),
        format!("   Posted: {}", posted),
    ];
    if !job.tags.is_empty() {
        let chips: Vec<String> = job.tags.iter().map(|tag| format!("[{}]", tag)).collect();
        lines.push(format!("   {}", chips.join(" ")));
    }

    let mut card = lines.join("\n");
    card.push('\n');
    card
}

/// Confirm, then delete. Only a `Deleted` outcome should trigger a refresh.
pub async fn delete_job<A, C>(api: &A, confirm: &mut C, id: JobId) -> DeleteOutcome
where
    A: JobApi,
    C: Confirm + ?Sized,
{
    if !confirm.confirm(DELETE_CONFIRM_TITLE, DELETE_CONFIRM_DESCRIPTION) {
        info!("Deletion of job {} cancelled", id);
        return DeleteOutcome::Cancelled;
    }

    match api.delete_job(id).await {
        Ok(()) => DeleteOutcome::Deleted,
        Err(e) => {
            warn!("Failed to delete job {}: {}", id, e);
            DeleteOutcome::Failed(DELETE_FAILED_MESSAGE.to_string())
        }
    }
}
