// src/controllers/form.rs
//! Create/edit form state machine

use thiserror::Error;
use tracing::{info, warn};

use crate::core::JobApi;
use crate::mapper::{build_write_payload, JobForm};
use crate::types::{JobId, JobPosting, JobType};

pub const VALIDATION_MESSAGE: &str = "Title, company, and location are required.";
pub const SAVE_FAILED_MESSAGE: &str = "Failed to save job.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(JobId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormStatus {
    Empty,
    Populated,
    Submitting,
    Succeeded,
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Company,
    Location,
    Tags,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("Title, company, and location are required.")]
    Validation,
    #[error("{0}")]
    Save(String),
}

#[derive(Debug, Clone)]
pub struct FormController {
    mode: FormMode,
    form: JobForm,
    status: FormStatus,
}

impl FormController {
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            form: JobForm::default(),
            status: FormStatus::Empty,
        }
    }

    /// Seed the form from an existing posting
    pub fn edit(posting: &JobPosting) -> Self {
        Self {
            mode: FormMode::Edit(posting.id),
            form: JobForm::from_posting(posting),
            status: FormStatus::Populated,
        }
    }

    pub fn for_selection(selected: Option<&JobPosting>) -> Self {
        selected.map_or_else(Self::create, Self::edit)
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn form(&self) -> &JobForm {
        &self.form
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            FormStatus::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn heading(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Add New Job",
            FormMode::Edit(_) => "Edit Job",
        }
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Title => self.form.title = value,
            FormField::Company => self.form.company = value,
            FormField::Location => self.form.location = value,
            FormField::Tags => self.form.tags = value,
        }
        self.mark_populated();
    }

    pub fn set_job_type(&mut self, job_type: Option<JobType>) {
        self.form.job_type = job_type;
        self.mark_populated();
    }

    fn mark_populated(&mut self) {
        if self.status == FormStatus::Empty {
            self.status = FormStatus::Populated;
        }
    }

    /// Validate and save. Validation failures never reach the network; save
    /// failures keep the entered values so the user can retry.
    pub async fn submit<A: JobApi>(&mut self, api: &A) -> Result<JobPosting, SubmitError> {
        if !self.form.has_required_fields() {
            warn!("Rejected job form with missing required fields");
            self.status = FormStatus::Failed(VALIDATION_MESSAGE.to_string());
            return Err(SubmitError::Validation);
        }

        self.status = FormStatus::Submitting;
        let payload = build_write_payload(&self.form);

        let result = match self.mode {
            FormMode::Create => api.create_job(payload).await,
            FormMode::Edit(id) => api.update_job(id, payload).await,
        };

        match result {
            Ok(saved) => {
                info!("Saved job {} ({})", saved.id, saved.title);
                self.status = FormStatus::Succeeded;
                Ok(saved)
            }
            Err(e) => {
                let message = e.user_message(SAVE_FAILED_MESSAGE);
                self.status = FormStatus::Failed(message.clone());
                Err(SubmitError::Save(message))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::api_client::{ApiError, MockJobApi};
    use mockall::predicate::{always, eq};
    use pretty_assertions::assert_eq;
    use reqwest::StatusCode;

    fn posting(id: JobId) -> JobPosting {
        JobPosting {
            id,
            title: "Data Engineer".to_string(),
            company: "Umbrella".to_string(),
            location: "Raccoon City".to_string(),
            job_type: Some(JobType::FullTime),
            tags: vec!["python".to_string(), "spark".to_string()],
            posting_date: None,
        }
    }

    fn filled_create_form() -> FormController {
        let mut sut = FormController::create();
        sut.set_field(FormField::Title, "Data Engineer");
        sut.set_field(FormField::Company, "Umbrella");
        sut.set_field(FormField::Location, "Raccoon City");
        sut.set_job_type(Some(JobType::FullTime));
        sut.set_field(FormField::Tags, "python , spark");
        sut
    }

    #[test]
    fn test_create_starts_empty_and_becomes_populated() {
        let mut sut = FormController::create();
        assert_eq!(sut.status(), &FormStatus::Empty);
        assert_eq!(sut.heading(), "Add New Job");

        sut.set_field(FormField::Title, "Chef");
        assert_eq!(sut.status(), &FormStatus::Populated);
    }

    #[test]
    fn test_edit_is_seeded_from_posting() {
        let sut = FormController::for_selection(Some(&posting(12)));

        assert_eq!(sut.mode(), FormMode::Edit(12));
        assert_eq!(sut.status(), &FormStatus::Populated);
        assert_eq!(sut.heading(), "Edit Job");
        assert_eq!(sut.form().tags, "python, spark");
        assert_eq!(sut.form().job_type, Some(JobType::FullTime));
    }

    #[tokio::test]
    async fn test_missing_company_is_rejected_locally() {
        // Arrange
        let api = MockJobApi::new();
        let mut sut = filled_create_form();
        sut.set_field(FormField::Company, "");

        // Act
        let result = sut.submit(&api).await;

        // Assert
        assert_eq!(result, Err(SubmitError::Validation));
        assert_eq!(sut.error(), Some("Title, company, and location are required."));
        assert_eq!(sut.form().title, "Data Engineer");
    }

    #[tokio::test]
    async fn test_create_sends_mapped_payload() {
        // Arrange
        let mut api = MockJobApi::new();
        api.expect_create_job()
            .once()
            .withf(|payload| {
                payload.title == "Data Engineer"
                    && payload.job_type == Some(JobType::FullTime)
                    && payload.tags == vec!["python", "spark"]
            })
            .return_once(|_| Box::pin(std::future::ready(Ok(posting(30)))));
        let mut sut = filled_create_form();

        // Act
        let result = sut.submit(&api).await;

        // Assert
        assert_eq!(result.map(|saved| saved.id), Ok(30));
        assert_eq!(sut.status(), &FormStatus::Succeeded);
        assert_eq!(sut.error(), None);
    }

    #[tokio::test]
    async fn test_edit_updates_by_id() {
        // Arrange
        let mut api = MockJobApi::new();
        api.expect_update_job()
            .once()
            .with(eq(12), always())
            .return_once(|id, _| Box::pin(std::future::ready(Ok(posting(id)))));
        let mut sut = FormController::edit(&posting(12));
        sut.set_field(FormField::Location, "Remote");

        // Act
        let result = sut.submit(&api).await;

        // Assert
        assert!(result.is_ok());
        assert_eq!(sut.status(), &FormStatus::Succeeded);
    }

    #[tokio::test]
    async fn test_backend_message_is_surfaced() {
        // Arrange
        let mut api = MockJobApi::new();
        api.expect_create_job().once().return_once(|_| {
            Box::pin(std::future::ready(Err(ApiError::Status {
                status: StatusCode::BAD_REQUEST,
                message: Some("job_type is required".to_string()),
            })))
        });
        let mut sut = filled_create_form();

        // Act
        let result = sut.submit(&api).await;

        // Assert
        assert_eq!(result, Err(SubmitError::Save("job_type is required".to_string())));
        assert_eq!(sut.error(), Some("job_type is required"));
        assert_eq!(sut.form().company, "Umbrella");
    }

    #[tokio::test]
    async fn test_generic_message_without_backend_text() {
        // Arrange
        let mut api = MockJobApi::new();
        api.expect_create_job().once().return_once(|_| {
            Box::pin(std::future::ready(Err(ApiError::Status {
                status: StatusCode::BAD_GATEWAY,
                message: None,
            })))
        });
        let mut sut = filled_create_form();

        // Act
        let result = sut.submit(&api).await;

        // Assert
        assert_eq!(result, Err(SubmitError::Save("Failed to save job.".to_string())));
    }
}
