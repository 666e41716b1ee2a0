// src/types/job.rs
//! Job posting records as exchanged with the job-board backend

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use crate::utils;

pub type JobId = i64;

/// The fixed set of employment types the backend understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobType {
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    #[serde(rename = "Internship")]
    Internship,
    #[serde(rename = "Contract")]
    Contract,
}

impl JobType {
    pub const ALL: [JobType; 4] = [
        JobType::FullTime,
        JobType::PartTime,
        JobType::Internship,
        JobType::Contract,
    ];

    /// Wire and display label
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "Full-time",
            JobType::PartTime => "Part-time",
            JobType::Internship => "Internship",
            JobType::Contract => "Contract",
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown job type: {0}. Use Full-time, Part-time, Internship or Contract")]
pub struct UnknownJobType(pub String);

impl FromStr for JobType {
    type Err = UnknownJobType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        JobType::ALL
            .into_iter()
            .find(|job_type| job_type.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownJobType(s.to_string()))
    }
}

/// A posting as returned by the backend, already normalized for display.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JobPosting {
    pub id: JobId,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub company: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub location: String,
    #[serde(default, deserialize_with = "deserialize_job_type")]
    pub job_type: Option<JobType>,
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_posting_date")]
    pub posting_date: Option<DateTime<Utc>>,
}

/// Tags as they appear on the wire: the backend stores a comma-joined string
/// but may hand back either shape. List entries that are not strings are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawTags {
    Text(String),
    List(Vec<serde_json::Value>),
}

impl RawTags {
    pub fn normalize(self) -> Vec<String> {
        match self {
            RawTags::List(values) => values
                .into_iter()
                .filter_map(|value| match value {
                    serde_json::Value::String(tag) => Some(tag),
                    other => {
                        warn!("Dropping non-string tag from backend: {}", other);
                        None
                    }
                })
                .collect(),
            RawTags::Text(text) => utils::split_comma_list(&text),
        }
    }
}

fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawTags>::deserialize(deserializer)?;
    Ok(raw.map(RawTags::normalize).unwrap_or_default())
}

fn deserialize_job_type<'de, D>(deserializer: D) -> Result<Option<JobType>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(|value| {
        if value.trim().is_empty() {
            return None;
        }
        match value.parse() {
            Ok(job_type) => Some(job_type),
            Err(e) => {
                warn!("Ignoring job type from backend: {}", e);
                None
            }
        }
    }))
}

fn deserialize_posting_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(|value| {
        let parsed = utils::parse_timestamp(value);
        if parsed.is_none() {
            warn!("Unparseable posting_date from backend: {}", value);
        }
        parsed
    }))
}

/// Body sent on create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobPayload {
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_type: Option<JobType>,
    pub tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_job_type_parsing() {
        assert_eq!("Full-time".parse::<JobType>(), Ok(JobType::FullTime));
        assert_eq!("part-time".parse::<JobType>(), Ok(JobType::PartTime));
        assert_eq!(" Contract ".parse::<JobType>(), Ok(JobType::Contract));
        assert!("Freelance".parse::<JobType>().is_err());
        assert!("all".parse::<JobType>().is_err());
    }

    #[test]
    fn test_posting_with_string_tags() {
        let posting: JobPosting = serde_json::from_str(
            r#"{
                "id": 3,
                "title": "Actuarial Analyst",
                "company": "Acme Re",
                "location": "London",
                "job_type": "Full-time",
                "tags": "x, y",
                "posting_date": "2024-05-01T09:30:00"
            }"#,
        )
        .unwrap();

        assert_eq!(posting.tags, vec!["x", "y"]);
        assert_eq!(posting.job_type, Some(JobType::FullTime));
        assert_eq!(
            posting.posting_date,
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_posting_with_array_tags() {
        let posting: JobPosting =
            serde_json::from_str(r#"{"id": 1, "tags": ["x", "y"]}"#).unwrap();
        assert_eq!(posting.tags, vec!["x", "y"]);
    }

    #[test]
    fn test_posting_without_tags() {
        let absent: JobPosting = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        let null: JobPosting = serde_json::from_str(r#"{"id": 1, "tags": null}"#).unwrap();
        let blank: JobPosting = serde_json::from_str(r#"{"id": 1, "tags": ""}"#).unwrap();

        assert!(absent.tags.is_empty());
        assert!(null.tags.is_empty());
        assert!(blank.tags.is_empty());
    }

    #[test]
    fn test_list_with_null_fields_still_decodes() {
        let postings: Vec<JobPosting> = serde_json::from_str(
            r#"[
                {"id": 1, "title": "Welder", "company": "Forge", "location": "Leeds"},
                {"id": 2, "title": "Baker", "company": null, "location": null, "tags": ["bread", null, 4]}
            ]"#,
        )
        .unwrap();

        assert_eq!(postings.len(), 2);
        assert_eq!(postings[0].location, "Leeds");
        assert_eq!(postings[1].title, "Baker");
        assert_eq!(postings[1].company, "");
        assert_eq!(postings[1].location, "");
        assert_eq!(postings[1].tags, vec!["bread"]);
    }

    #[test]
    fn test_posting_with_unknown_job_type_and_bad_date() {
        let posting: JobPosting = serde_json::from_str(
            r#"{"id": 9, "job_type": "Freelance", "posting_date": "yesterday"}"#,
        )
        .unwrap();

        assert_eq!(posting.job_type, None);
        assert_eq!(posting.posting_date, None);
    }

    #[test]
    fn test_payload_serialization() {
        let payload = JobPayload {
            title: "Rust Engineer".to_string(),
            company: "Ferris Ltd".to_string(),
            location: "Remote".to_string(),
            job_type: Some(JobType::PartTime),
            tags: vec!["rust".to_string()],
        };

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "title": "Rust Engineer",
                "company": "Ferris Ltd",
                "location": "Remote",
                "job_type": "Part-time",
                "tags": ["rust"]
            })
        );

        let without_type = JobPayload {
            job_type: None,
            ..payload
        };
        let value = serde_json::to_value(&without_type).unwrap();
        assert!(value.get("job_type").is_none());
    }
}
