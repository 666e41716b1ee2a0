pub mod job;
pub mod response;

pub use job::{JobId, JobPayload, JobPosting, JobType, RawTags, UnknownJobType};
