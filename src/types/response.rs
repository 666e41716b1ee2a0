use serde::Deserialize;

/// Error body shape: the backend answers failures with either
/// `{"message": ...}` or `{"error": ...}`.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    pub message: Option<String>,
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.message
            .or(self.error)
            .filter(|text| !text.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
pub struct DeleteResponse {
    pub message: Option<String>,
}
