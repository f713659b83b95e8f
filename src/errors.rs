use std::fmt::Display;

/// Errors seen by the client side of the app
#[derive(Debug)]
pub enum TodoError {
    /// The api answered with a non success status
    ApiError { status: u16, message: String },
    HttpError(String),
    InvalidResponse(String),
}

pub type BaseError = Box<dyn std::error::Error>;

impl TodoError {
    /// Builds an `ApiError` from a failed response, reading the
    /// `{"error": ...}` body when there is one
    pub fn from_response_body(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|json| {
                json.get("error")
                    .and_then(|e| e.as_str())
                    .map(String::from)
            })
            .unwrap_or_else(|| {
                if body.trim().is_empty() {
                    format!("Request failed with status {}", status)
                } else {
                    body.trim().to_string()
                }
            });

        TodoError::ApiError { status, message }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, TodoError::ApiError { status: 404, .. })
    }
}

impl Display for TodoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ApiError { status, message } => {
                write!(f, "{} ({})", message, status)
            }
            Self::HttpError(e) => {
                write!(f, "{}", e)
            }
            Self::InvalidResponse(e) => {
                write!(f, "Invalid response: {}", e)
            }
        }
    }
}

impl From<reqwest::Error> for TodoError {
    fn from(e: reqwest::Error) -> Self {
        TodoError::HttpError(e.to_string())
    }
}

impl From<serde_json::Error> for TodoError {
    fn from(e: serde_json::Error) -> Self {
        TodoError::InvalidResponse(e.to_string())
    }
}

impl std::error::Error for TodoError {}
