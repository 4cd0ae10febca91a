use thiserror::Error;

/// Failures talking to the rental service
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server answered {status}: {message}")]
    Status { status: u16, message: String },

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("service unavailable: {0}")]
    Unavailable(String),
}

/// Failures of the booking workflow
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("no property is selected for booking")]
    NotDrafting,

    #[error("unknown booking field `{0}`")]
    UnknownField(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("booking submission task was aborted")]
    Aborted,
}

impl ApiError {
    /// Build a status error, preferring the server's `message` field over the raw body
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| {
                value
                    .get("message")
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| body.trim().to_string());

        ApiError::Status { status, message }
    }
}
