use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("request failed with HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("not signed in or session expired")]
    Unauthorized,

    #[error("could not decode response: {0}")]
    Decode(String),

    #[error("response did not contain a '{0}' payload")]
    MissingPayload(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Worth retrying: connection problems, timeouts and server-side failures
    pub fn is_transient(&self) -> bool {
        match self {
            ApiError::Network(err) => err.is_timeout() || err.is_connect() || err.is_request(),
            ApiError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Short text for a toast
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => "Could not reach the server".to_string(),
            ApiError::Status { message, .. } if !message.is_empty() => message.clone(),
            ApiError::Status { status, .. } => format!("Server returned HTTP {}", status),
            ApiError::Unauthorized => "Please sign in again".to_string(),
            ApiError::Decode(_) | ApiError::MissingPayload(_) => {
                "Unexpected response from the server".to_string()
            }
            ApiError::InvalidRequest(msg) => msg.clone(),
        }
    }
}
