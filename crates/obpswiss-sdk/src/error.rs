//! Error types for the OBP Swiss SDK
//!
//! Every failure of the request pipeline is classified into exactly one
//! variant here. Resource operations never catch; callers branch on
//! [`ObpError::kind`] instead of parsing message text.

use thiserror::Error;

/// Result type for SDK operations
pub type ObpResult<T> = std::result::Result<T, ObpError>;

/// Hint printed with the missing-token error
pub const TOKEN_HINT: &str = "Run: obpswiss config set --token <token>";

/// SDK error taxonomy
#[derive(Debug, Error)]
pub enum ObpError {
    // ========================================================================
    // Local (pre-flight)
    // ========================================================================

    /// No access token configured; raised before any network call
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    // ========================================================================
    // HTTP status classes
    // ========================================================================

    /// HTTP 401
    #[error("Authentication failed. Check your access token.")]
    Authentication,

    /// HTTP 403
    #[error("Access forbidden.")]
    Authorization,

    /// HTTP 404
    #[error("Resource not found.")]
    NotFound,

    /// HTTP 429
    #[error("Rate limit exceeded.")]
    RateLimit,

    /// Any other non-2xx status
    #[error("API Error ({status}): {message}")]
    Api { status: u16, message: String },

    // ========================================================================
    // Transport
    // ========================================================================

    /// The request was sent but no response came back
    #[error("No response from OBP API. Check your internet connection.")]
    Network(#[source] reqwest::Error),

    // ========================================================================
    // Unclassified, passed through unchanged
    // ========================================================================
    #[error(transparent)]
    Http(reqwest::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Fieldless discriminant of [`ObpError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Configuration,
    Authentication,
    Authorization,
    NotFound,
    RateLimit,
    Api,
    Network,
    Unclassified,
}

impl ObpError {
    /// Missing-token error
    pub fn no_token() -> Self {
        Self::Configuration {
            message: format!("no token configured. {}", TOKEN_HINT),
        }
    }

    /// Create an API error
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Classify a non-success HTTP status and its raw body
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            401 => Self::Authentication,
            403 => Self::Authorization,
            404 => Self::NotFound,
            429 => Self::RateLimit,
            _ => Self::api(status, api_message(body)),
        }
    }

    /// Classify an error raised while sending a request
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Self::Http(err)
        } else {
            Self::Network(err)
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration { .. } => ErrorKind::Configuration,
            Self::Authentication => ErrorKind::Authentication,
            Self::Authorization => ErrorKind::Authorization,
            Self::NotFound => ErrorKind::NotFound,
            Self::RateLimit => ErrorKind::RateLimit,
            Self::Api { .. } => ErrorKind::Api,
            Self::Network(_) => ErrorKind::Network,
            Self::Http(_) | Self::Json(_) => ErrorKind::Unclassified,
        }
    }

    /// HTTP status behind this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication => Some(401),
            Self::Authorization => Some(403),
            Self::NotFound => Some(404),
            Self::RateLimit => Some(429),
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Process exit code for the command layer
    pub fn exit_code(&self) -> i32 {
        match self.kind() {
            ErrorKind::Configuration => 1,
            ErrorKind::Authentication => 2,
            ErrorKind::Authorization => 3,
            ErrorKind::NotFound => 4,
            ErrorKind::RateLimit => 5,
            ErrorKind::Api => 6,
            ErrorKind::Network => 7,
            ErrorKind::Unclassified => 10,
        }
    }
}

/// `message` field of a JSON error body, else the raw body
fn api_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert_eq!(ObpError::from_status(401, "").kind(), ErrorKind::Authentication);
        assert_eq!(ObpError::from_status(403, "").kind(), ErrorKind::Authorization);
        assert_eq!(ObpError::from_status(404, "").kind(), ErrorKind::NotFound);
        assert_eq!(ObpError::from_status(429, "").kind(), ErrorKind::RateLimit);

        let err = ObpError::from_status(500, "");
        assert_eq!(err.kind(), ErrorKind::Api);
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_api_message_from_body_field() {
        let err = ObpError::from_status(400, r#"{"message":"Invalid IBAN","code":"FORMAT_ERROR"}"#);
        assert_eq!(err.to_string(), "API Error (400): Invalid IBAN");
    }

    #[test]
    fn test_api_message_falls_back_to_raw_body() {
        let body = r#"{"tppMessages":[{"category":"ERROR","code":"CONSENT_INVALID"}]}"#;
        let err = ObpError::from_status(400, body);
        match err {
            ObpError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, body);
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = ObpError::from_status(502, "Bad Gateway");
        assert!(err.to_string().contains("Bad Gateway"));
    }

    #[test]
    fn test_no_token_is_configuration() {
        let err = ObpError::no_token();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("no token configured"));
    }

    #[test]
    fn test_exit_codes_are_distinct() {
        let errors = [
            ObpError::no_token(),
            ObpError::Authentication,
            ObpError::Authorization,
            ObpError::NotFound,
            ObpError::RateLimit,
            ObpError::api(500, "boom"),
        ];
        let mut codes: Vec<i32> = errors.iter().map(|e| e.exit_code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
        assert!(codes.iter().all(|c| *c != 0));
    }
}
