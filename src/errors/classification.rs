use super::types::ReportError;

#[derive(Debug, Clone)]
pub struct ErrorClassification {
    pub error_type: &'static str,
    pub exit_code: i32,
}

impl ReportError {
    /// Classify this error for the failure annotation and the process exit code.
    /// Every variant is fatal; configuration errors exit with 2, the rest with 1.
    pub fn classify(&self) -> ErrorClassification {
        match self {
            ReportError::Config(_) => ErrorClassification {
                error_type: "ConfigError",
                exit_code: 2,
            },
            ReportError::Authentication(_) => ErrorClassification {
                error_type: "AuthenticationError",
                exit_code: 1,
            },
            ReportError::RateLimit(_) => ErrorClassification {
                error_type: "RateLimitError",
                exit_code: 1,
            },
            ReportError::Network(_) => ErrorClassification {
                error_type: "NetworkError",
                exit_code: 1,
            },
            ReportError::Api(_) => ErrorClassification {
                error_type: "ApiError",
                exit_code: 1,
            },
            ReportError::NotFound(_) => ErrorClassification {
                error_type: "NotFoundError",
                exit_code: 1,
            },
            ReportError::Io(_) => ErrorClassification {
                error_type: "IoError",
                exit_code: 1,
            },
            ReportError::Json(_) => ErrorClassification {
                error_type: "JsonError",
                exit_code: 1,
            },
            ReportError::Csv(_) => ErrorClassification {
                error_type: "CsvError",
                exit_code: 1,
            },
        }
    }
}
