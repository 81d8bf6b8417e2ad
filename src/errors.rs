use thiserror::Error;

/// Custom error types for the fact-checking pipeline
#[derive(Debug, Error)]
pub enum FactCheckError {
    #[error("Failed to load document: {0}")]
    LoadError(String),

    #[error("Claim extraction failed: {0}")]
    ExtractionError(String),

    #[error("Claim verification failed: {0}")]
    VerificationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Error in external service {service}: {message}")]
    ExternalServiceError { service: String, message: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Report export error: {0}")]
    ExportError(String),
}

/// Result type specific to fact-checking operations
pub type FactCheckResult<T> = Result<T, FactCheckError>;

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Fatal,
    Error,
    Warning,
}

/// Recoverable vs. non-recoverable errors
pub trait RecoverableError {
    fn is_recoverable(&self) -> bool;
    fn recovery_strategy(&self) -> Option<String>;
}

impl FactCheckError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            FactCheckError::LoadError(_)
            | FactCheckError::ConfigError(_)
            | FactCheckError::InvalidInput(_) => ErrorSeverity::Fatal,
            FactCheckError::ExtractionError(_) | FactCheckError::VerificationError(_) => {
                ErrorSeverity::Warning
            }
            FactCheckError::ExternalServiceError { .. } | FactCheckError::ExportError(_) => {
                ErrorSeverity::Error
            }
        }
    }
}

impl RecoverableError for FactCheckError {
    fn is_recoverable(&self) -> bool {
        matches!(
            self,
            FactCheckError::ExtractionError(_)
                | FactCheckError::VerificationError(_)
                | FactCheckError::ExternalServiceError { .. }
        )
    }

    fn recovery_strategy(&self) -> Option<String> {
        match self {
            FactCheckError::LoadError(_) =>
                Some("Check that the document is a readable, unencrypted PDF or text file".to_string()),
            FactCheckError::ConfigError(_) =>
                Some("Set GOOGLE_API_KEY (or another provider key) and TAVILY_API_KEY, or pass --config".to_string()),
            FactCheckError::ExtractionError(_) =>
                Some("Make sure the document contains specific factual claims".to_string()),
            FactCheckError::VerificationError(_) | FactCheckError::ExternalServiceError { .. } =>
                Some("The claim is reported as ERROR; re-run later to retry it".to_string()),
            FactCheckError::InvalidInput(_) | FactCheckError::ExportError(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_errors_are_fatal() {
        let err = FactCheckError::LoadError("encrypted".into());
        assert_eq!(err.severity(), ErrorSeverity::Fatal);
        assert!(!err.is_recoverable());
        assert!(err.recovery_strategy().is_some());
    }

    #[test]
    fn per_claim_failures_are_recoverable() {
        let err = FactCheckError::ExternalServiceError {
            service: "Tavily".into(),
            message: "timeout".into(),
        };
        assert!(err.is_recoverable());
        assert_eq!(err.to_string(), "Error in external service Tavily: timeout");
    }
}
