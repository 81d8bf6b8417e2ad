use serde::{ Deserialize, Serialize };

use crate::models::common::{ truncate_chars, VerdictStatus };

/// The outcome of checking one claim against retrieved evidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerdictRecord {
    pub status: VerdictStatus,
    pub correct_info: String,
    pub sources: Vec<String>,
    pub explanation: String,
}

impl VerdictRecord {
    /// Fail-closed verdict for a claim whose verification failed
    pub fn error(reason: &str, max_chars: usize) -> Self {
        Self {
            status: VerdictStatus::Error,
            correct_info: "Could not verify".to_string(),
            sources: Vec::new(),
            explanation: format!("Error: {}", truncate_chars(reason, max_chars)),
        }
    }

    pub fn is_error(&self) -> bool {
        self.status == VerdictStatus::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_verdict_truncates_reason() {
        let verdict = VerdictRecord::error(&"z".repeat(500), 150);
        assert!(verdict.is_error());
        assert_eq!(verdict.correct_info, "Could not verify");
        assert!(verdict.sources.is_empty());
        assert_eq!(verdict.explanation, format!("Error: {}", "z".repeat(150)));
    }
}
