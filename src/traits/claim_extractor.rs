use async_trait::async_trait;

use crate::errors::FactCheckError;
use crate::models::claim::ClaimRecord;

/// Claims found in a document, plus the reason extraction came back empty, if any
#[derive(Debug, Default)]
pub struct ExtractionOutcome {
    pub claims: Vec<ClaimRecord>,
    pub diagnostic: Option<FactCheckError>,
}

impl ExtractionOutcome {
    pub fn failed(diagnostic: FactCheckError) -> Self {
        Self { claims: Vec::new(), diagnostic: Some(diagnostic) }
    }

    /// True when there is nothing to verify
    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }
}

/// Pulls verifiable factual claims out of document text
#[async_trait]
pub trait ClaimExtractor: Send + Sync {
    /// Extract claims from `text`. Never fails: extraction problems produce
    /// an empty claim list with a diagnostic.
    async fn extract(&self, text: &str) -> ExtractionOutcome;
}
