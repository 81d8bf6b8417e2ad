use async_trait::async_trait;

use crate::errors::FactCheckResult;
use crate::models::claim::ClaimRecord;
use crate::models::verdict::VerdictRecord;

/// Checks a single claim against external evidence
#[async_trait]
pub trait ClaimVerifier: Send + Sync {
    /// Fallible verification path; any search, LLM or parse failure is returned
    async fn try_verify(&self, claim: &ClaimRecord) -> FactCheckResult<VerdictRecord>;

    /// Verify a claim. Never fails: errors become an `ERROR` verdict.
    async fn verify(&self, claim: &ClaimRecord) -> VerdictRecord;
}
