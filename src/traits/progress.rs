use crate::models::claim::ClaimRecord;
use crate::models::report::StatusCounts;
use crate::models::verdict::VerdictRecord;

/// Receives incremental progress while claims are being verified
pub trait ProgressObserver: Send + Sync {
    fn on_start(&self, _total: usize) {}

    /// Called once per claim, in extraction order
    fn on_verdict(
        &self,
        index: usize,
        total: usize,
        claim: &ClaimRecord,
        verdict: &VerdictRecord,
        counts: &StatusCounts
    );

    fn on_finish(&self, _counts: &StatusCounts) {}
}

/// Observer that ignores all progress
pub struct NoopProgress;

impl ProgressObserver for NoopProgress {
    fn on_verdict(&self, _: usize, _: usize, _: &ClaimRecord, _: &VerdictRecord, _: &StatusCounts) {}
}
