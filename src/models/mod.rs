pub mod common;
pub mod claim;
pub mod evidence;
pub mod verdict;
pub mod report;

// Re-export common model types
pub use common::{AccuracyBand, ClaimCategory, VerdictStatus};
pub use claim::ClaimRecord;
pub use evidence::{SearchDepth, SearchEvidence, SearchHit, SearchRequest};
pub use verdict::VerdictRecord;
pub use report::{ClaimResult, ReportSummary, StatusCounts};
