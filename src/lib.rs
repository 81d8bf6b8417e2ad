pub mod models;
pub mod traits;
pub mod errors;
pub mod config;
pub mod implementations;
#[cfg(test)]
pub mod tests;

// Re-export core components
pub use config::{CheckerOptions, CompletionOptions};
pub use errors::{ErrorSeverity, FactCheckError, FactCheckResult, RecoverableError};
pub use implementations::config::{LlmProvider, ServiceConfig};
pub use implementations::fact_checker::{CheckOutcome, FactChecker, LoadedDocument};
pub use models::{
    common::{
        AccuracyBand,
        ClaimCategory,
        VerdictStatus,
    },
    claim::ClaimRecord,
    verdict::VerdictRecord,
    report::{
        ClaimResult,
        ReportSummary,
        StatusCounts,
    },
};
pub use traits::{
    ClaimExtractor,
    ClaimVerifier,
    DocumentLoader,
    ExtractionOutcome,
    LlmClient,
    NoopProgress,
    ProgressObserver,
    SearchService,
};
