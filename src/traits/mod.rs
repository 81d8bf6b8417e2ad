pub mod document_loader;
pub mod llm_client;
pub mod search_service;
pub mod claim_extractor;
pub mod claim_verifier;
pub mod progress;

// Re-export traits
pub use document_loader::DocumentLoader;
pub use llm_client::LlmClient;
pub use search_service::SearchService;
pub use claim_extractor::{ClaimExtractor, ExtractionOutcome};
pub use claim_verifier::ClaimVerifier;
pub use progress::{NoopProgress, ProgressObserver};
