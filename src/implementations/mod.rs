pub mod config;
pub mod prompts;
pub mod normalize;
pub mod document_loader;
pub mod llm_client;
pub mod tavily;
pub mod claim_extractor;
pub mod claim_verifier;
pub mod fact_checker;
