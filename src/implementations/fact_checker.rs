use std::path::Path;
use std::sync::Arc;

use futures::stream::{ self, StreamExt };
use log::{ debug, info, warn };

use crate::config::CheckerOptions;
use crate::errors::{ FactCheckError, FactCheckResult };
use crate::implementations::claim_extractor::LLMClaimExtractor;
use crate::implementations::claim_verifier::LLMClaimVerifier;
use crate::implementations::config::ServiceConfig;
use crate::implementations::document_loader::DocumentSource;
use crate::implementations::llm_client::HttpLlmClient;
use crate::implementations::prompts::{ EXTRACTION_TEMPLATE_NAME, VERIFICATION_TEMPLATE_NAME };
use crate::implementations::tavily::TavilySearchService;
use crate::models::claim::ClaimRecord;
use crate::models::report::{ ClaimResult, ReportSummary, StatusCounts };
use crate::traits::claim_extractor::{ ClaimExtractor, ExtractionOutcome };
use crate::traits::claim_verifier::ClaimVerifier;
use crate::traits::llm_client::LlmClient;
use crate::traits::progress::ProgressObserver;
use crate::traits::search_service::SearchService;

/// Text of a loaded document together with its identifier
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub name: String,
    pub text: String,
}

/// Result of a full load → extract → verify pass
#[derive(Debug)]
pub struct CheckOutcome {
    pub report: ReportSummary,
    /// Why extraction produced no claims, if it failed
    pub extraction_diagnostic: Option<FactCheckError>,
}

/// Drives a document through extraction and verification
pub struct FactChecker {
    extractor: Arc<dyn ClaimExtractor>,
    verifier: Arc<dyn ClaimVerifier>,
    concurrency: usize,
}

impl FactChecker {
    /// Build the HTTP clients once and share them between extractor and verifier
    pub fn from_config(config: &ServiceConfig) -> FactCheckResult<Self> {
        let settings = config.llm_settings()?;
        let llm: Arc<dyn LlmClient> = Arc::new(
            HttpLlmClient::new(settings, config.request_timeout_secs)?
        );
        let search: Arc<dyn SearchService> = Arc::new(
            TavilySearchService::new(config.search_api_key()?, config.search_endpoint())?
        );

        Self::from_clients(config, llm, search)
    }

    /// Build extractor and verifier from the configuration around given clients
    pub fn from_clients(
        config: &ServiceConfig,
        llm: Arc<dyn LlmClient>,
        search: Arc<dyn SearchService>
    ) -> FactCheckResult<Self> {
        let checker = config.checker.clone();

        let extractor = LLMClaimExtractor::new(
            llm.clone(),
            config.get_template(EXTRACTION_TEMPLATE_NAME)?,
            config.extraction.clone(),
            checker.document_char_budget
        );
        let verifier = LLMClaimVerifier::new(
            llm,
            search,
            config.get_template(VERIFICATION_TEMPLATE_NAME)?,
            config.verification.clone(),
            checker.clone()
        );

        Ok(Self::with_components(Arc::new(extractor), Arc::new(verifier), &checker))
    }

    pub fn with_components(
        extractor: Arc<dyn ClaimExtractor>,
        verifier: Arc<dyn ClaimVerifier>,
        options: &CheckerOptions
    ) -> Self {
        Self {
            extractor,
            verifier,
            concurrency: options.concurrency.max(1),
        }
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Read a document from disk and extract its text
    pub fn load(&self, path: &Path) -> FactCheckResult<LoadedDocument> {
        let source = DocumentSource::from_path(path)?;
        let text = source.load_text()?;
        info!("Loaded {} ({} characters)", source.name, text.chars().count());
        Ok(LoadedDocument { name: source.name, text })
    }

    pub async fn extract(&self, text: &str) -> ExtractionOutcome {
        self.extractor.extract(text).await
    }

    /// Verify claims in order and aggregate the verdicts into a report.
    ///
    /// Up to `concurrency` claims are in flight at once, but verdicts are
    /// delivered to the observer and stored in extraction order.
    pub async fn run(
        &self,
        document: &str,
        claims: &[ClaimRecord],
        observer: &dyn ProgressObserver
    ) -> ReportSummary {
        let total = claims.len();
        observer.on_start(total);
        debug!("Verifying {} claims with concurrency {}", total, self.concurrency);

        let verifier = &self.verifier;
        let mut verdicts = stream
            ::iter(claims.iter().map(|claim| verifier.verify(claim)))
            .buffered(self.concurrency);

        let mut counts = StatusCounts::default();
        let mut results = Vec::with_capacity(total);
        let mut pending = claims.iter();
        while let Some(verdict) = verdicts.next().await {
            let Some(claim) = pending.next() else {
                break;
            };
            counts.record(verdict.status);
            observer.on_verdict(results.len(), total, claim, &verdict, &counts);
            results.push(ClaimResult { claim: claim.clone(), verdict });
        }

        observer.on_finish(&counts);
        let summary = ReportSummary::from_results(document, results);
        info!(
            "Checked {} claims: {} verified, {} inaccurate, {} false, {} errors",
            summary.total_claims(),
            counts.verified,
            counts.inaccurate,
            counts.false_claims,
            counts.errors
        );
        summary
    }

    /// Load, extract and verify a document
    pub async fn check(
        &self,
        path: &Path,
        observer: &dyn ProgressObserver
    ) -> FactCheckResult<CheckOutcome> {
        let document = self.load(path)?;
        let extraction = self.extract(&document.text).await;
        if extraction.is_empty() {
            warn!("No claims extracted from {}", document.name);
        }

        let report = self.run(&document.name, &extraction.claims, observer).await;
        Ok(CheckOutcome {
            report,
            extraction_diagnostic: extraction.diagnostic,
        })
    }
}
