use async_trait::async_trait;

use crate::errors::FactCheckResult;
use crate::models::evidence::{ SearchEvidence, SearchRequest };

/// A web-search engine queried for evidence about a claim
#[async_trait]
pub trait SearchService: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> FactCheckResult<SearchEvidence>;
}
