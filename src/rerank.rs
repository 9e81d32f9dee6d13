//! Rerank collected answers by semantic relevance to the original query.

use async_trait::async_trait;

use crate::aggregator::ResultSet;
use crate::error::HarnessError;

/// One document together with its relevance score and its position in the
/// input sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedDocument {
    /// Index into the document sequence passed to the reranker.
    pub index: usize,
    /// The document text.
    pub text: String,
    /// Relevance score assigned by the scoring model; higher is better.
    pub score: f64,
}

/// Raw relevance scoring against an external model.
///
/// Implementations return one entry per scored document (already truncated
/// to `top_n` if the vendor does that server-side); ordering and input
/// validation are the [`Reranker`]'s job.
#[async_trait]
pub trait RerankProvider: Send + Sync {
    async fn score(
        &self,
        query: &str,
        documents: &[String],
        top_n: usize,
    ) -> Result<Vec<RankedDocument>, HarnessError>;
}

/// Validates input, delegates scoring, and returns the top documents in
/// descending score order.
pub struct Reranker {
    provider: Box<dyn RerankProvider>,
}

impl Reranker {
    pub fn new(provider: Box<dyn RerankProvider>) -> Self {
        Self { provider }
    }

    /// Reranks `documents` against `query`, returning at most `top_n`
    /// results, best first.
    ///
    /// An empty document set or a zero `top_n` is rejected with
    /// `InvalidInput`; a `top_n` larger than the document count is clamped,
    /// not an error.
    pub async fn rerank(
        &self,
        query: &str,
        documents: &[String],
        top_n: usize,
    ) -> Result<Vec<RankedDocument>, HarnessError> {
        if query.trim().is_empty() {
            return Err(HarnessError::InvalidInput(
                "rerank query must not be empty".to_string(),
            ));
        }
        if documents.is_empty() {
            return Err(HarnessError::InvalidInput(
                "rerank needs at least one document".to_string(),
            ));
        }
        if top_n == 0 {
            return Err(HarnessError::InvalidInput(
                "top_n must be at least 1".to_string(),
            ));
        }

        let top_n = top_n.min(documents.len());
        let mut ranked = self.provider.score(query, documents, top_n).await?;
        ranked.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked.truncate(top_n);
        Ok(ranked)
    }
}

/// Collects the successful response texts from a result set, in dispatch
/// order. Failed entries are dropped here so the reranker only ever sees
/// real documents.
pub fn successful_texts(results: &ResultSet) -> Vec<String> {
    results
        .iter()
        .filter_map(|result| result.text().map(str::to_string))
        .collect()
}
