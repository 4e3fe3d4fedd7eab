//! SearchEngine: the request orchestrator.
//!
//! Idle → InputMerged → Retrieved → (Reranked) → Shaped → Done,
//! or Idle → Rejected for an empty query or an unknown mode.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use souq_core::config::RetrievalConfig;
use souq_core::errors::{RetrievalError, SouqResult};
use souq_core::models::{
    ProductResult, RetrievalMode, ScoredCandidate, SearchRequest, SearchResponse,
};
use souq_core::traits::{ICandidateSource, IImageToText, IPathResolver};
use souq_embeddings::EmbeddingGateway;
use tracing::{debug, error, info, warn};

use crate::input;
use crate::ranking::{self, Reranker};
use crate::search::{HybridSearch, KeywordSearch, RetrievalParams, RetrievalStrategy, VectorSearch};

/// Orchestrator states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStage {
    Idle,
    InputMerged,
    Retrieved,
    Reranked,
    Shaped,
    Done,
    Rejected,
}

impl fmt::Display for SearchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::InputMerged => "input_merged",
            Self::Retrieved => "retrieved",
            Self::Reranked => "reranked",
            Self::Shaped => "shaped",
            Self::Done => "done",
            Self::Rejected => "rejected",
        };
        f.write_str(name)
    }
}

/// Records stage transitions with the time spent since the previous one.
struct StageClock {
    stage: SearchStage,
    started: Instant,
    last: Instant,
}

impl StageClock {
    fn start() -> Self {
        let now = Instant::now();
        Self {
            stage: SearchStage::Idle,
            started: now,
            last: now,
        }
    }

    fn advance(&mut self, next: SearchStage) {
        let now = Instant::now();
        debug!(
            from = %self.stage,
            to = %next,
            stage_ms = now.duration_since(self.last).as_millis() as u64,
            "search stage"
        );
        self.stage = next;
        self.last = now;
    }

    fn reject(&mut self, reason: RetrievalError) -> SearchResponse {
        self.advance(SearchStage::Rejected);
        info!(reason = %reason, "request rejected");
        SearchResponse::rejected(reason.to_string())
    }

    fn total_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }
}

/// Multi-modal product search over one candidate source.
pub struct SearchEngine {
    keyword: KeywordSearch,
    vector: VectorSearch,
    hybrid: HybridSearch,
    reranker: Option<Reranker>,
    vision: Option<Arc<dyn IImageToText>>,
    paths: Arc<dyn IPathResolver>,
    config: RetrievalConfig,
}

impl SearchEngine {
    pub fn new(
        source: Arc<dyn ICandidateSource>,
        embeddings: Arc<EmbeddingGateway>,
        paths: Arc<dyn IPathResolver>,
        config: RetrievalConfig,
    ) -> Self {
        Self {
            keyword: KeywordSearch::new(source.clone()),
            vector: VectorSearch::new(source.clone(), embeddings.clone()),
            hybrid: HybridSearch::new(source, embeddings, &config),
            reranker: None,
            vision: None,
            paths,
            config,
        }
    }

    pub fn with_reranker(mut self, reranker: Reranker) -> Self {
        self.reranker = Some(reranker);
        self
    }

    pub fn with_vision(mut self, vision: Arc<dyn IImageToText>) -> Self {
        self.vision = Some(vision);
        self
    }

    pub fn has_reranker(&self) -> bool {
        self.reranker.is_some()
    }

    fn strategy(&self, mode: RetrievalMode) -> &dyn RetrievalStrategy {
        match mode {
            RetrievalMode::Keyword => &self.keyword,
            RetrievalMode::Vector => &self.vector,
            RetrievalMode::Hybrid => &self.hybrid,
        }
    }

    /// Run one request.
    ///
    /// Invalid input yields `Ok` with a rejection. Collaborator failures are
    /// returned as `Err`; see [`SearchEngine::respond`] for the
    /// response-only variant.
    pub fn execute(&self, request: &SearchRequest) -> SouqResult<SearchResponse> {
        let mut clock = StageClock::start();

        let image_text = self.describe_image(request.image_bytes.as_deref())?;
        let query = input::merge(request.text.as_deref(), image_text.as_deref());
        if query.is_empty() {
            return Ok(clock.reject(RetrievalError::EmptyQuery));
        }
        clock.advance(SearchStage::InputMerged);

        let mode = match request.mode.parse::<RetrievalMode>() {
            Ok(mode) => mode,
            Err(reason) => return Ok(clock.reject(reason)),
        };

        let params = RetrievalParams {
            k: request.k,
            alpha: self.effective_alpha(request.alpha),
            store: request.store.as_deref(),
        };
        let mut hits = if params.k == 0 {
            Vec::new()
        } else {
            self.strategy(mode).retrieve(&query, &params)?
        };
        clock.advance(SearchStage::Retrieved);

        if request.reranker {
            match &self.reranker {
                Some(reranker) => {
                    hits = reranker.rerank(&query, hits)?;
                    hits = ranking::apply_threshold(hits, request.reranker_threshold);
                    clock.advance(SearchStage::Reranked);
                }
                None => warn!("reranking requested but no reranker is configured"),
            }
        }

        let results = self.shape(hits, params.k);
        clock.advance(SearchStage::Shaped);

        info!(
            mode = %mode,
            k = params.k,
            store = params.store,
            results = results.len(),
            elapsed_ms = clock.total_ms(),
            "search complete"
        );
        clock.advance(SearchStage::Done);

        Ok(SearchResponse::Results { query, results })
    }

    /// Run one request and fold non-fatal failures into an error response.
    ///
    /// Fatal errors (embedding dimension drift) are still returned as `Err`.
    pub fn respond(&self, request: &SearchRequest) -> SouqResult<SearchResponse> {
        match self.execute(request) {
            Ok(response) => Ok(response),
            Err(e) if e.is_fatal() => {
                error!(error = %e, "fatal search failure");
                Err(e)
            }
            Err(e) => {
                error!(error = %e, "search failed");
                Ok(SearchResponse::rejected(format!("Search failed: {e}")))
            }
        }
    }

    fn describe_image(&self, image: Option<&[u8]>) -> SouqResult<Option<String>> {
        let Some(bytes) = image.filter(|b| !b.is_empty()) else {
            return Ok(None);
        };
        match &self.vision {
            Some(vision) => Ok(Some(vision.process(bytes)?)),
            None => {
                warn!("image supplied but no image-to-text client is configured");
                Ok(None)
            }
        }
    }

    fn effective_alpha(&self, alpha: f64) -> f64 {
        if alpha.is_nan() {
            return self.config.default_alpha;
        }
        alpha.clamp(0.0, 1.0)
    }

    fn shape(&self, hits: Vec<ScoredCandidate>, k: usize) -> Vec<ProductResult> {
        hits.iter()
            .take(k)
            .map(|scored| {
                let c = &scored.candidate;
                let urls = self.paths.resolve(c.store.as_deref(), &c.image_paths);
                ProductResult::from_scored(scored, urls)
            })
            .collect()
    }
}
