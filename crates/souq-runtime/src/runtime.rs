//! SouqRuntime: owns the search engine and its collaborators.
//!
//! The runtime is a singleton stored behind `OnceLock`. It's initialized once
//! via `initialize()` and accessed via `get()` for the lifetime of the process.
//!
//! HTTP collaborators block on their own current-thread tokio runtimes, so
//! `search` must be called from a plain thread (or `spawn_blocking`), never
//! directly from inside an async task.

use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use souq_core::config::{RerankerConfig, SouqConfig};
use souq_core::errors::{ConfigError, SouqError, SouqResult};
use souq_core::models::{SearchRequest, SearchResponse};
use souq_core::traits::{ICandidateSource, IImageToText, IPathResolver};
use souq_embeddings::EmbeddingGateway;
use souq_observability::tracing_setup::{self, events};
use souq_retrieval::{HttpCrossEncoder, Reranker, SearchEngine};
use souq_storage::{StorePathResolver, WeaviateSource};
use souq_vision::VisionClient;

/// Global singleton.
static RUNTIME: OnceLock<Arc<SouqRuntime>> = OnceLock::new();

/// The assembled search service.
pub struct SouqRuntime {
    pub config: SouqConfig,
    pub embeddings: Arc<EmbeddingGateway>,
    pub engine: SearchEngine,
}

/// Options for initializing the runtime.
#[derive(Debug, Default)]
pub struct RuntimeOptions {
    /// TOML configuration file. Ignored when `config_toml` is set.
    pub config_path: Option<PathBuf>,
    /// TOML configuration string. If neither is set, uses defaults.
    pub config_toml: Option<String>,
    /// Install the global tracing subscriber.
    pub init_tracing: bool,
}

impl SouqRuntime {
    /// Build every collaborator from the resolved configuration.
    pub fn new(opts: RuntimeOptions) -> SouqResult<Self> {
        let config = resolve_config(&opts)?;
        if opts.init_tracing {
            tracing_setup::init_tracing(&config.observability);
        }

        // Embeddings
        let embeddings = Arc::new(EmbeddingGateway::from_config(&config.embedding)?);

        // Candidate source
        let source: Arc<dyn ICandidateSource> = Arc::new(WeaviateSource::new(&config.storage)?);

        // Image paths
        let paths: Arc<dyn IPathResolver> = Arc::new(StorePathResolver::from_config(&config.paths));

        let mut engine = SearchEngine::new(
            source,
            embeddings.clone(),
            paths,
            config.retrieval.clone(),
        );

        // Reranker (optional)
        let reranker = build_reranker(&config.reranker)?;
        let reranker_name = reranker
            .as_ref()
            .map_or("none".to_string(), |r| r.model_name().to_string());
        if let Some(reranker) = reranker {
            engine = engine.with_reranker(reranker);
        }

        // Vision (optional)
        let vision_enabled = config.vision.enabled;
        if vision_enabled {
            let vision: Arc<dyn IImageToText> = Arc::new(VisionClient::new(&config.vision)?);
            engine = engine.with_vision(vision);
        } else {
            events::degradation_triggered("vision", "disabled by config", "text-only queries");
        }

        events::runtime_initialized(&reranker_name, vision_enabled, embeddings.provider_name());

        Ok(Self {
            config,
            embeddings,
            engine,
        })
    }

    /// Serve one request. Non-fatal failures become `{error}` responses.
    pub fn search(&self, request: &SearchRequest) -> SouqResult<SearchResponse> {
        self.engine.respond(request).inspect_err(|e| {
            if e.is_fatal() {
                events::fatal_search_error(&e.to_string());
            }
        })
    }

    /// A request populated from the configured retrieval defaults.
    pub fn request(&self, text: &str) -> SearchRequest {
        SearchRequest::text(text, &self.config.retrieval)
    }
}

fn resolve_config(opts: &RuntimeOptions) -> SouqResult<SouqConfig> {
    match &opts.config_toml {
        Some(toml_str) => {
            let mut config = SouqConfig::from_toml(toml_str)?;
            config.apply_env_overrides();
            config.validate()?;
            Ok(config)
        }
        None => Ok(SouqConfig::load(opts.config_path.as_deref())?),
    }
}

fn build_reranker(config: &RerankerConfig) -> SouqResult<Option<Reranker>> {
    let encoder: Arc<dyn souq_core::traits::ICrossEncoder> = match config.backend.as_str() {
        "http" => Arc::new(HttpCrossEncoder::new(config)?),
        "fastembed" => fastembed_encoder(config)?,
        "none" => {
            events::degradation_triggered("reranker", "disabled by config", "retrieval order");
            return Ok(None);
        }
        other => {
            return Err(ConfigError::ValidationFailed {
                field: "reranker.backend".to_string(),
                message: format!("unknown backend {other:?}"),
            }
            .into())
        }
    };

    Ok(Some(
        Reranker::new(encoder).with_candidate_limit(config.candidate_limit),
    ))
}

#[cfg(feature = "reranker")]
fn fastembed_encoder(
    config: &RerankerConfig,
) -> SouqResult<Arc<dyn souq_core::traits::ICrossEncoder>> {
    Ok(Arc::new(souq_retrieval::ranking::FastembedCrossEncoder::new(
        &config.model,
    )?))
}

#[cfg(not(feature = "reranker"))]
fn fastembed_encoder(
    _config: &RerankerConfig,
) -> SouqResult<Arc<dyn souq_core::traits::ICrossEncoder>> {
    Err(ConfigError::ValidationFailed {
        field: "reranker.backend".to_string(),
        message: "fastembed backend requires the `reranker` feature".to_string(),
    }
    .into())
}

/// Initialize the global SouqRuntime singleton.
///
/// Returns an error if already initialized or if initialization fails.
pub fn initialize(opts: RuntimeOptions) -> SouqResult<()> {
    if is_initialized() {
        return Err(SouqError::AlreadyInitialized);
    }
    let runtime = SouqRuntime::new(opts)?;
    RUNTIME
        .set(Arc::new(runtime))
        .map_err(|_| SouqError::AlreadyInitialized)
}

/// Get a reference to the global SouqRuntime.
///
/// Returns an error if not yet initialized.
pub fn get() -> SouqResult<Arc<SouqRuntime>> {
    RUNTIME.get().cloned().ok_or(SouqError::NotInitialized)
}

/// Check if the runtime has been initialized.
pub fn is_initialized() -> bool {
    RUNTIME.get().is_some()
}

/// Serve one request on the global runtime.
pub fn search(request: &SearchRequest) -> SouqResult<SearchResponse> {
    get()?.search(request)
}
