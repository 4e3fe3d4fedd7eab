// Single source of truth for all default values.

// --- Retrieval ---
pub const DEFAULT_MODE: &str = "hybrid";
pub const DEFAULT_K: usize = 25;
pub const DEFAULT_ALPHA: f64 = 0.5;
pub const DEFAULT_RERANKER_ENABLED: bool = true;
pub const DEFAULT_RERANKER_THRESHOLD: f64 = 0.0;
pub const DEFAULT_HYBRID_POOL_MULTIPLIER: usize = 5;
pub const DEFAULT_LEXICAL_SCORE_CAP: f64 = 5.0;
pub const DEFAULT_STORE_FILTER_POOL_MULTIPLIER: usize = 4;
pub const DEFAULT_STORE_FILTER_MIN_POOL: usize = 200;

// --- Embeddings ---
pub const DEFAULT_EMBED_API_KEY: &str = "EMPTY";
pub const DEFAULT_EMBED_L1_CACHE_SIZE: u64 = 10_000;
pub const DEFAULT_EMBED_MAX_RETRIES: u32 = 3;
pub const DEFAULT_EMBED_TIMEOUT_SECS: u64 = 30;

// --- Storage ---
pub const DEFAULT_WEAVIATE_URL: &str = "http://localhost:8080";
pub const DEFAULT_WEAVIATE_CLASS: &str = "Product";
pub const DEFAULT_STORAGE_TIMEOUT_SECS: u64 = 60;

// --- Reranker ---
pub const DEFAULT_RERANKER_BACKEND: &str = "http";
pub const DEFAULT_RERANKER_MODEL: &str = "BAAI/bge-reranker-v2-m3";
pub const DEFAULT_RERANKER_URL: &str = "http://localhost:8081";
pub const DEFAULT_RERANK_CANDIDATE_LIMIT: usize = 0; // 0 = score every candidate
pub const DEFAULT_RERANKER_TIMEOUT_SECS: u64 = 30;

// --- Vision ---
pub const DEFAULT_LLM_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_IMAGE_TO_TEXT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_VISION_TEMPERATURE: f64 = 0.2;
pub const DEFAULT_VISION_TIMEOUT_SECS: u64 = 60;

// --- Paths ---
pub const DEFAULT_BASE_IMAGE_URL: &str = "/images";

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;
