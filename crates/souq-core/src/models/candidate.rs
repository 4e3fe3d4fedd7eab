/// A product document surrogate returned by a candidate source.
///
/// Candidates are created per request and dropped after the response is
/// shaped; nothing here is persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Candidate {
    /// Stable external identifier.
    pub id: String,
    pub title_en: Option<String>,
    pub title_ar: Option<String>,
    pub brand: Option<String>,
    pub url: Option<String>,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub product_group: Option<String>,
    /// Store-relative image paths, resolved to URLs at response time.
    pub image_paths: Vec<String>,
    pub store: Option<String>,
    /// Full searchable text (titles, brand, description, vision keywords).
    pub combined_text: Option<String>,
    /// Raw lexical (BM25) score. Engine-specific scale, nonnegative.
    pub lexical_score: f64,
    /// Stored document embedding, present only when explicitly requested.
    pub vector: Option<Vec<f32>>,
    /// `1 - distance`, present only on vector search results.
    pub similarity: Option<f64>,
}

impl Candidate {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Best available text for pairwise relevance scoring:
    /// combined text, then English title, then nothing.
    pub fn document_text(&self) -> &str {
        self.combined_text
            .as_deref()
            .filter(|t| !t.is_empty())
            .or_else(|| self.title_en.as_deref().filter(|t| !t.is_empty()))
            .unwrap_or("")
    }

    /// Case-insensitive store equality. Candidates without a store never match.
    pub fn in_store(&self, store: &str) -> bool {
        self.store
            .as_deref()
            .is_some_and(|s| s.to_lowercase() == store.to_lowercase())
    }
}

/// A candidate annotated with its retrieval score and, after reranking,
/// its cross-encoder score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub candidate: Candidate,
    /// Score from the active retrieval mode (lexical, similarity or fused).
    pub final_score: f64,
    /// Cross-encoder relevance. Never blended into `final_score`.
    pub rerank_score: Option<f64>,
}

impl ScoredCandidate {
    pub fn new(candidate: Candidate, final_score: f64) -> Self {
        Self {
            candidate,
            final_score,
            rerank_score: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_text_prefers_combined_text() {
        let mut c = Candidate::new("p1");
        c.title_en = Some("Title".into());
        c.combined_text = Some("Title Brand blue phone".into());
        assert_eq!(c.document_text(), "Title Brand blue phone");
    }

    #[test]
    fn document_text_falls_back_to_title_then_empty() {
        let mut c = Candidate::new("p1");
        assert_eq!(c.document_text(), "");
        c.title_en = Some("Title".into());
        c.combined_text = Some(String::new());
        assert_eq!(c.document_text(), "Title");
    }

    #[test]
    fn store_match_ignores_case() {
        let mut c = Candidate::new("p1");
        assert!(!c.in_store("noon"));
        c.store = Some("Noon".into());
        assert!(c.in_store("noon"));
        assert!(c.in_store("NOON"));
        assert!(!c.in_store("jarir"));
    }
}
