use serde::{Deserialize, Serialize};

use super::candidate::ScoredCandidate;

/// One product in a search response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductResult {
    pub id: String,
    pub title_en: Option<String>,
    pub title_ar: Option<String>,
    pub brand: Option<String>,
    pub url: Option<String>,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub product_group: Option<String>,
    /// Public image URLs.
    pub image_paths: Vec<String>,
    pub store: Option<String>,
    pub score: f64,
    /// 0.0 when reranking did not run.
    pub rerank_score: f64,
}

impl ProductResult {
    pub fn from_scored(scored: &ScoredCandidate, image_urls: Vec<String>) -> Self {
        let c = &scored.candidate;
        Self {
            id: c.id.clone(),
            title_en: c.title_en.clone(),
            title_ar: c.title_ar.clone(),
            brand: c.brand.clone(),
            url: c.url.clone(),
            price: c.price,
            currency: c.currency.clone(),
            product_group: c.product_group.clone(),
            image_paths: image_urls,
            store: c.store.clone(),
            score: scored.final_score,
            rerank_score: scored.rerank_score.unwrap_or(0.0),
        }
    }
}

/// Search outcome: a (possibly empty) result list, or a rejection.
///
/// Serializes to `{query, results}` or `{error}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SearchResponse {
    Results {
        query: String,
        results: Vec<ProductResult>,
    },
    Rejected {
        error: String,
    },
}

impl SearchResponse {
    pub fn rejected(error: impl Into<String>) -> Self {
        Self::Rejected {
            error: error.into(),
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }

    /// Result list, empty for rejections.
    pub fn results(&self) -> &[ProductResult] {
        match self {
            Self::Results { results, .. } => results,
            Self::Rejected { .. } => &[],
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Rejected { error } => Some(error),
            Self::Results { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Candidate;

    #[test]
    fn results_serialize_without_tag() {
        let resp = SearchResponse::Results {
            query: "phone".into(),
            results: Vec::new(),
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json, serde_json::json!({"query": "phone", "results": []}));
    }

    #[test]
    fn rejection_serializes_as_error_object() {
        let json = serde_json::to_value(SearchResponse::rejected("Empty query")).unwrap();
        assert_eq!(json, serde_json::json!({"error": "Empty query"}));
    }

    #[test]
    fn missing_rerank_score_is_zero() {
        let scored = ScoredCandidate::new(Candidate::new("p1"), 0.7);
        let product = ProductResult::from_scored(&scored, Vec::new());
        assert_eq!(product.score, 0.7);
        assert_eq!(product.rerank_score, 0.0);
    }
}
