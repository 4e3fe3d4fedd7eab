use souq_core::models::Candidate;

/// Start building a candidate with the given id.
pub fn product(id: &str) -> CandidateBuilder {
    CandidateBuilder {
        candidate: Candidate {
            id: id.to_string(),
            title_en: Some(format!("Product {id}")),
            ..Default::default()
        },
    }
}

/// Fluent candidate construction for tests.
#[derive(Debug, Clone)]
pub struct CandidateBuilder {
    candidate: Candidate,
}

impl CandidateBuilder {
    pub fn lexical(mut self, score: f64) -> Self {
        self.candidate.lexical_score = score;
        self
    }

    pub fn vector(mut self, vector: Vec<f32>) -> Self {
        self.candidate.vector = Some(vector);
        self
    }

    pub fn store(mut self, store: &str) -> Self {
        self.candidate.store = Some(store.to_string());
        self
    }

    pub fn text(mut self, combined_text: &str) -> Self {
        self.candidate.combined_text = Some(combined_text.to_string());
        self
    }

    pub fn images(mut self, paths: &[&str]) -> Self {
        self.candidate.image_paths = paths.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn build(self) -> Candidate {
        self.candidate
    }
}

impl From<CandidateBuilder> for Candidate {
    fn from(builder: CandidateBuilder) -> Self {
        builder.build()
    }
}

/// Reference cosine used by the fakes. 0.0 on empty or mismatched input.
pub fn cosine(a: &[f32], b: &[f32]) -> f64 {
    if a.is_empty() || a.len() != b.len() {
        return 0.0;
    }
    let dot: f64 = a.iter().zip(b).map(|(x, y)| *x as f64 * *y as f64).sum();
    let na: f64 = a.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();
    let nb: f64 = b.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();
    dot / (na * nb + 1e-8)
}
