use std::sync::{Arc, Mutex};

use souq_core::errors::{SourceError, SouqResult};
use souq_core::models::Candidate;
use souq_core::traits::ICandidateSource;

use crate::builders::cosine;

/// Arguments of one `get_candidates` call.
#[derive(Debug, Clone, PartialEq)]
pub struct LexicalCall {
    pub query: String,
    pub k: usize,
    pub store: Option<String>,
    pub with_vector: bool,
}

/// Arguments of one `vector_search` call.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorCall {
    pub dim: usize,
    pub k: usize,
    pub store: Option<String>,
}

#[derive(Default)]
struct State {
    lexical_calls: Vec<LexicalCall>,
    vector_calls: Vec<VectorCall>,
    failure: Option<String>,
}

/// Fixed corpus candidate source.
///
/// Lexical results come back in corpus order with their preset lexical
/// scores; the query text is ignored. Vector results are ranked by cosine
/// against each candidate's stored vector. Both honour the store filter
/// the way the real store does (case-insensitive equality).
#[derive(Clone)]
pub struct StaticCandidateSource {
    corpus: Arc<Vec<Candidate>>,
    state: Arc<Mutex<State>>,
}

impl StaticCandidateSource {
    pub fn new(corpus: impl IntoIterator<Item = impl Into<Candidate>>) -> Self {
        Self {
            corpus: Arc::new(corpus.into_iter().map(Into::into).collect()),
            state: Arc::new(Mutex::new(State::default())),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::<Candidate>::new())
    }

    /// Every subsequent call fails with a request error.
    pub fn fail_with(&self, reason: &str) {
        self.state.lock().unwrap().failure = Some(reason.to_string());
    }

    pub fn lexical_calls(&self) -> Vec<LexicalCall> {
        self.state.lock().unwrap().lexical_calls.clone()
    }

    pub fn vector_calls(&self) -> Vec<VectorCall> {
        self.state.lock().unwrap().vector_calls.clone()
    }

    fn check_failure(&self) -> SouqResult<()> {
        match &self.state.lock().unwrap().failure {
            Some(reason) => Err(SourceError::RequestFailed {
                backend: "static".to_string(),
                reason: reason.clone(),
            }
            .into()),
            None => Ok(()),
        }
    }

    fn matching<'a>(&'a self, store: Option<&'a str>) -> impl Iterator<Item = &'a Candidate> {
        self.corpus
            .iter()
            .filter(move |c| store.map_or(true, |s| c.in_store(s)))
    }
}

impl ICandidateSource for StaticCandidateSource {
    fn get_candidates(
        &self,
        query: &str,
        k: usize,
        store: Option<&str>,
        with_vector: bool,
    ) -> SouqResult<Vec<Candidate>> {
        self.state.lock().unwrap().lexical_calls.push(LexicalCall {
            query: query.to_string(),
            k,
            store: store.map(str::to_string),
            with_vector,
        });
        self.check_failure()?;

        Ok(self
            .matching(store)
            .take(k)
            .cloned()
            .map(|mut c| {
                if !with_vector {
                    c.vector = None;
                }
                c
            })
            .collect())
    }

    fn vector_search(
        &self,
        vector: &[f32],
        k: usize,
        store: Option<&str>,
    ) -> SouqResult<Vec<Candidate>> {
        self.state.lock().unwrap().vector_calls.push(VectorCall {
            dim: vector.len(),
            k,
            store: store.map(str::to_string),
        });
        self.check_failure()?;

        let mut hits: Vec<Candidate> = self
            .matching(store)
            .filter(|c| c.vector.is_some())
            .cloned()
            .map(|mut c| {
                c.similarity = Some(cosine(vector, c.vector.as_deref().unwrap_or(&[])));
                c.vector = None;
                c
            })
            .collect();
        hits.sort_by(|a, b| {
            let key = |c: &Candidate| c.similarity.unwrap_or(0.0);
            key(b).total_cmp(&key(a))
        });
        hits.truncate(k);
        Ok(hits)
    }

    fn name(&self) -> &str {
        "static"
    }
}
