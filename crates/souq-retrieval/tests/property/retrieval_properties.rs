//! Property tests for fusion, similarity, reranking and merge invariants.

use std::sync::Arc;

use proptest::prelude::*;

use souq_core::config::RetrievalConfig;
use souq_core::models::{Candidate, ScoredCandidate};
use souq_embeddings::EmbeddingGateway;
use souq_retrieval::input::merge;
use souq_retrieval::ranking::{apply_threshold, Reranker};
use souq_retrieval::search::fusion::{fuse, lexical_component};
use souq_retrieval::search::similarity::{cosine, l2_normalize};
use souq_retrieval::{HybridSearch, RetrievalParams, RetrievalStrategy};
use test_fixtures::{product, FixedEmbedder, ScriptedCrossEncoder, StaticCandidateSource};

const DIM: usize = 4;

fn vector() -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(-1.0f32..1.0, DIM)
}

fn pool() -> impl Strategy<Value = Vec<Candidate>> {
    prop::collection::vec((0.0f64..12.0, prop::option::of(vector())), 0..40).prop_map(|items| {
        items
            .into_iter()
            .enumerate()
            .map(|(i, (lexical, vector))| Candidate {
                id: format!("p{i}"),
                lexical_score: lexical,
                vector,
                ..Default::default()
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn alpha_zero_is_normalized_lexical(pool in pool(), query in vector()) {
        let query = l2_normalize(query);
        for s in fuse(pool, &query, 0.0, 5.0) {
            let expected = lexical_component(s.candidate.lexical_score, 5.0);
            prop_assert!((s.final_score - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn alpha_one_is_cosine(pool in pool(), query in vector()) {
        let query = l2_normalize(query);
        for s in fuse(pool, &query, 1.0, 5.0) {
            let expected = s.candidate.vector.as_deref().map_or(0.0, |v| cosine(&query, v));
            prop_assert!((s.final_score - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn fused_scores_sorted_with_stable_ties(pool in pool(), query in vector(), alpha in 0.0f64..=1.0) {
        let fused = fuse(pool, &l2_normalize(query), alpha, 5.0);
        for pair in fused.windows(2) {
            prop_assert!(pair[0].final_score >= pair[1].final_score);
            if pair[0].final_score == pair[1].final_score {
                let a: usize = pair[0].candidate.id[1..].parse().unwrap();
                let b: usize = pair[1].candidate.id[1..].parse().unwrap();
                prop_assert!(a < b, "tie order broken: {} before {}", a, b);
            }
        }
    }

    #[test]
    fn cosine_is_symmetric(a in vector(), b in vector()) {
        prop_assert!((cosine(&a, &b) - cosine(&b, &a)).abs() < 1e-12);
    }

    #[test]
    fn cosine_of_mismatched_lengths_is_zero(a in vector(), extra in 1usize..4) {
        let b: Vec<f32> = a.iter().copied().chain(std::iter::repeat(0.5).take(extra)).collect();
        prop_assert_eq!(cosine(&a, &b), 0.0);
        prop_assert_eq!(cosine(&a, &[]), 0.0);
    }

    #[test]
    fn lexical_component_in_unit_range(raw in 0.0f64..1e6) {
        let v = lexical_component(raw, 5.0);
        prop_assert!((0.0..=1.0).contains(&v));
    }

    #[test]
    fn reranked_sorted_by_rerank_score(scores in prop::collection::vec(-10.0f64..10.0, 0..30)) {
        let table: Vec<(String, f64)> = scores
            .iter()
            .enumerate()
            .map(|(i, s)| (format!("doc {i}"), *s))
            .collect();
        let refs: Vec<(&str, f64)> = table.iter().map(|(d, s)| (d.as_str(), *s)).collect();
        let reranker = Reranker::new(Arc::new(ScriptedCrossEncoder::new(&refs)));

        let input: Vec<ScoredCandidate> = table
            .iter()
            .enumerate()
            .map(|(i, (doc, _))| {
                let mut c = Candidate::new(format!("p{i}"));
                c.combined_text = Some(doc.clone());
                ScoredCandidate::new(c, 1.0)
            })
            .collect();
        let out = reranker.rerank("q", input).unwrap();

        prop_assert_eq!(out.len(), scores.len());
        for pair in out.windows(2) {
            prop_assert!(pair[0].rerank_score >= pair[1].rerank_score);
        }
        for s in &out {
            prop_assert_eq!(s.final_score, 1.0);
        }
    }

    #[test]
    fn threshold_keeps_order_and_drops_below(scores in prop::collection::vec(0.0f64..1.0, 0..30)) {
        let input: Vec<ScoredCandidate> = scores
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let mut sc = ScoredCandidate::new(Candidate::new(format!("p{i}")), 0.0);
                sc.rerank_score = Some(*s);
                sc
            })
            .collect();
        let out = apply_threshold(input, 0.6);

        let expected: Vec<String> = scores
            .iter()
            .enumerate()
            .filter(|(_, s)| **s >= 0.6)
            .map(|(i, _)| format!("p{i}"))
            .collect();
        let actual: Vec<String> = out.into_iter().map(|s| s.candidate.id).collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn hybrid_store_filter_never_leaks(
        stores in prop::collection::vec(prop::sample::select(vec!["noon", "Noon", "jarir", "extra"]), 0..60),
        k in 1usize..15,
    ) {
        let corpus: Vec<Candidate> = stores
            .iter()
            .enumerate()
            .map(|(i, s)| product(&format!("p{i}")).lexical(i as f64 % 6.0).store(s).build())
            .collect();
        let matching = stores.iter().filter(|s| s.eq_ignore_ascii_case("noon")).count();
        let search = HybridSearch::new(
            Arc::new(StaticCandidateSource::new(corpus)),
            Arc::new(EmbeddingGateway::new(Box::new(FixedEmbedder::new(DIM)), 8)),
            &RetrievalConfig::default(),
        );

        let hits = search
            .retrieve("q", &RetrievalParams { k, alpha: 0.5, store: Some("noon") })
            .unwrap();
        prop_assert_eq!(hits.len(), matching.min(k));
        prop_assert!(hits.iter().all(|h| h.candidate.in_store("noon")));
    }

    #[test]
    fn merge_never_has_edge_or_double_spaces(a in "[ a-z\t\n]{0,30}", b in "[ a-z\t\n]{0,30}") {
        let merged = merge(Some(a.as_str()), Some(b.as_str()));
        prop_assert_eq!(merged.trim(), merged.as_str());
        prop_assert!(!merged.contains("  "));
        prop_assert!(!merged.contains('\t') && !merged.contains('\n'));
    }
}

#[test]
fn merge_examples() {
    assert_eq!(merge(Some("  hello  world "), Some("")), "hello world");
    assert_eq!(merge(Some(""), Some("")), "");
}

#[test]
fn worked_fusion_example() {
    // lexical 6.0, stored vector with cosine 0.8 to the query, alpha 0.3.
    let query = vec![1.0, 0.0];
    let doc = Candidate {
        id: "p".into(),
        lexical_score: 6.0,
        vector: Some(vec![0.8, 0.6]),
        ..Default::default()
    };
    let fused = fuse(vec![doc], &query, 0.3, 5.0);
    assert!((fused[0].final_score - 0.94).abs() < 1e-6);
}
