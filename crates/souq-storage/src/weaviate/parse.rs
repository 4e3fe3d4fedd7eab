//! Mapping of Weaviate GraphQL responses to candidates.

use serde_json::Value;
use souq_core::errors::SourceError;
use souq_core::models::Candidate;

const BACKEND: &str = "weaviate";

/// Extract `data.Get.<class>` objects from a GraphQL response body.
///
/// GraphQL reports query errors in-band; any entry in `errors` fails the call.
pub fn objects<'a>(body: &'a Value, class: &str) -> Result<&'a [Value], SourceError> {
    if let Some(errors) = body.get("errors").and_then(Value::as_array) {
        if !errors.is_empty() {
            let message = errors
                .iter()
                .filter_map(|e| e.get("message").and_then(Value::as_str))
                .collect::<Vec<_>>()
                .join("; ");
            return Err(SourceError::QueryFailed {
                backend: BACKEND.to_string(),
                message,
            });
        }
    }

    match body.pointer(&format!("/data/Get/{class}")) {
        Some(Value::Array(items)) => Ok(items.as_slice()),
        Some(Value::Null) | None => Ok(&[]),
        Some(other) => Err(SourceError::MalformedResponse {
            backend: BACKEND.to_string(),
            reason: format!("expected array at data.Get.{class}, found {other}"),
        }),
    }
}

/// Map one BM25 result object. A missing score counts as 1.0.
pub fn bm25_candidate(obj: &Value, with_vector: bool) -> Candidate {
    let mut candidate = base_candidate(obj);
    candidate.lexical_score = additional(obj, "score")
        .and_then(number)
        .unwrap_or(1.0);
    if with_vector {
        candidate.vector = additional(obj, "vector").and_then(float_vec);
    }
    candidate
}

/// Map one near-vector result object. Similarity is `1 - distance`;
/// a missing distance counts as 0.0.
pub fn vector_candidate(obj: &Value) -> Candidate {
    let mut candidate = base_candidate(obj);
    let distance = additional(obj, "distance").and_then(number).unwrap_or(0.0);
    candidate.similarity = Some(1.0 - distance);
    candidate
}

fn base_candidate(obj: &Value) -> Candidate {
    let id = string(obj, "external_id")
        .or_else(|| additional(obj, "id").and_then(|v| v.as_str().map(str::to_string)))
        .unwrap_or_default();

    Candidate {
        id,
        title_en: string(obj, "title_en"),
        title_ar: string(obj, "title_ar"),
        brand: string(obj, "brand"),
        url: string(obj, "url"),
        price: obj.get("price_final").and_then(number),
        currency: string(obj, "currency"),
        product_group: string(obj, "product_group"),
        image_paths: obj
            .get("image_paths")
            .and_then(Value::as_array)
            .map(|paths| {
                paths
                    .iter()
                    .filter_map(|p| p.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default(),
        store: string(obj, "store"),
        combined_text: string(obj, "combined_text"),
        ..Default::default()
    }
}

fn additional<'a>(obj: &'a Value, key: &str) -> Option<&'a Value> {
    obj.get("_additional").and_then(|a| a.get(key))
}

fn string(obj: &Value, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Weaviate returns `_additional.score` as a string; accept both forms.
/// Non-finite values are treated as absent.
fn number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    parsed.filter(|f| f.is_finite())
}

fn float_vec(value: &Value) -> Option<Vec<f32>> {
    let items = value.as_array()?;
    if items.is_empty() {
        return None;
    }
    items.iter().map(|v| v.as_f64().map(|f| f as f32)).collect()
}
