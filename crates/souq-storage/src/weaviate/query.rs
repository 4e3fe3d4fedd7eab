//! GraphQL query construction for Weaviate `Get` queries.

/// Product properties fetched for every candidate.
pub const PRODUCT_PROPERTIES: &[&str] = &[
    "external_id",
    "title_en",
    "title_ar",
    "brand",
    "url",
    "price_final",
    "currency",
    "product_group",
    "image_paths",
    "store",
    "combined_text",
];

/// Search operator of a `Get` query.
#[derive(Debug, Clone, Copy)]
pub enum Operator<'a> {
    Bm25 { query: &'a str, with_vector: bool },
    NearVector { vector: &'a [f32] },
}

/// Build a `Get` query against `class` returning up to `limit` objects.
pub fn build_get_query(
    class: &str,
    operator: Operator<'_>,
    limit: usize,
    store: Option<&str>,
) -> String {
    let mut args = Vec::with_capacity(3);
    let additional = match operator {
        Operator::Bm25 { query, with_vector } => {
            args.push(format!("bm25: {{query: {}}}", quote(query)));
            if with_vector {
                "id score vector"
            } else {
                "id score"
            }
        }
        Operator::NearVector { vector } => {
            args.push(format!("nearVector: {{vector: {}}}", vector_literal(vector)));
            "id distance"
        }
    };
    args.push(format!("limit: {limit}"));
    if let Some(store) = store {
        args.push(format!(
            "where: {{path: [\"store\"], operator: Equal, valueText: {}}}",
            quote(store)
        ));
    }

    format!(
        "{{ Get {{ {class}({args}) {{ {props} _additional {{ {additional} }} }} }} }}",
        args = args.join(", "),
        props = PRODUCT_PROPERTIES.join(" "),
    )
}

/// GraphQL string literal. JSON string escaping is a valid subset.
fn quote(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

fn vector_literal(vector: &[f32]) -> String {
    let parts: Vec<String> = vector
        .iter()
        .map(|v| if v.is_finite() { v.to_string() } else { "0".to_string() })
        .collect();
    format!("[{}]", parts.join(", "))
}

/// Class names are interpolated unquoted, so they must be plain identifiers.
pub fn is_valid_class_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bm25_query_with_store_filter() {
        let q = build_get_query(
            "Product",
            Operator::Bm25 {
                query: "iphone 15",
                with_vector: false,
            },
            125,
            Some("noon"),
        );
        assert!(q.starts_with("{ Get { Product(bm25: {query: \"iphone 15\"}, limit: 125, "));
        assert!(q.contains("where: {path: [\"store\"], operator: Equal, valueText: \"noon\"}"));
        assert!(q.contains("_additional { id score }"));
        assert!(q.contains("combined_text"));
    }

    #[test]
    fn bm25_query_requests_vector_only_when_asked() {
        let q = build_get_query(
            "Product",
            Operator::Bm25 {
                query: "x",
                with_vector: true,
            },
            5,
            None,
        );
        assert!(q.contains("_additional { id score vector }"));
        assert!(!q.contains("where:"));
    }

    #[test]
    fn query_text_is_escaped() {
        let q = build_get_query(
            "Product",
            Operator::Bm25 {
                query: "15\" laptop \\ bag",
                with_vector: false,
            },
            1,
            None,
        );
        assert!(q.contains(r#"bm25: {query: "15\" laptop \\ bag"}"#));
    }

    #[test]
    fn near_vector_query_embeds_vector() {
        let q = build_get_query(
            "Product",
            Operator::NearVector {
                vector: &[0.5, -0.25, f32::NAN],
            },
            10,
            None,
        );
        assert!(q.contains("nearVector: {vector: [0.5, -0.25, 0]}"));
        assert!(q.contains("_additional { id distance }"));
    }

    #[test]
    fn class_name_validation() {
        assert!(is_valid_class_name("Product"));
        assert!(is_valid_class_name("Product_v2"));
        assert!(!is_valid_class_name("2Product"));
        assert!(!is_valid_class_name("Product) { x"));
        assert!(!is_valid_class_name(""));
    }
}
