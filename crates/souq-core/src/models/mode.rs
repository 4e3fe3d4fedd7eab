use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::RetrievalError;

/// The closed set of retrieval strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RetrievalMode {
    /// Lexical (BM25) candidates only.
    Keyword,
    /// Nearest-neighbour search on the query embedding only.
    Vector,
    /// Lexical pool re-scored by alpha fusion with cosine similarity.
    Hybrid,
}

impl RetrievalMode {
    pub const ALL: [RetrievalMode; 3] = [Self::Keyword, Self::Vector, Self::Hybrid];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::Vector => "vector",
            Self::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for RetrievalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RetrievalMode {
    type Err = RetrievalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keyword" => Ok(Self::Keyword),
            "vector" => Ok(Self::Vector),
            "hybrid" => Ok(Self::Hybrid),
            _ => Err(RetrievalError::InvalidMode {
                mode: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Hybrid".parse::<RetrievalMode>().unwrap(), RetrievalMode::Hybrid);
        assert_eq!(" keyword ".parse::<RetrievalMode>().unwrap(), RetrievalMode::Keyword);
        assert_eq!("VECTOR".parse::<RetrievalMode>().unwrap(), RetrievalMode::Vector);
    }

    #[test]
    fn unknown_mode_is_typed_error() {
        let err = "semantic".parse::<RetrievalMode>().unwrap_err();
        assert!(matches!(err, RetrievalError::InvalidMode { ref mode } if mode == "semantic"));
    }

    #[test]
    fn display_round_trips() {
        for mode in RetrievalMode::ALL {
            assert_eq!(mode.to_string().parse::<RetrievalMode>().unwrap(), mode);
        }
    }
}
