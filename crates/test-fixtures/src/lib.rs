//! In-memory collaborator fakes for souq tests.
//!
//! Every fake implements the matching `souq-core` trait and records how it
//! was called, so tests can assert on pool sizes, pushed-down filters and
//! network-call avoidance without a live backend.

mod builders;
mod cross_encoder;
mod embedder;
mod path_resolver;
mod source;

pub use builders::{cosine, product, CandidateBuilder};
pub use cross_encoder::ScriptedCrossEncoder;
pub use embedder::FixedEmbedder;
pub use path_resolver::RecordingPathResolver;
pub use source::{LexicalCall, StaticCandidateSource, VectorCall};
