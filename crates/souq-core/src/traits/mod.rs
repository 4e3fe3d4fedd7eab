mod candidate_source;
mod cross_encoder;
mod embedding;
mod image_to_text;
mod path_resolver;

pub use candidate_source::ICandidateSource;
pub use cross_encoder::ICrossEncoder;
pub use embedding::IEmbeddingProvider;
pub use image_to_text::IImageToText;
pub use path_resolver::IPathResolver;
