/// Maps store-relative image paths to public URLs.
pub trait IPathResolver: Send + Sync {
    /// Resolve `relative_paths` for `store`. Unknown store or empty input
    /// yields an empty list.
    fn resolve(&self, store: Option<&str>, relative_paths: &[String]) -> Vec<String>;
}
