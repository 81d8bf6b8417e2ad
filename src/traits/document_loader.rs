use crate::errors::FactCheckResult;

/// Turns raw document bytes into a single text blob
pub trait DocumentLoader: Send + Sync {
    /// Concatenate the extractable text of every page in document order.
    /// Pages without extractable text contribute an empty segment.
    fn load(&self, bytes: &[u8]) -> FactCheckResult<String>;

    /// Short name of the format this loader understands
    fn format_name(&self) -> &'static str;
}
