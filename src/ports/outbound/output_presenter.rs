use crate::shared::Result;

/// OutputPresenter port for delivering a command's final output
///
/// Implementations write either to a file or to stdout. Content is handed
/// over in one piece once the command has finished, so a failed run never
/// leaves a partial result behind.
pub trait OutputPresenter {
    /// # Errors
    /// Returns an error if the destination cannot be written.
    fn present(&self, content: &str) -> Result<()>;
}
