use crate::adapters::outbound::formatters::{JsonFormatter, MarkdownFormatter};
use crate::application::dto::OutputFormat;
use crate::ports::outbound::ReportFormatter;

/// Factory for creating report formatters
///
/// This factory encapsulates the creation logic for different formatter implementations,
/// following the Factory Pattern. It belongs in the application layer as it orchestrates
/// the selection of infrastructure adapters based on application needs.
pub struct FormatterFactory;

impl FormatterFactory {
    /// Creates a formatter instance for the specified output format
    ///
    /// # Returns
    /// A boxed ReportFormatter, or `None` when the format suppresses output
    ///
    /// # Examples
    /// ```
    /// use compliance_assistant::application::dto::OutputFormat;
    /// use compliance_assistant::application::factories::FormatterFactory;
    ///
    /// assert!(FormatterFactory::create(OutputFormat::Json).is_some());
    /// assert!(FormatterFactory::create(OutputFormat::None).is_none());
    /// ```
    pub fn create(format: OutputFormat) -> Option<Box<dyn ReportFormatter>> {
        match format {
            OutputFormat::Json => Some(Box::new(JsonFormatter::new())),
            OutputFormat::Markdown => Some(Box::new(MarkdownFormatter::new())),
            OutputFormat::None => None,
        }
    }
}
