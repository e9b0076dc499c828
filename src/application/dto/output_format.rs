/// Output format enumeration for command results
///
/// `Markdown` doubles as the plain-text rendering: tables for component rows
/// and verdicts, one identifier per line for license lists. `None` suppresses
/// output entirely, which turns `sbom parse` into a validation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-printed JSON (default for machine consumption)
    Json,
    /// Human-readable Markdown / plain text
    Markdown,
    /// No output
    None,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" | "plain" | "text" => Ok(OutputFormat::Markdown),
            "none" => Ok(OutputFormat::None),
            _ => Err(format!(
                "Invalid format: {}. Please specify 'json', 'markdown' (or 'plain') or 'none'",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::None => write!(f, "none"),
        }
    }
}
