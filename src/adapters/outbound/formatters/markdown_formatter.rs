use crate::compliance::domain::{LicenseFact, LicenseSet, OutboundReport, Row};
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;
use serde_json::Value;

/// MarkdownFormatter adapter rendering results for people to read
///
/// Component rows and the verdict matrix become Markdown tables. The license
/// list is written one identifier per line so it can be piped into other tools.
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Escapes pipe characters and newlines for safe Markdown table rendering
    fn escape_markdown_table_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }

    fn cell(value: &Value) -> String {
        match value {
            Value::Null => String::new(),
            Value::String(s) => Self::escape_markdown_table_cell(s),
            other => Self::escape_markdown_table_cell(&other.to_string()),
        }
    }

    fn table_header(output: &mut String, columns: &[&str]) {
        output.push_str(&format!("| {} |\n", columns.join(" | ")));
        let separators: Vec<String> = columns.iter().map(|c| "-".repeat(c.len().max(3))).collect();
        output.push_str(&format!("|{}|\n", separators.join("|")));
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for MarkdownFormatter {
    fn format_rows(&self, rows: &[Row]) -> Result<String> {
        let Some(first) = rows.first() else {
            return Ok("No components found.\n".to_string());
        };

        let mut output = String::new();
        let columns: Vec<&str> = first.fields().iter().map(|(name, _)| name.as_str()).collect();
        Self::table_header(&mut output, &columns);

        for row in rows {
            let cells: Vec<String> = row.fields().iter().map(|(_, v)| Self::cell(v)).collect();
            output.push_str(&format!("| {} |\n", cells.join(" | ")));
        }
        Ok(output)
    }

    fn format_license_set(&self, set: &LicenseSet) -> Result<String> {
        let mut output = String::new();
        for license in set.licenses() {
            output.push_str(license);
            output.push('\n');
        }
        Ok(output)
    }

    fn format_outbound(&self, report: &OutboundReport) -> Result<String> {
        let mut output = String::from("# Outbound License Candidates\n\n");

        if report.licenses.is_empty() {
            output.push_str("No licenses found in the SBOM.\n");
            return Ok(output);
        }

        output.push_str(&format!(
            "Inbound licenses: {}\n\n",
            report.licenses.join(", ")
        ));

        if report.candidates.is_empty() {
            output.push_str("No outbound license is compatible with all inbound licenses.\n\n");
        } else {
            Self::table_header(&mut output, &["License", "Note"]);
            for candidate in &report.candidates {
                let note = if candidate.has_unknown {
                    "some compatibilities unknown"
                } else {
                    ""
                };
                output.push_str(&format!(
                    "| {} | {} |\n",
                    Self::escape_markdown_table_cell(&candidate.license),
                    note
                ));
            }
            output.push('\n');
        }

        if !report.matrix.is_empty() {
            output.push_str("## Compatibility Matrix\n\n");
            Self::table_header(&mut output, &["Inbound", "Outbound", "Verdict"]);
            for pair in &report.matrix {
                output.push_str(&format!(
                    "| {} | {} | {} |\n",
                    Self::escape_markdown_table_cell(&pair.inbound),
                    Self::escape_markdown_table_cell(&pair.outbound),
                    pair.verdict
                ));
            }
        }
        Ok(output)
    }

    fn format_fact(&self, _subject: &str, fact: &LicenseFact) -> Result<String> {
        let mut output = format!("Declared license: {}\n\n", fact.license().unwrap_or(""));
        output.push_str("Detected copyright attributions:");
        if let Some(copyright) = fact.copyright_text() {
            output.push('\n');
            output.push_str(&copyright);
        }
        output.push('\n');
        Ok(output)
    }
}
