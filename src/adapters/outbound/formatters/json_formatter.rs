use crate::compliance::domain::{LicenseFact, LicenseSet, OutboundReport, Row};
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;
use serde::Serialize;

/// JsonFormatter adapter rendering results as pretty-printed JSON
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }

    fn render<T: Serialize + ?Sized>(value: &T) -> Result<String> {
        let mut json = serde_json::to_string_pretty(value)?;
        json.push('\n');
        Ok(json)
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct FactView<'a> {
    subject: &'a str,
    license: Option<&'a str>,
    copyrights: &'a [String],
    score: Option<u32>,
}

impl ReportFormatter for JsonFormatter {
    fn format_rows(&self, rows: &[Row]) -> Result<String> {
        Self::render(rows)
    }

    fn format_license_set(&self, set: &LicenseSet) -> Result<String> {
        Self::render(set)
    }

    fn format_outbound(&self, report: &OutboundReport) -> Result<String> {
        Self::render(report)
    }

    fn format_fact(&self, subject: &str, fact: &LicenseFact) -> Result<String> {
        Self::render(&FactView {
            subject,
            license: fact.license(),
            copyrights: fact.copyrights(),
            score: fact.score(),
        })
    }
}
