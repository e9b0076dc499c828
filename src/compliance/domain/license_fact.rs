use serde::Serialize;

/// Placeholder the compliance data service uses when it could not determine a license
pub const NOASSERTION: &str = "NOASSERTION";

/// License and copyright data returned by one compliance data lookup.
///
/// Facts are transient: they are merged into a component and then dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LicenseFact {
    license: Option<String>,
    copyrights: Vec<String>,
    score: Option<u32>,
}

impl LicenseFact {
    pub fn new(license: Option<String>, copyrights: Vec<String>, score: Option<u32>) -> Self {
        let license = license
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty());
        let copyrights = copyrights
            .into_iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();
        Self {
            license,
            copyrights,
            score,
        }
    }

    /// A fact carrying no data, used when the service answers with something
    /// other than a definition
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn license(&self) -> Option<&str> {
        self.license.as_deref()
    }

    pub fn copyrights(&self) -> &[String] {
        &self.copyrights
    }

    pub fn score(&self) -> Option<u32> {
        self.score
    }

    /// The declared license, unless it is missing or `NOASSERTION`
    pub fn helpful_license(&self) -> Option<&str> {
        self.license
            .as_deref()
            .filter(|l| !l.eq_ignore_ascii_case(NOASSERTION))
    }

    /// All copyright statements joined by newlines
    pub fn copyright_text(&self) -> Option<String> {
        if self.copyrights.is_empty() {
            None
        } else {
            Some(self.copyrights.join("\n"))
        }
    }

    pub fn is_empty(&self) -> bool {
        self.helpful_license().is_none() && self.copyrights.is_empty()
    }
}
