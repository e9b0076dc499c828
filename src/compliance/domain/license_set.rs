use serde::Serialize;
use std::collections::BTreeSet;

/// Distinct license identifiers found in one SBOM.
///
/// Both sets are ordered, so iterating or serializing a `LicenseSet` always
/// yields the same sequence for the same document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LicenseSet {
    licenses: BTreeSet<String>,
    unparseable: BTreeSet<String>,
    unparseable_count: usize,
    empty_count: usize,
}

impl LicenseSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_license(&mut self, license: String) {
        self.licenses.insert(license);
    }

    /// Records a value that is not a valid SPDX expression. Every occurrence
    /// is counted, the value itself is listed once.
    pub fn add_unparseable(&mut self, value: String) {
        self.unparseable_count += 1;
        self.unparseable.insert(value);
    }

    pub fn add_empty(&mut self) {
        self.empty_count += 1;
    }

    pub fn licenses(&self) -> impl Iterator<Item = &str> {
        self.licenses.iter().map(String::as_str)
    }

    pub fn unparseable(&self) -> impl Iterator<Item = &str> {
        self.unparseable.iter().map(String::as_str)
    }

    pub fn contains(&self, license: &str) -> bool {
        self.licenses.contains(license)
    }

    pub fn len(&self) -> usize {
        self.licenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.licenses.is_empty()
    }

    pub fn unparseable_count(&self) -> usize {
        self.unparseable_count
    }

    pub fn empty_count(&self) -> usize {
        self.empty_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_licenses_are_sorted_and_deduplicated() {
        let mut set = LicenseSet::new();
        set.add_license("MIT".to_string());
        set.add_license("Apache-2.0".to_string());
        set.add_license("MIT".to_string());

        assert_eq!(set.licenses().collect::<Vec<_>>(), ["Apache-2.0", "MIT"]);
        assert_eq!(set.len(), 2);
        assert!(set.contains("MIT"));
    }

    #[test]
    fn test_unparseable_counts_every_occurrence() {
        let mut set = LicenseSet::new();
        set.add_unparseable("Some custom license".to_string());
        set.add_unparseable("Some custom license".to_string());

        assert_eq!(set.unparseable_count(), 2);
        assert_eq!(set.unparseable().count(), 1);
        assert!(set.is_empty());
    }

    #[test]
    fn test_serializes_counts() {
        let mut set = LicenseSet::new();
        set.add_license("MIT".to_string());
        set.add_empty();

        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json["licenses"], serde_json::json!(["MIT"]));
        assert_eq!(json["empty_count"], 1);
        assert_eq!(json["unparseable_count"], 0);
    }
}
