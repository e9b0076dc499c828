use crate::compliance::domain::{
    Component, LicenseFact, DISCOVERED_COPYRIGHT_PROPERTY, DISCOVERED_LICENSE_PROPERTY,
};
use serde::Deserialize;

/// Length of text shown in log lines before it is cut off
const EXCERPT_LENGTH: usize = 50;

/// MergePolicy decides how a fetched LicenseFact is folded into a component.
///
/// * `Supplement` never touches declared data. Fetched values fill empty
///   fields; values that disagree with declared ones are stored in the
///   `complassist:discovered-*` properties instead.
/// * `Overwrite` lets fetched values replace declared ones.
///
/// In both modes a fetched license of `NOASSERTION` is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergePolicy {
    #[default]
    Supplement,
    Overwrite,
}

impl MergePolicy {
    /// Merges `fact` into `component` and returns true if the component changed
    pub fn apply(self, component: &mut Component, fact: &LicenseFact) -> bool {
        let before = component.clone();
        match self {
            MergePolicy::Supplement => supplement(component, fact),
            MergePolicy::Overwrite => overwrite(component, fact),
        }
        *component != before
    }
}

fn supplement(component: &mut Component, fact: &LicenseFact) {
    let label = component.label();

    if let Some(fetched) = fact.helpful_license() {
        match component.short_license() {
            None => {
                tracing::debug!(component = %label, license = fetched, "adding license");
                component.set_license_expression(fetched);
                component.remove_property(DISCOVERED_LICENSE_PROPERTY);
            }
            Some(declared) if same_value(&declared, fetched) => {
                component.remove_property(DISCOVERED_LICENSE_PROPERTY);
            }
            Some(declared) => {
                tracing::debug!(
                    component = %label,
                    declared = %declared,
                    discovered = fetched,
                    "keeping declared license, recording discovered one"
                );
                component.set_property(DISCOVERED_LICENSE_PROPERTY, fetched);
            }
        }
    }

    if let Some(fetched) = fact.copyright_text() {
        match component.copyright_text().map(str::to_string) {
            None => {
                tracing::debug!(component = %label, copyright = %excerpt(&fetched), "adding copyright");
                component.copyright = Some(fetched);
                component.remove_property(DISCOVERED_COPYRIGHT_PROPERTY);
            }
            Some(declared) if same_value(&declared, &fetched) => {
                component.remove_property(DISCOVERED_COPYRIGHT_PROPERTY);
            }
            Some(declared) => {
                tracing::debug!(
                    component = %label,
                    declared = %excerpt(&declared),
                    discovered = %excerpt(&fetched),
                    "keeping declared copyright, recording discovered one"
                );
                component.set_property(DISCOVERED_COPYRIGHT_PROPERTY, &fetched);
            }
        }
    }
}

fn overwrite(component: &mut Component, fact: &LicenseFact) {
    let label = component.label();

    if let Some(fetched) = fact.helpful_license() {
        if let Some(declared) = component.short_license() {
            if !same_value(&declared, fetched) {
                tracing::debug!(
                    component = %label,
                    old = %declared,
                    new = fetched,
                    "replacing license"
                );
            }
        }
        component.set_license_expression(fetched);
        component.remove_property(DISCOVERED_LICENSE_PROPERTY);
    }

    if let Some(fetched) = fact.copyright_text() {
        tracing::debug!(component = %label, copyright = %excerpt(&fetched), "setting copyright");
        component.copyright = Some(fetched);
        component.remove_property(DISCOVERED_COPYRIGHT_PROPERTY);
    }
}

fn same_value(a: &str, b: &str) -> bool {
    a.trim() == b.trim()
}

/// Shortens `text` for log output, appending `...` when it was cut
pub fn excerpt(text: &str) -> String {
    let single_line = text.replace('\n', " ");
    if single_line.chars().count() <= EXCERPT_LENGTH {
        single_line
    } else {
        let cut: String = single_line.chars().take(EXCERPT_LENGTH).collect();
        format!("{}...", cut)
    }
}

impl std::str::FromStr for MergePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "supplement" => Ok(MergePolicy::Supplement),
            "overwrite" => Ok(MergePolicy::Overwrite),
            _ => Err(format!(
                "Invalid merge policy: {}. Please specify 'supplement' or 'overwrite'",
                s
            )),
        }
    }
}

impl std::fmt::Display for MergePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MergePolicy::Supplement => write!(f, "supplement"),
            MergePolicy::Overwrite => write!(f, "overwrite"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    fn component(value: serde_json::Value) -> Component {
        serde_json::from_value(value).unwrap()
    }

    fn fact(license: Option<&str>, copyrights: &[&str]) -> LicenseFact {
        LicenseFact::new(
            license.map(str::to_string),
            copyrights.iter().map(|c| c.to_string()).collect(),
            None,
        )
    }

    #[test]
    fn test_supplement_fills_missing_license_and_copyright() {
        let mut c = component(json!({"name": "foo", "purl": "pkg:pypi/foo@1.0"}));
        let changed = MergePolicy::Supplement.apply(
            &mut c,
            &fact(Some("MIT"), &["Copyright A", "Copyright B"]),
        );

        assert!(changed);
        assert_eq!(c.short_license().as_deref(), Some("MIT"));
        assert_eq!(c.copyright.as_deref(), Some("Copyright A\nCopyright B"));
        assert!(c.properties.is_none());
    }

    #[test]
    fn test_supplement_keeps_declared_and_records_discovered() {
        let mut c = component(json!({
            "name": "foo",
            "licenses": [{"license": {"id": "Apache-2.0"}}],
            "copyright": "Copyright Declared"
        }));
        let changed =
            MergePolicy::Supplement.apply(&mut c, &fact(Some("MIT"), &["Copyright Fetched"]));

        assert!(changed);
        assert_eq!(c.short_license().as_deref(), Some("Apache-2.0"));
        assert_eq!(c.copyright.as_deref(), Some("Copyright Declared"));
        assert_eq!(c.property(DISCOVERED_LICENSE_PROPERTY), Some("MIT"));
        assert_eq!(
            c.property(DISCOVERED_COPYRIGHT_PROPERTY),
            Some("Copyright Fetched")
        );
    }

    #[test]
    fn test_supplement_reenrichment_does_not_duplicate_properties() {
        let mut c = component(json!({"licenses": [{"license": {"id": "Apache-2.0"}}]}));
        MergePolicy::Supplement.apply(&mut c, &fact(Some("MIT"), &[]));
        let changed = MergePolicy::Supplement.apply(&mut c, &fact(Some("MIT"), &[]));

        assert!(!changed);
        assert_eq!(c.properties.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn test_supplement_same_license_is_unchanged() {
        let mut c = component(json!({"licenses": [{"license": {"id": "MIT"}}]}));
        let changed = MergePolicy::Supplement.apply(&mut c, &fact(Some("MIT"), &[]));
        assert!(!changed);
    }

    #[test]
    fn test_noassertion_is_ignored() {
        let mut c = component(json!({"name": "foo"}));
        let changed = MergePolicy::Supplement.apply(&mut c, &fact(Some("NOASSERTION"), &[]));
        assert!(!changed);
        assert!(c.licenses.is_none());

        let changed = MergePolicy::Overwrite.apply(&mut c, &fact(Some("NOASSERTION"), &[]));
        assert!(!changed);
    }

    #[test]
    fn test_overwrite_replaces_declared_values() {
        let mut c = component(json!({
            "licenses": [{"license": {"id": "Apache-2.0"}}],
            "copyright": "Copyright Declared",
            "properties": [{"name": "complassist:discovered-license", "value": "BSD-3-Clause"}]
        }));
        let changed =
            MergePolicy::Overwrite.apply(&mut c, &fact(Some("MIT"), &["Copyright Fetched"]));

        assert!(changed);
        assert_eq!(c.short_license().as_deref(), Some("MIT"));
        assert_eq!(c.copyright.as_deref(), Some("Copyright Fetched"));
        assert!(c.properties.is_none());
    }

    #[test]
    fn test_overwrite_keeps_copyright_when_none_fetched() {
        let mut c = component(json!({"copyright": "Copyright Declared"}));
        MergePolicy::Overwrite.apply(&mut c, &fact(Some("MIT"), &[]));
        assert_eq!(c.copyright.as_deref(), Some("Copyright Declared"));
    }

    #[test]
    fn test_excerpt() {
        assert_eq!(excerpt("short"), "short");
        let long = "x".repeat(60);
        assert_eq!(excerpt(&long), format!("{}...", "x".repeat(50)));
        assert_eq!(excerpt("a\nb"), "a b");
    }

    #[test]
    fn test_merge_policy_from_str() {
        assert_eq!(
            MergePolicy::from_str("Overwrite").unwrap(),
            MergePolicy::Overwrite
        );
        assert!(MergePolicy::from_str("replace").is_err());
        assert_eq!(MergePolicy::default().to_string(), "supplement");
    }
}
