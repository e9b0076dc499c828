use crate::shared::error::SbomError;
use crate::shared::security::MAX_IDENTIFIER_LENGTH;
use crate::shared::Result;
use packageurl::PackageUrl;
use std::fmt;
use std::str::FromStr;

/// A validated package URL (purl).
///
/// Parsing happens once when the identifier is built; the canonical string
/// form is what the lookup cache keys on, so two spellings of the same purl
/// share one lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageIdentifier {
    canonical: String,
    package_type: String,
    namespace: Option<String>,
    name: String,
    version: Option<String>,
    subpath: Option<String>,
}

impl PackageIdentifier {
    pub fn parse(purl: &str) -> Result<Self> {
        let trimmed = purl.trim();
        if trimmed.is_empty() {
            return Err(invalid(purl, "identifier is empty"));
        }
        if trimmed.len() > MAX_IDENTIFIER_LENGTH {
            return Err(invalid(
                purl,
                &format!(
                    "identifier is too long ({} bytes). Maximum allowed: {} bytes",
                    trimmed.len(),
                    MAX_IDENTIFIER_LENGTH
                ),
            ));
        }

        let parsed = PackageUrl::from_str(trimmed).map_err(|e| invalid(purl, &e.to_string()))?;

        Ok(Self {
            canonical: parsed.to_string(),
            package_type: parsed.ty().to_string(),
            namespace: parsed
                .namespace()
                .filter(|n| !n.is_empty())
                .map(str::to_string),
            name: parsed.name().to_string(),
            version: parsed
                .version()
                .filter(|v| !v.is_empty())
                .map(str::to_string),
            subpath: parsed
                .subpath()
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.canonical
    }

    pub fn package_type(&self) -> &str {
        &self.package_type
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn subpath(&self) -> Option<&str> {
        self.subpath.as_deref()
    }
}

impl fmt::Display for PackageIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical)
    }
}

fn invalid(identifier: &str, reason: &str) -> anyhow::Error {
    SbomError::InvalidIdentifier {
        identifier: identifier.to_string(),
        reason: reason.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_purl() {
        let id = PackageIdentifier::parse("pkg:pypi/requests@2.31.0").unwrap();
        assert_eq!(id.package_type(), "pypi");
        assert_eq!(id.namespace(), None);
        assert_eq!(id.name(), "requests");
        assert_eq!(id.version(), Some("2.31.0"));
    }

    #[test]
    fn test_parse_namespaced_purl() {
        let id = PackageIdentifier::parse("pkg:maven/org.apache.commons/commons-lang3@3.12.0")
            .unwrap();
        assert_eq!(id.package_type(), "maven");
        assert_eq!(id.namespace(), Some("org.apache.commons"));
        assert_eq!(id.name(), "commons-lang3");
    }

    #[test]
    fn test_parse_without_version() {
        let id = PackageIdentifier::parse("pkg:cargo/serde").unwrap();
        assert_eq!(id.version(), None);
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        let a = PackageIdentifier::parse("pkg:pypi/foo@1.0").unwrap();
        let b = PackageIdentifier::parse("  pkg:pypi/foo@1.0 ").unwrap();
        assert_eq!(a.as_str(), b.as_str());
    }

    #[test]
    fn test_parse_rejects_missing_scheme() {
        let err = PackageIdentifier::parse("not-a-purl").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SbomError>(),
            Some(SbomError::InvalidIdentifier { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(PackageIdentifier::parse("").is_err());
        assert!(PackageIdentifier::parse("   ").is_err());
    }

    #[test]
    fn test_parse_rejects_overlong_identifier() {
        let long = format!("pkg:pypi/{}@1.0", "a".repeat(MAX_IDENTIFIER_LENGTH));
        let err = PackageIdentifier::parse(&long).unwrap_err();
        assert!(err.to_string().contains("too long"));
    }
}
