use crate::compliance::domain::PackageIdentifier;
use crate::shared::error::SbomError;
use crate::shared::Result;
use std::fmt;

/// Placeholder ClearlyDefined uses for an empty coordinate segment
const EMPTY_SEGMENT: &str = "-";

/// purl types that ClearlyDefined spells differently
const TYPE_FIXES: &[(&str, &str)] = &[("cargo", "crate"), ("github", "git")];

/// Default provider for each ClearlyDefined type. Types not listed use the
/// type name as provider.
const TYPE_PROVIDERS: &[(&str, &str)] = &[
    ("crate", "cratesio"),
    ("git", "github"),
    ("maven", "mavencentral"),
    ("npm", "npmjs"),
    ("pypi", "pypi"),
    ("gem", "rubygems"),
    ("nuget", "nuget"),
    ("golang", "golang"),
    ("composer", "packagist"),
    ("pod", "cocoapods"),
    ("deb", "debian"),
];

/// ClearlyDefined coordinates: `type/provider/namespace/name/revision`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coordinates {
    pub component_type: String,
    pub provider: String,
    pub namespace: Option<String>,
    pub name: String,
    pub revision: Option<String>,
}

impl Coordinates {
    /// Derives coordinates from a package URL
    pub fn from_identifier(identifier: &PackageIdentifier) -> Result<Self> {
        let component_type = lookup(TYPE_FIXES, identifier.package_type())
            .unwrap_or(identifier.package_type())
            .to_string();
        let provider = lookup(TYPE_PROVIDERS, &component_type)
            .unwrap_or(&component_type)
            .to_string();

        let coordinates = Self {
            component_type,
            provider,
            namespace: identifier.namespace().map(str::to_string),
            name: identifier.name().to_string(),
            revision: identifier.version().map(str::to_string),
        };
        coordinates.validate(identifier.as_str())?;

        tracing::debug!(purl = %identifier, coordinates = %coordinates, "converted purl to coordinates");
        Ok(coordinates)
    }

    /// Parses a coordinates string as given on the command line
    pub fn parse(input: &str) -> Result<Self> {
        let segments: Vec<&str> = input.trim().split('/').collect();
        if segments.len() != 5 {
            return Err(SbomError::InvalidIdentifier {
                identifier: input.to_string(),
                reason: format!(
                    "expected 5 segments (type/provider/namespace/name/revision), found {}",
                    segments.len()
                ),
            }
            .into());
        }

        let optional = |s: &str| {
            if s == EMPTY_SEGMENT || s.is_empty() {
                None
            } else {
                Some(s.to_string())
            }
        };

        let coordinates = Self {
            component_type: segments[0].to_string(),
            provider: segments[1].to_string(),
            namespace: optional(segments[2]),
            name: segments[3].to_string(),
            revision: optional(segments[4]),
        };
        coordinates.validate(input)?;
        Ok(coordinates)
    }

    /// URL path form: each segment validated and percent-encoded
    pub fn to_path(&self) -> String {
        [
            Some(self.component_type.as_str()),
            Some(self.provider.as_str()),
            self.namespace.as_deref(),
            Some(self.name.as_str()),
            self.revision.as_deref(),
        ]
        .iter()
        .map(|segment| match segment {
            Some(value) if !value.is_empty() => urlencoding::encode(value).into_owned(),
            _ => EMPTY_SEGMENT.to_string(),
        })
        .collect::<Vec<_>>()
        .join("/")
    }

    fn validate(&self, identifier: &str) -> Result<()> {
        let required = [
            ("type", self.component_type.as_str()),
            ("provider", self.provider.as_str()),
            ("name", self.name.as_str()),
        ];
        for (label, value) in required {
            if value.is_empty() || value == EMPTY_SEGMENT {
                return Err(invalid(identifier, &format!("{} is empty", label)));
            }
        }

        validate_segment(identifier, "type", &self.component_type, false)?;
        validate_segment(identifier, "provider", &self.provider, false)?;
        if let Some(namespace) = &self.namespace {
            // Go module namespaces contain slashes; they are encoded instead
            validate_segment(identifier, "namespace", namespace, true)?;
        }
        validate_segment(identifier, "name", &self.name, false)?;
        if let Some(revision) = &self.revision {
            validate_segment(identifier, "revision", revision, false)?;
        }
        Ok(())
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}/{}",
            self.component_type,
            self.provider,
            self.namespace.as_deref().unwrap_or(EMPTY_SEGMENT),
            self.name,
            self.revision.as_deref().unwrap_or(EMPTY_SEGMENT)
        )
    }
}

/// Rejects values that could change the meaning of the request URL
fn validate_segment(identifier: &str, label: &str, value: &str, allow_slash: bool) -> Result<()> {
    if (!allow_slash && value.contains('/')) || value.contains('\\') {
        return Err(invalid(
            identifier,
            &format!("{} contains path separators which are not allowed", label),
        ));
    }
    if value.contains("..") {
        return Err(invalid(
            identifier,
            &format!("{} contains '..' which is not allowed", label),
        ));
    }
    if value.contains('#') || value.contains('?') {
        return Err(invalid(
            identifier,
            &format!("{} contains URL-unsafe characters", label),
        ));
    }
    Ok(())
}

fn lookup<'a>(table: &'a [(&'a str, &'a str)], key: &str) -> Option<&'a str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
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

    fn coordinates_for(purl: &str) -> String {
        let identifier = PackageIdentifier::parse(purl).unwrap();
        Coordinates::from_identifier(&identifier).unwrap().to_string()
    }

    #[test]
    fn test_pypi_purl() {
        assert_eq!(
            coordinates_for("pkg:pypi/requests@2.31.0"),
            "pypi/pypi/-/requests/2.31.0"
        );
    }

    #[test]
    fn test_cargo_purl_uses_crate_type() {
        assert_eq!(
            coordinates_for("pkg:cargo/serde@1.0.197"),
            "crate/cratesio/-/serde/1.0.197"
        );
    }

    #[test]
    fn test_github_purl_uses_git_type() {
        assert_eq!(
            coordinates_for("pkg:github/package-url/purl-spec@244fd47e07d1004"),
            "git/github/package-url/purl-spec/244fd47e07d1004"
        );
    }

    #[test]
    fn test_maven_purl() {
        assert_eq!(
            coordinates_for("pkg:maven/org.apache.commons/commons-lang3@3.12.0"),
            "maven/mavencentral/org.apache.commons/commons-lang3/3.12.0"
        );
    }

    #[test]
    fn test_npm_purl_without_version() {
        assert_eq!(coordinates_for("pkg:npm/lodash"), "npm/npmjs/-/lodash/-");
    }

    #[test]
    fn test_unknown_type_uses_type_as_provider() {
        assert_eq!(
            coordinates_for("pkg:conda/numpy@1.26.0"),
            "conda/conda/-/numpy/1.26.0"
        );
    }

    #[test]
    fn test_to_path_encodes_segments() {
        let coordinates = Coordinates {
            component_type: "npm".to_string(),
            provider: "npmjs".to_string(),
            namespace: Some("@babel".to_string()),
            name: "core".to_string(),
            revision: Some("7.0.0".to_string()),
        };
        assert_eq!(coordinates.to_path(), "npm/npmjs/%40babel/core/7.0.0");
        assert_eq!(coordinates.to_string(), "npm/npmjs/@babel/core/7.0.0");
    }

    #[test]
    fn test_go_namespace_slash_is_encoded() {
        let coordinates =
            Coordinates::parse("go/golang/github.com%2Fgorilla/mux/v1.8.0").unwrap();
        assert_eq!(coordinates.name, "mux");

        let coordinates = Coordinates {
            component_type: "go".to_string(),
            provider: "golang".to_string(),
            namespace: Some("github.com/gorilla".to_string()),
            name: "mux".to_string(),
            revision: Some("v1.8.0".to_string()),
        };
        assert!(coordinates.validate("test").is_ok());
        assert_eq!(
            coordinates.to_path(),
            "go/golang/github.com%2Fgorilla/mux/v1.8.0"
        );
    }

    #[test]
    fn test_parse_coordinates() {
        let coordinates = Coordinates::parse("pypi/pypi/-/requests/2.31.0").unwrap();
        assert_eq!(coordinates.component_type, "pypi");
        assert_eq!(coordinates.namespace, None);
        assert_eq!(coordinates.revision.as_deref(), Some("2.31.0"));
    }

    #[test]
    fn test_parse_rejects_wrong_segment_count() {
        let err = Coordinates::parse("pypi/pypi/requests").unwrap_err();
        assert!(err.to_string().contains("expected 5 segments"));
    }

    #[test]
    fn test_parse_rejects_traversal_and_query() {
        assert!(Coordinates::parse("pypi/pypi/-/../1.0").is_err());
        assert!(Coordinates::parse("pypi/pypi/-/foo/1.0?x=1").is_err());
        assert!(Coordinates::parse("pypi/pypi/-/foo#frag/1.0").is_err());
    }

    #[test]
    fn test_parse_rejects_empty_name() {
        assert!(Coordinates::parse("pypi/pypi/-/-/1.0").is_err());
    }
}
