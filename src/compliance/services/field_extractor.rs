use crate::compliance::domain::{
    Component, Row, SbomDocument, DISCOVERED_COPYRIGHT_PROPERTY, DISCOVERED_LICENSE_PROPERTY,
};
use crate::shared::error::SbomError;
use crate::shared::Result;
use serde_json::Value;

/// Field names accepted by `FieldExtractor::extract`, in documentation order
pub const AVAILABLE_FIELDS: &[&str] = &[
    "purl",
    "name",
    "version",
    "group",
    "type",
    "bom-ref",
    "description",
    "licenses",
    "licenses-short",
    "copyright",
    "discovered-license",
    "discovered-copyright",
];

/// Fields used when the caller does not ask for specific ones
pub const DEFAULT_FIELDS: &str = "purl,licenses-short";

/// FieldExtractor projects every component onto a list of named fields
pub struct FieldExtractor;

impl FieldExtractor {
    /// Splits a comma-separated field list, dropping blanks
    pub fn parse_field_list(list: &str) -> Vec<String> {
        list.split(',')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Fails on the first unknown field name
    pub fn validate_fields(fields: &[String]) -> Result<()> {
        if let Some(unknown) = fields
            .iter()
            .find(|f| !AVAILABLE_FIELDS.contains(&f.as_str()))
        {
            return Err(SbomError::UnknownField {
                field: unknown.clone(),
                available: AVAILABLE_FIELDS.join(", "),
            }
            .into());
        }
        Ok(())
    }

    /// One row per component in document order, one entry per field in
    /// request order. Missing values are `null`.
    pub fn extract(document: &SbomDocument, fields: &[String]) -> Result<Vec<Row>> {
        Self::validate_fields(fields)?;

        Ok(document
            .components()
            .iter()
            .map(|component| {
                let mut row = Row::new();
                for field in fields {
                    row.push(field, Self::field_value(component, field));
                }
                row
            })
            .collect())
    }

    fn field_value(component: &Component, field: &str) -> Value {
        let text = |value: Option<&str>| value.map_or(Value::Null, |v| Value::String(v.to_string()));

        match field {
            "purl" => text(component.purl.as_deref()),
            "name" => text(component.name.as_deref()),
            "version" => text(component.version.as_deref()),
            "group" => text(component.group.as_deref()),
            "type" => text(component.component_type.as_deref()),
            "bom-ref" => text(component.bom_ref.as_deref()),
            "description" => text(component.description.as_deref()),
            "licenses" => component
                .licenses
                .as_ref()
                .and_then(|l| serde_json::to_value(l).ok())
                .unwrap_or(Value::Null),
            "licenses-short" => text(component.short_license().as_deref()),
            "copyright" => text(component.copyright_text()),
            "discovered-license" => text(component.property(DISCOVERED_LICENSE_PROPERTY)),
            "discovered-copyright" => text(component.property(DISCOVERED_COPYRIGHT_PROPERTY)),
            _ => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn two_component_document() -> SbomDocument {
        serde_json::from_value(json!({
            "bomFormat": "CycloneDX",
            "specVersion": "1.5",
            "components": [
                {
                    "name": "foo",
                    "version": "1.0",
                    "purl": "pkg:pypi/foo@1.0",
                    "licenses": [{"license": {"id": "MIT"}}, {"license": {"id": "Apache-2.0"}}]
                },
                {"name": "bar", "copyright": "Copyright 2024 Bar"}
            ]
        }))
        .unwrap()
    }

    fn fields(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_extract_rows_in_order() {
        let rows =
            FieldExtractor::extract(&two_component_document(), &fields(&["purl", "name"])).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 2);
        assert_eq!(rows[0].fields()[0].0, "purl");
        assert_eq!(rows[0].fields()[1].0, "name");
        assert_eq!(rows[0].get("purl"), Some(&json!("pkg:pypi/foo@1.0")));
        assert_eq!(rows[1].get("purl"), Some(&Value::Null));
        assert_eq!(rows[1].get("name"), Some(&json!("bar")));
    }

    #[test]
    fn test_extract_unknown_field_fails() {
        let err = FieldExtractor::extract(&two_component_document(), &fields(&["purl", "bogus"]))
            .unwrap_err();
        match err.downcast_ref::<SbomError>() {
            Some(SbomError::UnknownField { field, .. }) => assert_eq!(field, "bogus"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_extract_unknown_field_fails_on_empty_document() {
        let result = FieldExtractor::extract(&SbomDocument::new("1.5"), &fields(&["bogus"]));
        assert!(result.is_err());
    }

    #[test]
    fn test_extract_derived_fields() {
        let rows = FieldExtractor::extract(
            &two_component_document(),
            &fields(&["licenses-short", "licenses", "copyright"]),
        )
        .unwrap();

        assert_eq!(
            rows[0].get("licenses-short"),
            Some(&json!("(MIT) AND (Apache-2.0)"))
        );
        assert_eq!(
            rows[0].get("licenses"),
            Some(&json!([{"license": {"id": "MIT"}}, {"license": {"id": "Apache-2.0"}}]))
        );
        assert_eq!(rows[1].get("copyright"), Some(&json!("Copyright 2024 Bar")));
        assert_eq!(rows[1].get("licenses"), Some(&Value::Null));
    }

    #[test]
    fn test_parse_field_list() {
        assert_eq!(
            FieldExtractor::parse_field_list(" purl, name ,,licenses-short"),
            ["purl", "name", "licenses-short"]
        );
        assert_eq!(
            FieldExtractor::parse_field_list(DEFAULT_FIELDS),
            ["purl", "licenses-short"]
        );
    }

    #[test]
    fn test_every_available_field_is_accepted() {
        let all = fields(AVAILABLE_FIELDS);
        assert!(FieldExtractor::validate_fields(&all).is_ok());
    }
}
