use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

/// The only document format this tool understands
pub const SUPPORTED_BOM_FORMAT: &str = "CycloneDX";

/// CycloneDX specification versions with a JSON schema we can read
pub const SUPPORTED_SPEC_VERSIONS: &[&str] = &["1.2", "1.3", "1.4", "1.5", "1.6"];

/// Component property holding a license found by the compliance data service
/// that differs from the declared one
pub const DISCOVERED_LICENSE_PROPERTY: &str = "complassist:discovered-license";

/// Component property holding copyright statements found by the compliance
/// data service that differ from the declared ones
pub const DISCOVERED_COPYRIGHT_PROPERTY: &str = "complassist:discovered-copyright";

/// A CycloneDX JSON document.
///
/// Only the fields this tool reads or writes are typed. Every other key is kept
/// verbatim in `extra`. Documents read with `from_json_slice` also remember
/// their source JSON, which `to_pretty_json` uses to restore key order and
/// explicit nulls, so a load followed by a save does not lose data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SbomDocument {
    #[serde(rename = "bomFormat")]
    pub bom_format: String,
    #[serde(rename = "specVersion")]
    pub spec_version: String,
    #[serde(
        rename = "serialNumber",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub serial_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    components: Option<Vec<Component>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    #[serde(skip)]
    layout: SourceLayout,
}

/// The JSON a document was read from. Never part of equality.
#[derive(Debug, Clone, Default)]
struct SourceLayout(Option<Arc<Value>>);

impl PartialEq for SourceLayout {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl SbomDocument {
    /// Creates an empty document of the given spec version
    pub fn new(spec_version: &str) -> Self {
        Self {
            bom_format: SUPPORTED_BOM_FORMAT.to_string(),
            spec_version: spec_version.to_string(),
            serial_number: None,
            version: None,
            metadata: None,
            components: None,
            extra: Map::new(),
            layout: SourceLayout::default(),
        }
    }

    /// Parses a JSON document and keeps its layout for `to_pretty_json`
    pub fn from_json_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        let source: Value = serde_json::from_slice(bytes)?;
        let mut document = Self::deserialize(&source)?;
        document.layout = SourceLayout(Some(Arc::new(source)));
        Ok(document)
    }

    /// Checks the document against the formats and versions we support
    pub fn check_supported(&self) -> std::result::Result<(), String> {
        if self.bom_format != SUPPORTED_BOM_FORMAT {
            return Err(format!(
                "bomFormat is '{}', expected '{}'",
                self.bom_format, SUPPORTED_BOM_FORMAT
            ));
        }
        if !SUPPORTED_SPEC_VERSIONS.contains(&self.spec_version.as_str()) {
            return Err(format!(
                "specVersion '{}' is not supported (supported: {})",
                self.spec_version,
                SUPPORTED_SPEC_VERSIONS.join(", ")
            ));
        }
        Ok(())
    }

    /// Top-level components in document order. Nested components are part of
    /// their parent's extra fields and are not visited.
    pub fn components(&self) -> &[Component] {
        self.components.as_deref().unwrap_or(&[])
    }

    pub fn components_mut(&mut self) -> &mut [Component] {
        self.components.as_deref_mut().unwrap_or(&mut [])
    }

    pub fn push_component(&mut self, component: Component) {
        self.components.get_or_insert_with(Vec::new).push(component);
    }

    /// Returns true if the spec version uses the object form of `metadata.tools`
    pub fn uses_tool_components(&self) -> bool {
        matches!(self.spec_version.as_str(), "1.5" | "1.6")
    }

    /// Serializes to two-space indented JSON with a trailing newline.
    ///
    /// Keys present in the source document keep their position and nulls the
    /// typed model dropped are written back. New keys follow the existing ones.
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        let value = serde_json::to_value(self)?;
        let value = match &self.layout.0 {
            Some(source) => align(value, source),
            None => value,
        };
        let mut json = serde_json::to_string_pretty(&value)?;
        json.push('\n');
        Ok(json)
    }
}

/// Reorders `value` after `source`. Arrays are matched by position since
/// nothing in this tool reorders them.
fn align(value: Value, source: &Value) -> Value {
    match (value, source) {
        (Value::Object(mut fresh), Value::Object(original)) => {
            let mut aligned = Map::with_capacity(fresh.len());
            for (key, before) in original {
                if let Some(after) = fresh.get_mut(key) {
                    aligned.insert(key.clone(), align(after.take(), before));
                } else if before.is_null() {
                    aligned.insert(key.clone(), Value::Null);
                }
            }
            for (key, after) in fresh {
                if !original.contains_key(&key) {
                    aligned.insert(key, after);
                }
            }
            Value::Object(aligned)
        }
        (Value::Array(items), Value::Array(original)) => Value::Array(
            items
                .into_iter()
                .enumerate()
                .map(|(index, item)| match original.get(index) {
                    Some(before) => align(item, before),
                    None => item,
                })
                .collect(),
        ),
        (value, _) => value,
    }
}

/// One software package listed in the SBOM
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Component {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub component_type: Option<String>,
    #[serde(rename = "bom-ref", default, skip_serializing_if = "Option::is_none")]
    pub bom_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub licenses: Option<Vec<LicenseChoice>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purl: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<Property>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A license value as written in the SBOM, before any parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LicenseValue {
    /// An SPDX identifier or expression (`license.id` or `expression`)
    Spdx(String),
    /// A free-text license name (`license.name`)
    FreeText(String),
}

impl LicenseValue {
    pub fn as_str(&self) -> &str {
        match self {
            LicenseValue::Spdx(value) | LicenseValue::FreeText(value) => value,
        }
    }
}

impl Component {
    /// A label for messages: the purl if present, then name@version, then bom-ref
    pub fn label(&self) -> String {
        if let Some(purl) = self.purl.as_deref().filter(|p| !p.is_empty()) {
            return purl.to_string();
        }
        match (self.name.as_deref(), self.version.as_deref()) {
            (Some(name), Some(version)) => format!("{}@{}", name, version),
            (Some(name), None) => name.to_string(),
            _ => self
                .bom_ref
                .clone()
                .unwrap_or_else(|| "<unnamed component>".to_string()),
        }
    }

    /// Declared license values in document order, skipping empty entries
    pub fn license_values(&self) -> Vec<LicenseValue> {
        self.licenses
            .iter()
            .flatten()
            .filter_map(LicenseChoice::value)
            .collect()
    }

    /// Collapses the declared licenses into a single string.
    ///
    /// One entry is returned as-is. Several SPDX entries are combined as
    /// `(A) AND (B)`; as soon as one entry is free text, the values are joined
    /// with ` / ` since no valid expression can be formed.
    pub fn short_license(&self) -> Option<String> {
        let values = self.license_values();
        match values.len() {
            0 => None,
            1 => Some(values[0].as_str().to_string()),
            _ => {
                if values.iter().all(|v| matches!(v, LicenseValue::Spdx(_))) {
                    Some(
                        values
                            .iter()
                            .map(|v| format!("({})", v.as_str()))
                            .collect::<Vec<_>>()
                            .join(" AND "),
                    )
                } else {
                    Some(
                        values
                            .iter()
                            .map(LicenseValue::as_str)
                            .collect::<Vec<_>>()
                            .join(" / "),
                    )
                }
            }
        }
    }

    /// Replaces all declared licenses with a single SPDX expression
    pub fn set_license_expression(&mut self, expression: &str) {
        self.licenses = Some(vec![LicenseChoice::from_expression(expression)]);
    }

    /// Copyright text, treating an empty string as absent
    pub fn copyright_text(&self) -> Option<&str> {
        self.copyright.as_deref().filter(|c| !c.trim().is_empty())
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .flatten()
            .find(|p| p.name == name)
            .and_then(|p| p.value.as_deref())
    }

    /// Sets a property, replacing any earlier entries with the same name
    pub fn set_property(&mut self, name: &str, value: &str) {
        let properties = self.properties.get_or_insert_with(Vec::new);
        properties.retain(|p| p.name != name);
        properties.push(Property::new(name, value));
    }

    /// Removes a property; drops the `properties` array once it is empty.
    /// Returns true if something was removed.
    pub fn remove_property(&mut self, name: &str) -> bool {
        let Some(properties) = self.properties.as_mut() else {
            return false;
        };
        let before = properties.len();
        properties.retain(|p| p.name != name);
        let removed = properties.len() != before;
        if properties.is_empty() {
            self.properties = None;
        }
        removed
    }
}

/// CycloneDX license choice: either `{"license": {...}}` or `{"expression": "..."}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LicenseChoice {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<LicenseEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LicenseChoice {
    pub fn from_expression(expression: &str) -> Self {
        Self {
            expression: Some(expression.to_string()),
            ..Default::default()
        }
    }

    /// The license value carried by this entry; an SPDX id wins over a name
    pub fn value(&self) -> Option<LicenseValue> {
        if let Some(expression) = non_empty(self.expression.as_deref()) {
            return Some(LicenseValue::Spdx(expression.to_string()));
        }
        let license = self.license.as_ref()?;
        if let Some(id) = non_empty(license.id.as_deref()) {
            return Some(LicenseValue::Spdx(id.to_string()));
        }
        non_empty(license.name.as_deref()).map(|name| LicenseValue::FreeText(name.to_string()))
    }
}

/// The `license` object of a license choice
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LicenseEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// CycloneDX name/value property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Property {
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: Some(value.to_string()),
            extra: Map::new(),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
