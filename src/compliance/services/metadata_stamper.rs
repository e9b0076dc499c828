use crate::compliance::domain::SbomDocument;
use chrono::{DateTime, Utc};
use serde_json::{json, Map, Value};

const TOOL_NAME: &str = "compliance-assistant";
const TOOL_GROUP: &str = "OpenRailAssociation";
const TOOL_PUBLISHER: &str = "OpenRail Association";
const AUTHOR_NAME: &str = "compliance-assistant by OpenRail Association";

/// MetadataStamper records an enrichment run in the document metadata.
///
/// The document version is bumped, the timestamp refreshed and this tool is
/// added to `metadata.tools` and `metadata.authors`. Existing entries are kept.
pub struct MetadataStamper;

impl MetadataStamper {
    /// Stamps the document with the compile-time tool version and the current time
    pub fn stamp_default(document: &mut SbomDocument) {
        Self::stamp(document, env!("CARGO_PKG_VERSION"), Utc::now());
    }

    pub fn stamp(document: &mut SbomDocument, tool_version: &str, now: DateTime<Utc>) {
        document.version = Some(document.version.unwrap_or(1).saturating_add(1));

        let object_form = document.uses_tool_components();
        let metadata = document
            .metadata
            .get_or_insert_with(|| Value::Object(Map::new()));
        let Some(metadata) = metadata.as_object_mut() else {
            tracing::warn!("SBOM metadata is not a JSON object, leaving it untouched");
            return;
        };

        metadata.insert(
            "timestamp".to_string(),
            Value::String(now.format("%Y-%m-%dT%H:%M:%SZ").to_string()),
        );
        add_tool(metadata, tool_version, object_form);
        add_author(metadata);
    }
}

fn add_tool(metadata: &mut Map<String, Value>, tool_version: &str, object_form: bool) {
    let purl = format!("pkg:cargo/{}@{}", TOOL_NAME, tool_version);
    let tools = metadata.entry("tools").or_insert_with(|| {
        if object_form {
            json!({ "components": [] })
        } else {
            json!([])
        }
    });

    match tools {
        // Pre-1.5 documents list tools directly
        Value::Array(list) => list.push(json!({
            "vendor": TOOL_PUBLISHER,
            "name": TOOL_NAME,
            "version": tool_version,
        })),
        Value::Object(map) => {
            let component = json!({
                "type": "application",
                "group": TOOL_GROUP,
                "name": TOOL_NAME,
                "version": tool_version,
                "author": TOOL_PUBLISHER,
                "publisher": TOOL_PUBLISHER,
                "purl": purl,
                "bom-ref": purl,
            });
            match map.get_mut("components") {
                Some(Value::Array(components)) => components.push(component),
                _ => {
                    map.insert("components".to_string(), Value::Array(vec![component]));
                }
            }
        }
        _ => tracing::warn!("metadata.tools has an unexpected shape, not adding tool entry"),
    }
}

fn add_author(metadata: &mut Map<String, Value>) {
    let author = json!({ "name": AUTHOR_NAME });
    match metadata.get_mut("authors") {
        Some(Value::Array(authors)) => authors.push(author),
        _ => {
            metadata.insert("authors".to_string(), Value::Array(vec![author]));
        }
    }
}
