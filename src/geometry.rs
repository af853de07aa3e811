//! Geometry document normalization
//!
//! Bedrock geometry files come in two shapes: the current schema with a
//! top-level `minecraft:geometry` list, and a legacy schema keyed by
//! `geometry.<name>` entries at the document root. Everything downstream
//! of loading works on the current shape only, so legacy documents are
//! reshaped here. Bones are carried verbatim; only the description block
//! is synthesized.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Schema version stamped on every emitted geometry document.
pub const FORMAT_VERSION: &str = "1.12.0";

/// Top-level key holding the geometry entry list in the current schema.
pub const GEOMETRY_KEY: &str = "minecraft:geometry";

/// Prefix marking a legacy top-level geometry key.
const LEGACY_PREFIX: &str = "geometry.";

/// A geometry document in the current schema.
///
/// Entries stay opaque [`Value`]s: merging only touches
/// `description.identifier` and must pass every other field through
/// untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeometryDocument {
    pub format_version: String,

    #[serde(rename = "minecraft:geometry", default)]
    pub entries: Vec<Value>,
}

impl GeometryDocument {
    pub fn new() -> Self {
        Self {
            format_version: FORMAT_VERSION.to_string(),
            entries: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for GeometryDocument {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalize a parsed JSON document into the current geometry schema.
///
/// Documents already carrying a `minecraft:geometry` list pass through
/// with their entries unchanged (idempotent). Legacy documents have each
/// `geometry.<name>` key converted to one entry whose
/// `description.identifier` is the key itself. Returns `None` when the
/// document is neither shape, which signals "not a geometry document".
pub fn normalize(value: &Value) -> Option<GeometryDocument> {
    let obj = value.as_object()?;

    if let Some(entries) = obj.get(GEOMETRY_KEY).and_then(Value::as_array) {
        let format_version = obj
            .get("format_version")
            .and_then(Value::as_str)
            .unwrap_or(FORMAT_VERSION)
            .to_string();
        return Some(GeometryDocument {
            format_version,
            entries: entries.clone(),
        });
    }

    let entries: Vec<Value> = obj
        .iter()
        .filter(|(key, _)| key.starts_with(LEGACY_PREFIX))
        .map(|(key, legacy)| convert_legacy(key, legacy))
        .collect();

    if entries.is_empty() {
        return None;
    }

    Some(GeometryDocument {
        format_version: FORMAT_VERSION.to_string(),
        entries,
    })
}

fn convert_legacy(identifier: &str, legacy: &Value) -> Value {
    let field = |name: &str, default: Value| legacy.get(name).cloned().unwrap_or(default);

    json!({
        "description": {
            "identifier": identifier,
            "texture_width": field("texturewidth", json!(16)),
            "texture_height": field("textureheight", json!(16)),
            "visible_bounds_width": field("visible_bounds_width", json!(2)),
            "visible_bounds_height": field("visible_bounds_height", json!(2)),
            "visible_bounds_offset": field("visible_bounds_offset", json!([0, 1, 0])),
        },
        "bones": field("bones", json!([])),
    })
}

/// Identity key of a geometry entry, if it has one.
pub fn entry_identifier(entry: &Value) -> Option<&str> {
    entry.get("description")?.get("identifier")?.as_str()
}

/// Overwrite a geometry entry's identity key. Entries without a
/// `description` object are left unchanged.
pub fn set_entry_identifier(entry: &mut Value, identifier: &str) {
    if let Some(description) = entry.get_mut("description").and_then(Value::as_object_mut) {
        description.insert(
            "identifier".to_string(),
            Value::String(identifier.to_string()),
        );
    }
}
