//! Skin pack folder loading
//!
//! A pack is one source folder: a required `skins.json` manifest,
//! optional geometry model files, texture images, and any other JSON
//! files that ride along untouched. Classification looks only at the
//! folder's immediate files; subdirectories are ignored.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use walkdir::WalkDir;

use crate::jsonc::{self, JsonError};

/// Fixed manifest file name every pack must contain.
pub const MANIFEST_NAME: &str = "skins.json";

/// Image extensions classified as textures (lowercase).
const TEXTURE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// The pack manifest. Skin entries stay opaque [`Value`]s because skins
/// carry arbitrary extra fields that must round-trip through a merge.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SkinManifest {
    pub serialize_name: String,
    pub localization_name: String,
    pub skins: Vec<Value>,
}

/// A geometry candidate file and its parsed contents.
#[derive(Debug, Clone)]
pub struct GeometryFile {
    pub file_name: String,
    pub value: Value,
}

/// Derived statistics for one loaded pack.
#[derive(Debug, Clone, Default)]
pub struct PackSummary {
    pub skin_count: usize,
    pub geometry_count: usize,
    pub texture_count: usize,
    pub other_count: usize,
    /// Geometry identifiers referenced by the pack's skins.
    pub geometries: BTreeSet<String>,
    /// Texture identifiers referenced by the pack's skins.
    pub textures: BTreeSet<String>,
}

/// One source folder's full skin-pack contents. Immutable after load.
#[derive(Debug, Clone)]
pub struct Pack {
    /// Source folder name; the pack's identity.
    pub name: String,
    pub manifest: SkinManifest,
    pub geometry_files: Vec<GeometryFile>,
    pub textures: Vec<PathBuf>,
    pub others: Vec<PathBuf>,
    pub summary: PackSummary,
}

/// Errors when loading a skin pack folder
#[derive(Debug, thiserror::Error)]
pub enum PackError {
    #[error("No skins.json found in {}", .0.display())]
    MissingManifest(PathBuf),

    #[error("Failed to parse manifest: {0}")]
    Manifest(#[from] JsonError),

    #[error("Manifest has unexpected shape: {0}")]
    ManifestShape(#[source] serde_json::Error),

    #[error("Failed to scan folder: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Load one skin pack folder.
///
/// The manifest is required; geometry candidates (JSON files whose name
/// contains `geometry` or `model`, case-insensitive) are parsed with the
/// same tolerant loader. A candidate that fails to parse is logged and
/// skipped as geometry but still carried as an other file, so broken
/// models travel into the output untouched instead of vanishing.
pub fn load_folder(path: &Path) -> Result<Pack, PackError> {
    let manifest_path = path.join(MANIFEST_NAME);
    if !manifest_path.is_file() {
        return Err(PackError::MissingManifest(path.to_path_buf()));
    }

    let raw = jsonc::load_json_file(&manifest_path)?;
    let manifest: SkinManifest = serde_json::from_value(raw).map_err(PackError::ManifestShape)?;

    let mut geometry_files = Vec::new();
    let mut textures = Vec::new();
    let mut others = Vec::new();

    for entry in WalkDir::new(path)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let file_path = entry.path();
        let file_name = entry.file_name().to_string_lossy().to_string();
        let lower = file_name.to_lowercase();

        if lower == MANIFEST_NAME {
            continue;
        }

        let extension = file_path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        if TEXTURE_EXTENSIONS.contains(&extension.as_str()) {
            textures.push(file_path.to_path_buf());
            continue;
        }

        if extension != "json" {
            continue;
        }

        if lower.contains("geometry") || lower.contains("model") {
            match jsonc::load_json_file(file_path) {
                Ok(value) => {
                    geometry_files.push(GeometryFile { file_name, value });
                    continue;
                }
                Err(e) => warn!("Skipping geometry file {}: {}", file_name, e),
            }
        }

        others.push(file_path.to_path_buf());
    }

    let summary = summarize(&manifest, &geometry_files, &textures, &others);
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    Ok(Pack {
        name,
        manifest,
        geometry_files,
        textures,
        others,
        summary,
    })
}

fn summarize(
    manifest: &SkinManifest,
    geometry_files: &[GeometryFile],
    textures: &[PathBuf],
    others: &[PathBuf],
) -> PackSummary {
    let mut geometries = BTreeSet::new();
    let mut texture_ids = BTreeSet::new();

    for skin in &manifest.skins {
        if let Some(id) = skin.get("geometry").and_then(Value::as_str) {
            geometries.insert(id.to_string());
        }
        if let Some(id) = skin.get("texture").and_then(Value::as_str) {
            texture_ids.insert(id.to_string());
        }
    }

    PackSummary {
        skin_count: manifest.skins.len(),
        geometry_count: geometry_files.len(),
        texture_count: textures.len(),
        other_count: others.len(),
        geometries,
        textures: texture_ids,
    }
}
