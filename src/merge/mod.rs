//! Merge engine
//!
//! Folds an ordered list of loaded packs into one combined result. The
//! fold runs in input order, so results are deterministic and the caller
//! controls precedence. Two collision policies are in play and stay
//! distinct: named logical entities (skins, geometry entries) are
//! suffix-renamed so no content is lost, while files are deduplicated by
//! name with the first pack winning.

mod events;
mod rename;

pub use events::MergeEvent;
pub use rename::{Claim, NameRegistry};

use std::collections::BTreeMap;
use std::path::PathBuf;

use log::{debug, info, warn};
use serde_json::Value;

use crate::geometry::{self, GeometryDocument};
use crate::pack::{Pack, SkinManifest};

/// Fallback key for skins without a `localization_name`.
const UNNAMED_SKIN: &str = "unknown";

/// How many pack names contribute to a derived package id / display name.
const DERIVED_NAME_PACKS: usize = 3;

/// Naming options for a merge. `None` fields are derived from the first
/// few source packs after the fold.
#[derive(Debug, Clone, Default)]
pub struct MergeOptions {
    /// Output manifest `serialize_name`.
    pub package_id: Option<String>,
    /// Output manifest `localization_name`.
    pub display_name: Option<String>,
}

/// Totals accumulated over one merge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub total_skins: usize,
    pub total_geometries: usize,
    pub texture_count: usize,
    pub folder_count: usize,
}

/// The combined output of one merge invocation, ready for packaging.
/// Read-only once produced.
#[derive(Debug)]
pub struct MergedResult {
    pub manifest: SkinManifest,
    pub geometry: GeometryDocument,
    /// File name to source path, first pack wins.
    pub textures: BTreeMap<String, PathBuf>,
    /// Same policy as textures, for non-texture pass-through files.
    pub others: BTreeMap<String, PathBuf>,
    pub stats: MergeStats,
    pub events: Vec<MergeEvent>,
}

/// Errors from the merge fold
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    #[error("No skin packs to merge")]
    NoPacks,
}

/// Merge an ordered list of packs into one result.
pub fn merge(packs: &[Pack], options: &MergeOptions) -> Result<MergedResult, MergeError> {
    if packs.is_empty() {
        return Err(MergeError::NoPacks);
    }

    let mut skins = Vec::new();
    let mut geometry = GeometryDocument::new();
    let mut textures = BTreeMap::new();
    let mut others = BTreeMap::new();
    let mut events = Vec::new();
    let mut stats = MergeStats::default();

    let mut skin_names = NameRegistry::new();
    let mut geometry_ids = NameRegistry::new();

    for (index, pack) in packs.iter().enumerate() {
        info!("Merging pack {} ({}/{})", pack.name, index + 1, packs.len());

        for skin in &pack.manifest.skins {
            let mut skin = skin.clone();
            let original = skin
                .get("localization_name")
                .and_then(Value::as_str)
                .unwrap_or(UNNAMED_SKIN)
                .to_string();

            let claim = skin_names.claim(&original);
            if claim.renamed {
                set_skin_name(&mut skin, &claim.name);
                events.push(MergeEvent::SkinRenamed {
                    from: original,
                    to: claim.name,
                });
            }

            skins.push(skin);
            stats.total_skins += 1;
        }

        for file in &pack.geometry_files {
            let Some(doc) = geometry::normalize(&file.value) else {
                debug!("{}: {} is not a geometry document", pack.name, file.file_name);
                continue;
            };

            for entry in &doc.entries {
                let mut entry = entry.clone();
                let Some(original) = geometry::entry_identifier(&entry).map(str::to_string)
                else {
                    warn!(
                        "{}: geometry entry in {} has no description.identifier, skipping",
                        pack.name, file.file_name
                    );
                    continue;
                };

                let claim = geometry_ids.claim(&original);
                if claim.renamed {
                    geometry::set_entry_identifier(&mut entry, &claim.name);
                    events.push(MergeEvent::GeometryRenamed {
                        from: original,
                        to: claim.name,
                    });
                }

                geometry.entries.push(entry);
                stats.total_geometries += 1;
            }
        }

        collect_files(&pack.textures, &mut textures, &mut events);
        collect_files(&pack.others, &mut others, &mut events);
    }

    stats.texture_count = textures.len();
    stats.folder_count = packs.len();

    let manifest = SkinManifest {
        serialize_name: options
            .package_id
            .clone()
            .unwrap_or_else(|| derived_name(packs, "_")),
        localization_name: options
            .display_name
            .clone()
            .unwrap_or_else(|| derived_name(packs, " + ")),
        skins,
    };

    Ok(MergedResult {
        manifest,
        geometry,
        textures,
        others,
        stats,
        events,
    })
}

fn set_skin_name(skin: &mut Value, name: &str) {
    if let Some(obj) = skin.as_object_mut() {
        obj.insert(
            "localization_name".to_string(),
            Value::String(name.to_string()),
        );
    }
}

/// Join the first few packs' serialize_names; used when the caller left
/// package id / display name unset.
fn derived_name(packs: &[Pack], separator: &str) -> String {
    packs
        .iter()
        .take(DERIVED_NAME_PACKS)
        .map(|p| p.manifest.serialize_name.as_str())
        .collect::<Vec<_>>()
        .join(separator)
}

/// First-seen-wins file collection. Later same-named files are dropped
/// and reported, never renamed.
fn collect_files(
    files: &[PathBuf],
    map: &mut BTreeMap<String, PathBuf>,
    events: &mut Vec<MergeEvent>,
) {
    for path in files {
        let Some(file_name) = path.file_name().map(|n| n.to_string_lossy().to_string()) else {
            continue;
        };
        if map.contains_key(&file_name) {
            events.push(MergeEvent::FileSkipped {
                file_name,
                path: path.clone(),
            });
            continue;
        }
        map.insert(file_name, path.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pack::{GeometryFile, PackSummary};
    use serde_json::json;

    fn pack_with_skins(name: &str, skin_names: &[&str]) -> Pack {
        let skins: Vec<Value> = skin_names
            .iter()
            .map(|n| json!({"localization_name": n, "texture": format!("{}.png", n)}))
            .collect();
        Pack {
            name: name.to_string(),
            manifest: SkinManifest {
                serialize_name: name.to_string(),
                localization_name: format!("{} Display", name),
                skins,
            },
            geometry_files: Vec::new(),
            textures: Vec::new(),
            others: Vec::new(),
            summary: PackSummary::default(),
        }
    }

    fn with_geometry(mut pack: Pack, file_name: &str, value: Value) -> Pack {
        pack.geometry_files.push(GeometryFile {
            file_name: file_name.to_string(),
            value,
        });
        pack
    }

    #[test]
    fn disjoint_names_are_preserved() {
        let packs = vec![
            pack_with_skins("one", &["Steve", "Alex"]),
            pack_with_skins("two", &["Herobrine"]),
        ];

        let result = merge(&packs, &MergeOptions::default()).unwrap();
        let names: Vec<_> = result
            .manifest
            .skins
            .iter()
            .map(|s| s["localization_name"].as_str().unwrap())
            .collect();
        assert_eq!(names, ["Steve", "Alex", "Herobrine"]);
        assert!(result.events.is_empty());
    }

    #[test]
    fn colliding_skins_get_suffixes() {
        let packs = vec![
            pack_with_skins("one", &["X"]),
            pack_with_skins("two", &["X"]),
            pack_with_skins("three", &["X"]),
        ];

        let result = merge(&packs, &MergeOptions::default()).unwrap();
        let names: Vec<_> = result
            .manifest
            .skins
            .iter()
            .map(|s| s["localization_name"].as_str().unwrap())
            .collect();
        assert_eq!(names, ["X", "X_2", "X_3"]);

        let renames: Vec<_> = result
            .events
            .iter()
            .filter(|e| matches!(e, MergeEvent::SkinRenamed { .. }))
            .collect();
        assert_eq!(renames.len(), 2);
    }

    #[test]
    fn source_packs_are_not_mutated() {
        let packs = vec![pack_with_skins("one", &["X"]), pack_with_skins("two", &["X"])];

        let _ = merge(&packs, &MergeOptions::default()).unwrap();
        assert_eq!(packs[1].manifest.skins[0]["localization_name"], "X");
    }

    #[test]
    fn geometry_collisions_follow_the_same_policy() {
        let legacy = json!({"geometry.cape": {"bones": []}});
        let packs = vec![
            with_geometry(pack_with_skins("one", &[]), "geometry.json", legacy.clone()),
            with_geometry(pack_with_skins("two", &[]), "geometry.json", legacy.clone()),
            with_geometry(pack_with_skins("three", &[]), "geometry.json", legacy),
        ];

        let result = merge(&packs, &MergeOptions::default()).unwrap();
        let ids: Vec<_> = result
            .geometry
            .entries
            .iter()
            .filter_map(geometry::entry_identifier)
            .collect();
        assert_eq!(ids, ["geometry.cape", "geometry.cape_2", "geometry.cape_3"]);
        assert_eq!(result.stats.total_geometries, 3);
    }

    #[test]
    fn skin_and_geometry_namespaces_do_not_interfere() {
        // A skin and a geometry entry sharing the literal name "shared"
        let geo = json!({"minecraft:geometry": [
            {"description": {"identifier": "shared"}, "bones": []}
        ]});
        let packs = vec![with_geometry(
            pack_with_skins("one", &["shared"]),
            "model.json",
            geo,
        )];

        let result = merge(&packs, &MergeOptions::default()).unwrap();
        assert_eq!(result.manifest.skins[0]["localization_name"], "shared");
        assert_eq!(
            geometry::entry_identifier(&result.geometry.entries[0]),
            Some("shared")
        );
        assert!(result.events.is_empty());
    }

    #[test]
    fn non_geometry_files_are_skipped() {
        let packs = vec![with_geometry(
            pack_with_skins("one", &[]),
            "model.json",
            json!({"no": "geometry here"}),
        )];

        let result = merge(&packs, &MergeOptions::default()).unwrap();
        assert!(result.geometry.is_empty());
    }

    #[test]
    fn files_deduplicate_first_seen_wins() {
        let mut one = pack_with_skins("one", &[]);
        one.textures.push(PathBuf::from("/packs/one/a.png"));
        let mut two = pack_with_skins("two", &[]);
        two.textures.push(PathBuf::from("/packs/two/a.png"));
        two.textures.push(PathBuf::from("/packs/two/b.png"));

        let result = merge(&[one, two], &MergeOptions::default()).unwrap();
        assert_eq!(result.textures["a.png"], PathBuf::from("/packs/one/a.png"));
        assert_eq!(result.textures.len(), 2);
        assert_eq!(result.stats.texture_count, 2);

        // Dropped, not renamed: exactly one skip event, zero rename events
        assert_eq!(
            result.events,
            vec![MergeEvent::FileSkipped {
                file_name: "a.png".to_string(),
                path: PathBuf::from("/packs/two/a.png"),
            }]
        );
    }

    #[test]
    fn skin_without_name_is_keyed_unknown() {
        let mut pack = pack_with_skins("one", &[]);
        pack.manifest.skins.push(json!({"texture": "mystery.png"}));
        pack.manifest.skins.push(json!({"texture": "mystery2.png"}));

        let result = merge(&[pack], &MergeOptions::default()).unwrap();
        // Second unnamed skin collides with the implicit "unknown" key
        assert_eq!(result.manifest.skins[1]["localization_name"], "unknown_2");
        assert!(result.manifest.skins[0].get("localization_name").is_none());
    }

    #[test]
    fn explicit_options_are_used_verbatim() {
        let packs = vec![pack_with_skins("one", &[])];
        let options = MergeOptions {
            package_id: Some("MyPack".to_string()),
            display_name: Some("My Pack".to_string()),
        };

        let result = merge(&packs, &options).unwrap();
        assert_eq!(result.manifest.serialize_name, "MyPack");
        assert_eq!(result.manifest.localization_name, "My Pack");
    }

    #[test]
    fn names_derive_from_first_three_packs() {
        let packs = vec![
            pack_with_skins("a", &[]),
            pack_with_skins("b", &[]),
            pack_with_skins("c", &[]),
            pack_with_skins("d", &[]),
        ];

        let result = merge(&packs, &MergeOptions::default()).unwrap();
        assert_eq!(result.manifest.serialize_name, "a_b_c");
        assert_eq!(result.manifest.localization_name, "a + b + c");
    }

    #[test]
    fn stats_accumulate() {
        let packs = vec![
            pack_with_skins("one", &["A", "B"]),
            pack_with_skins("two", &["C"]),
        ];

        let result = merge(&packs, &MergeOptions::default()).unwrap();
        assert_eq!(
            result.stats,
            MergeStats {
                total_skins: 3,
                total_geometries: 0,
                texture_count: 0,
                folder_count: 2,
            }
        );
    }

    #[test]
    fn merging_nothing_fails() {
        let err = merge(&[], &MergeOptions::default()).unwrap_err();
        assert!(matches!(err, MergeError::NoPacks));
    }
}
