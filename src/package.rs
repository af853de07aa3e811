//! Packaging merged results
//!
//! Archive mode writes a flat deflate zip: `skins.json` always,
//! `geometry.json` only when geometry exists, then every collected
//! texture/other file under its plain file name. The archive targets a
//! temporary sibling path and renames into place on success, so an
//! interrupted run never leaves a half-written archive under the
//! requested name. Directory mode writes only the merged JSON config
//! files.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{info, warn};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::merge::MergedResult;

/// Manifest name inside an archive.
pub const ARCHIVE_SKINS_NAME: &str = "skins.json";
/// Geometry document name inside an archive.
pub const ARCHIVE_GEOMETRY_NAME: &str = "geometry.json";
/// Manifest name in directory mode.
pub const DIR_SKINS_NAME: &str = "merged_skins.json";
/// Geometry document name in directory mode.
pub const DIR_GEOMETRY_NAME: &str = "merged_geometry.json";

/// Errors when writing packaged output
#[derive(Debug, thiserror::Error)]
pub enum PackageError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Failed to serialize {name}: {source}")]
    Serialize {
        name: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Write the merged result as a deflate zip archive at `path`.
///
/// A source file that cannot be opened is logged and left out (the
/// archive is still produced and the omission reported); failures from
/// the archive writer itself abort the whole write.
pub fn write_archive(result: &MergedResult, path: &Path) -> Result<(), PackageError> {
    let tmp = temp_path(path);
    let outcome = write_archive_to(result, &tmp)
        .and_then(|()| fs::rename(&tmp, path).map_err(PackageError::from));
    if outcome.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    outcome
}

fn write_archive_to(result: &MergedResult, path: &Path) -> Result<(), PackageError> {
    let file = File::create(path)?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let skins = pretty_json(&result.manifest, ARCHIVE_SKINS_NAME)?;
    zip.start_file(ARCHIVE_SKINS_NAME, options)?;
    zip.write_all(skins.as_bytes())?;

    if !result.geometry.is_empty() {
        let geometry = pretty_json(&result.geometry, ARCHIVE_GEOMETRY_NAME)?;
        zip.start_file(ARCHIVE_GEOMETRY_NAME, options)?;
        zip.write_all(geometry.as_bytes())?;
    }

    append_files(&mut zip, &result.textures, options)?;
    append_files(&mut zip, &result.others, options)?;

    zip.finish()?;
    info!("Wrote archive {}", path.display());
    Ok(())
}

fn append_files(
    zip: &mut ZipWriter<File>,
    files: &BTreeMap<String, PathBuf>,
    options: SimpleFileOptions,
) -> Result<(), PackageError> {
    for (file_name, source) in files {
        let mut reader = match File::open(source) {
            Ok(f) => f,
            Err(e) => {
                warn!(
                    "Leaving {} out of the archive, could not read {}: {}",
                    file_name,
                    source.display(),
                    e
                );
                continue;
            }
        };
        zip.start_file(file_name.as_str(), options)?;
        io::copy(&mut reader, zip)?;
    }
    Ok(())
}

/// Write only the merged JSON config files into `dir`, creating it if
/// absent. Texture/other files are not copied in this mode.
pub fn write_directory(result: &MergedResult, dir: &Path) -> Result<(), PackageError> {
    fs::create_dir_all(dir)?;

    let skins = pretty_json(&result.manifest, DIR_SKINS_NAME)?;
    fs::write(dir.join(DIR_SKINS_NAME), skins)?;
    info!("Wrote {}", dir.join(DIR_SKINS_NAME).display());

    if !result.geometry.is_empty() {
        let geometry = pretty_json(&result.geometry, DIR_GEOMETRY_NAME)?;
        fs::write(dir.join(DIR_GEOMETRY_NAME), geometry)?;
        info!("Wrote {}", dir.join(DIR_GEOMETRY_NAME).display());
    }

    Ok(())
}

fn pretty_json<T: serde::Serialize>(value: &T, name: &'static str) -> Result<String, PackageError> {
    serde_json::to_string_pretty(value).map_err(|source| PackageError::Serialize { name, source })
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "merged".into());
    name.push(".tmp");
    path.with_file_name(name)
}
