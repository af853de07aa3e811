//! Merge decisions surfaced as typed, printable events.
//!
//! Drivers print these as their progress/log lines; library consumers
//! can match on them instead of scraping logger output.

use std::fmt;
use std::path::PathBuf;

/// One notable decision made during a merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeEvent {
    /// A skin's `localization_name` collided and was suffix-renamed.
    SkinRenamed { from: String, to: String },

    /// A geometry entry's `description.identifier` collided and was
    /// suffix-renamed.
    GeometryRenamed { from: String, to: String },

    /// A later pack's file shared a name with one already collected.
    /// Files are deduplicated, never renamed; this one was dropped.
    FileSkipped { file_name: String, path: PathBuf },
}

impl fmt::Display for MergeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeEvent::SkinRenamed { from, to } => {
                write!(f, "Renamed skin: {} -> {}", from, to)
            }
            MergeEvent::GeometryRenamed { from, to } => {
                write!(f, "Renamed geometry: {} -> {}", from, to)
            }
            MergeEvent::FileSkipped { file_name, path } => {
                write!(
                    f,
                    "Skipped duplicate file {} (from {})",
                    file_name,
                    path.display()
                )
            }
        }
    }
}
