//! skinpack-merge - Minecraft Bedrock skin pack merging
//!
//! Merges multiple skin pack folders into one combined pack. Skin names
//! and geometry identifiers that collide are suffix-renamed, duplicate
//! texture/other files are deduplicated first-seen-wins, legacy geometry
//! documents are normalized to the 1.12.0 schema, and the result is
//! packaged as a deflate zip archive or a directory of JSON config files.

pub mod geometry;
pub mod jsonc;
pub mod merge;
pub mod pack;
pub mod package;
pub mod session;

pub use geometry::GeometryDocument;
pub use jsonc::JsonError;
pub use merge::{MergeError, MergeEvent, MergeOptions, MergeStats, MergedResult};
pub use pack::{Pack, PackError, PackSummary, SkinManifest};
pub use package::PackageError;
pub use session::MergeSession;
