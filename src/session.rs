//! Merge session state
//!
//! Holds the packs a driver has loaded plus the configured naming
//! options. Sessions are plain values with no global state, so one
//! process can run any number of independent merges.

use std::path::Path;

use crate::merge::{self, MergeError, MergeOptions, MergedResult};
use crate::pack::{self, Pack, PackError};

/// Accumulated driver state for one merge session.
#[derive(Debug, Default)]
pub struct MergeSession {
    packs: Vec<Pack>,
    options: MergeOptions,
}

impl MergeSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a skin pack folder and append it to the session.
    ///
    /// A failed load leaves the session unchanged; the caller decides
    /// whether to skip the folder or abort.
    pub fn add_folder(&mut self, path: &Path) -> Result<&Pack, PackError> {
        let pack = pack::load_folder(path)?;
        self.packs.push(pack);
        Ok(self.packs.last().expect("pack was just pushed"))
    }

    pub fn packs(&self) -> &[Pack] {
        &self.packs
    }

    /// Drop all loaded packs, returning how many were removed.
    pub fn clear(&mut self) -> usize {
        let count = self.packs.len();
        self.packs.clear();
        count
    }

    pub fn set_package_id(&mut self, id: impl Into<String>) {
        self.options.package_id = Some(id.into());
    }

    pub fn set_display_name(&mut self, name: impl Into<String>) {
        self.options.display_name = Some(name.into());
    }

    pub fn options(&self) -> &MergeOptions {
        &self.options
    }

    /// Merge every loaded pack, in load order.
    pub fn merge(&self) -> Result<MergedResult, MergeError> {
        merge::merge(&self.packs, &self.options)
    }
}
