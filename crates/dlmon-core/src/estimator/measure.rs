//! The two measurement tiers: manifest progress fields, then staging folder size.

use walkdir::WalkDir;

use crate::library::{AppId, SteamLibrary};
use crate::vdf::{AppManifest, ManifestProgress};

/// Manifest progress for `id`, if the descriptor has usable progress fields.
pub fn manifest_progress(library: &SteamLibrary, id: &AppId) -> Option<ManifestProgress> {
    let path = library.manifest_path(id);
    match AppManifest::read(&path) {
        Ok(manifest) => {
            let progress = manifest.progress();
            if progress.is_none() {
                tracing::debug!(app_id = %id, "manifest lacks usable progress fields");
            }
            progress
        }
        Err(e) => {
            tracing::debug!(app_id = %id, "manifest unavailable for progress: {:#}", e);
            None
        }
    }
}

/// Total size of all files under the staging directory, or `None` if it is gone.
pub fn staging_folder_bytes(library: &SteamLibrary, id: &AppId) -> Option<u64> {
    let dir = library.staging_dir(id);
    if !dir.is_dir() {
        return None;
    }
    let total = WalkDir::new(&dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.metadata().ok())
        .map(|meta| meta.len())
        .sum();
    Some(total)
}
