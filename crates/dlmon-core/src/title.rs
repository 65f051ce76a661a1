//! Resolve a human-readable title for an AppID.

use crate::library::{AppId, SteamLibrary};
use crate::vdf::AppManifest;

/// Title from the app manifest, or the id itself when it cannot be read.
pub fn resolve_title(library: &SteamLibrary, id: &AppId) -> String {
    let path = library.manifest_path(id);
    match AppManifest::read(&path) {
        Ok(manifest) => match manifest.name() {
            Some(name) => name.to_string(),
            None => {
                tracing::debug!(app_id = %id, "manifest has no name");
                id.to_string()
            }
        },
        Err(e) => {
            tracing::debug!(app_id = %id, "manifest unavailable for title: {:#}", e);
            id.to_string()
        }
    }
}
