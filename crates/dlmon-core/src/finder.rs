//! Find the in-progress download under `steamapps/downloading/`.

use std::fs;
use std::io;
use std::path::Path;

use walkdir::WalkDir;

use crate::library::{AppId, SteamLibrary};
use crate::locator::LocateError;

/// First in-progress download, or `None` if nothing is downloading.
///
/// Only one download is monitored; when several staging directories exist
/// the lowest numeric id is chosen so repeated ticks stay on the same title.
/// Staging directories without any file are leftovers of finished downloads.
pub fn find_active_download(library: &SteamLibrary) -> Result<Option<AppId>, LocateError> {
    let dir = library.downloading_dir();
    let entries = match fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => return Err(LocateError::Unreadable { path: dir, source }),
    };

    let mut ids: Vec<AppId> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .filter(|entry| has_any_file(&entry.path()))
        .filter_map(|entry| AppId::from_dir_name(entry.file_name().to_str()?))
        .collect();

    ids.sort_by(|a, b| {
        a.as_str()
            .len()
            .cmp(&b.as_str().len())
            .then_with(|| a.as_str().cmp(b.as_str()))
    });

    if ids.len() > 1 {
        tracing::debug!(
            count = ids.len(),
            chosen = %ids[0],
            "several downloads in progress; monitoring the first"
        );
    }
    Ok(ids.into_iter().next())
}

fn has_any_file(dir: &Path) -> bool {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .any(|entry| entry.file_type().is_file())
}
