//! Paths inside a Steam installation root.

use std::fmt;
use std::path::{Path, PathBuf};

/// Opaque catalog id of one downloadable title (Steam AppID).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AppId(String);

impl AppId {
    /// Accept a directory name as an id: non-empty, ASCII digits only.
    pub fn from_dir_name(name: &str) -> Option<Self> {
        if !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit()) {
            Some(Self(name.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A located Steam installation.
#[derive(Debug, Clone)]
pub struct SteamLibrary {
    root: PathBuf,
}

impl SteamLibrary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn steamapps_dir(&self) -> PathBuf {
        self.root.join("steamapps")
    }

    /// Directory listing one subdirectory per in-progress download.
    pub fn downloading_dir(&self) -> PathBuf {
        self.steamapps_dir().join("downloading")
    }

    /// Staging directory holding partially downloaded files for `id`.
    pub fn staging_dir(&self, id: &AppId) -> PathBuf {
        self.downloading_dir().join(id.as_str())
    }

    /// Descriptor (`appmanifest_<id>.acf`) for `id`.
    pub fn manifest_path(&self, id: &AppId) -> PathBuf {
        self.steamapps_dir()
            .join(format!("appmanifest_{}.acf", id.as_str()))
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.root.join("logs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_id_accepts_digits_only() {
        assert_eq!(AppId::from_dir_name("570").unwrap().as_str(), "570");
        assert!(AppId::from_dir_name("").is_none());
        assert!(AppId::from_dir_name("state_570_571").is_none());
        assert!(AppId::from_dir_name("57a").is_none());
    }

    #[test]
    fn library_paths() {
        let lib = SteamLibrary::new("/steam");
        let id = AppId::from_dir_name("440").unwrap();
        assert_eq!(
            lib.manifest_path(&id),
            Path::new("/steam/steamapps/appmanifest_440.acf")
        );
        assert_eq!(
            lib.staging_dir(&id),
            Path::new("/steam/steamapps/downloading/440")
        );
        assert_eq!(lib.logs_dir(), Path::new("/steam/logs"));
    }
}
