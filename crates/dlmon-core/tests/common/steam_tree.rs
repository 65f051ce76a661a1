//! Fake Steam installation on disk for integration tests.

use std::fs;
use std::io::Write;
use std::path::Path;

use dlmon_core::library::{AppId, SteamLibrary};
use tempfile::TempDir;

pub struct SteamTree {
    _dir: TempDir,
    pub library: SteamLibrary,
}

impl SteamTree {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let library = SteamLibrary::new(dir.path());
        fs::create_dir_all(library.steamapps_dir()).unwrap();
        fs::create_dir_all(library.logs_dir()).unwrap();
        Self { _dir: dir, library }
    }

    pub fn root(&self) -> &Path {
        self.library.root()
    }

    /// Staging directory with an empty chunk file, as Steam creates on start.
    pub fn start_download(&self, id: &str) -> AppId {
        let id = AppId::from_dir_name(id).unwrap();
        fs::create_dir_all(self.library.staging_dir(&id)).unwrap();
        self.set_staged_bytes(&id, 0);
        id
    }

    /// Empty staging directory left behind after a completed download.
    pub fn leave_empty_shell(&self, id: &str) {
        let id = AppId::from_dir_name(id).unwrap();
        fs::create_dir_all(self.library.staging_dir(&id)).unwrap();
    }

    pub fn finish_download(&self, id: &AppId) {
        fs::remove_dir_all(self.library.staging_dir(id)).unwrap();
    }

    /// Write the manifest; `progress` is `(BytesDownloaded, BytesToDownload)`.
    pub fn write_manifest(&self, id: &AppId, name: Option<&str>, progress: Option<(u64, u64)>) {
        let mut body = format!("\"AppState\"\n{{\n\t\"appid\"\t\t\"{id}\"\n");
        if let Some(name) = name {
            body.push_str(&format!("\t\"name\"\t\t\"{name}\"\n"));
        }
        if let Some((done, total)) = progress {
            body.push_str(&format!("\t\"BytesToDownload\"\t\t\"{total}\"\n"));
            body.push_str(&format!("\t\"BytesDownloaded\"\t\t\"{done}\"\n"));
        }
        body.push_str("}\n");
        fs::write(self.library.manifest_path(id), body).unwrap();
    }

    /// Replace the staging folder content with a single file of `len` bytes.
    pub fn set_staged_bytes(&self, id: &AppId, len: u64) {
        let file = fs::File::create(self.library.staging_dir(id).join("chunk.bin")).unwrap();
        file.set_len(len).unwrap();
    }

    pub fn append_content_log(&self, line: &str) {
        let mut f = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.library.logs_dir().join("content_log.txt"))
            .unwrap();
        writeln!(f, "{line}").unwrap();
    }
}
