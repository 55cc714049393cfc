//! Local file handling for uploads and downloads

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::error;

/// Demo file uploaded when no usable path is given
pub const UPLOAD_FILE_NAME: &str = "cloud-storage-upload-test.txt";

/// Line written into a freshly created demo file
const UPLOAD_FILE_CONTENTS: &str = "This is a test file for the Cloud Storage demo.";

/// Resolve the file to upload.
///
/// A blank entry means the demo file under `dir`, created when missing.
/// An entry naming a file that does not exist falls back to the demo file
/// as well, so the upload command always has something to send.
pub fn resolve_upload_path(dir: &Path, entry: &str) -> io::Result<PathBuf> {
    if entry.is_empty() {
        return demo_file(dir);
    }
    let path = PathBuf::from(entry);
    if path.is_file() {
        return Ok(path);
    }
    error!("File does not exist, creating {} file.", UPLOAD_FILE_NAME);
    demo_file(dir)
}

fn demo_file(dir: &Path) -> io::Result<PathBuf> {
    let path = dir.join(UPLOAD_FILE_NAME);
    if !path.exists() {
        fs::write(&path, UPLOAD_FILE_CONTENTS)?;
    }
    Ok(path)
}

/// Base name of an upload path, the fallback object name
pub fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Name of the local file a downloaded object lands in: the final
/// `/`-separated segment of the object name
pub fn download_file_name(object: &str) -> &str {
    match object.rsplit_once('/') {
        Some((_, name)) => name,
        None => object,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_entry_creates_the_demo_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = resolve_upload_path(dir.path(), "").unwrap();
        assert_eq!(path, dir.path().join(UPLOAD_FILE_NAME));
        assert_eq!(fs::read_to_string(&path).unwrap(), UPLOAD_FILE_CONTENTS);
    }

    #[test]
    fn test_existing_demo_file_is_left_alone() {
        let dir = tempfile::tempdir().unwrap();
        let existing = dir.path().join(UPLOAD_FILE_NAME);
        fs::write(&existing, "already here").unwrap();

        let path = resolve_upload_path(dir.path(), "").unwrap();
        assert_eq!(path, existing);
        assert_eq!(fs::read_to_string(&path).unwrap(), "already here");
    }

    #[test]
    fn test_entry_naming_an_existing_file_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let report = dir.path().join("report.txt");
        fs::write(&report, "report").unwrap();

        let path = resolve_upload_path(dir.path(), report.to_str().unwrap()).unwrap();
        assert_eq!(path, report);
    }

    #[test]
    fn test_missing_entry_falls_back_to_the_demo_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = resolve_upload_path(dir.path(), "no-such-file.bin").unwrap();
        assert_eq!(path, dir.path().join(UPLOAD_FILE_NAME));
        assert!(path.is_file());
    }

    #[test]
    fn test_base_name() {
        assert_eq!(base_name(Path::new("notes.txt")), "notes.txt");
        assert_eq!(base_name(Path::new("uploads/notes.txt")), "notes.txt");
    }

    #[test]
    fn test_download_file_name_takes_the_final_segment() {
        assert_eq!(download_file_name("photo.png"), "photo.png");
        assert_eq!(download_file_name("albums/2024/photo.png"), "photo.png");
    }
}
