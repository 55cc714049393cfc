//! Project id resolution
//!
//! The id comes from the command line when given, else from the
//! `project_info` file a previous run left behind, else the user is asked
//! and the answer is written there for next time.

use std::fs;
use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::Result;
use tracing::debug;

use crate::input::Prompter;

/// File that remembers the project id between runs
pub const PROJECT_FILE: &str = "project_info";

const PROJECT_PROMPT: &str = "your Cloud Storage project id (found in the API console)";

/// Resolve the Cloud Storage project id
pub fn resolve_project_id<R: BufRead, W: Write>(
    dir: &Path,
    explicit: Option<String>,
    prompter: &mut Prompter<R, W>,
) -> Result<String> {
    if let Some(project_id) = explicit.filter(|id| !id.is_empty()) {
        return Ok(project_id);
    }

    let path = dir.join(PROJECT_FILE);
    if let Ok(stored) = fs::read_to_string(&path) {
        let stored = stored.trim();
        if !stored.is_empty() {
            debug!("Using project id from {}", path.display());
            return Ok(stored.to_string());
        }
    }

    let project_id = prompter.required(PROJECT_PROMPT)?;
    fs::write(&path, &project_id)?;
    Ok(project_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_explicit_id_wins_without_touching_disk() {
        let dir = tempfile::tempdir().unwrap();
        let id = resolve_project_id(dir.path(), Some("123456".to_string()), &mut prompter(""))
            .unwrap();
        assert_eq!(id, "123456");
        assert!(!dir.path().join(PROJECT_FILE).exists());
    }

    #[test]
    fn test_stored_id_is_reused() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(PROJECT_FILE), "stored-id\n").unwrap();

        let id = resolve_project_id(dir.path(), None, &mut prompter("")).unwrap();
        assert_eq!(id, "stored-id");
    }

    #[test]
    fn test_prompted_id_is_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let id = resolve_project_id(dir.path(), None, &mut prompter("typed-id\n")).unwrap();
        assert_eq!(id, "typed-id");
        assert_eq!(
            fs::read_to_string(dir.path().join(PROJECT_FILE)).unwrap(),
            "typed-id"
        );
    }
}
