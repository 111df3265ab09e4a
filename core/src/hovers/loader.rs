//! Hover document loading
//!
//! Reads every `*.json` file directly inside the hover directory. A file that
//! cannot be read, does not parse, or lacks the hover-map sentinel is logged
//! and skipped; it never prevents the other files from loading.

use std::error::Error as _;
use std::fs;
use std::path::Path;

use super::{HoverDocument, HoverError};

/// Extension of hover definition files
pub const HOVER_FILE_EXTENSION: &str = "json";

/// Load all hover documents from `dir`.
///
/// An unreadable or missing directory yields an empty list.
pub fn load_hover_documents(dir: &Path) -> Vec<HoverDocument> {
    try_load_hover_documents(dir).unwrap_or_else(|e| {
        tracing::warn!(path = %dir.display(), error = %e, "Hover directory unavailable");
        Vec::new()
    })
}

/// Like [`load_hover_documents`] but reports an unreadable directory, so a
/// reload can keep the previous index instead of clearing it.
pub fn try_load_hover_documents(dir: &Path) -> Result<Vec<HoverDocument>, HoverError> {
    let entries = fs::read_dir(dir).map_err(|source| HoverError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    // Sorted so document order (and therefore bucket order) is stable across reloads
    let mut paths: Vec<_> = entries.flatten().map(|e| e.path()).collect();
    paths.sort();

    let mut documents = Vec::new();
    for path in paths {
        if !path.is_file() {
            continue;
        }
        if !is_hover_file(&path) {
            tracing::debug!(path = %path.display(), "Skipping file without .json extension");
            continue;
        }

        match load_hover_file(&path) {
            Ok(doc) => {
                tracing::debug!(
                    path = %path.display(),
                    definitions = doc.hovers.len(),
                    "Loaded hover file"
                );
                documents.push(doc);
            }
            Err(e) => {
                tracing::warn!(error = %e, cause = ?e.source(), "Skipping hover file");
            }
        }
    }

    Ok(documents)
}

/// Parse and validate a single hover file, preparing its templates
pub fn load_hover_file(path: &Path) -> Result<HoverDocument, HoverError> {
    let content = fs::read_to_string(path).map_err(|source| HoverError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    let mut doc: HoverDocument =
        serde_json::from_str(&content).map_err(|source| HoverError::ParseJson {
            path: path.to_path_buf(),
            source,
        })?;

    if !doc.is_valid() {
        return Err(HoverError::NotHoverMap {
            path: path.to_path_buf(),
        });
    }

    for def in &mut doc.hovers {
        def.prepare_templates();
    }

    Ok(doc)
}

/// Create the hover directory (and parents) if it does not exist yet
pub fn ensure_hover_dir(dir: &Path) -> Result<(), HoverError> {
    if dir.is_dir() {
        return Ok(());
    }

    fs::create_dir_all(dir).map_err(|source| HoverError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %dir.display(), "Created hover directory");
    Ok(())
}

pub(crate) fn is_hover_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == HOVER_FILE_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const VALID: &str = r#"{
        "is_hover_map": "absolutely",
        "hovers": [{ "ids": [1], "hovers": [["Line A", "Line B"]] }]
    }"#;

    fn write(dir: &TempDir, name: &str, content: &str) {
        fs::write(dir.path().join(name), content).unwrap();
    }

    #[test]
    fn loads_valid_documents_and_joins_lines() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.json", VALID);

        let docs = load_hover_documents(dir.path());
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].hovers[0].templates, vec!["Line A</br>Line B"]);
    }

    #[test]
    fn skips_bad_files_without_affecting_others() {
        let dir = TempDir::new().unwrap();
        write(&dir, "1-broken.json", "{ not json");
        write(&dir, "2-no-sentinel.json", r#"{ "hovers": [{ "ids": [1] }] }"#);
        write(
            &dir,
            "3-wrong-sentinel.json",
            r#"{ "is_hover_map": "maybe", "hovers": [{ "ids": [1] }] }"#,
        );
        write(&dir, "4-notes.txt", VALID);
        write(&dir, "5-good.json", VALID);
        fs::create_dir(dir.path().join("6-nested.json")).unwrap();

        let docs = load_hover_documents(dir.path());
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].hovers[0].target.ids, vec![1]);
    }

    #[test]
    fn documents_load_in_file_name_order() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "b.json",
            r#"{ "is_hover_map": "absolutely", "hovers": [{ "ids": [2] }] }"#,
        );
        write(
            &dir,
            "a.json",
            r#"{ "is_hover_map": "absolutely", "hovers": [{ "ids": [1] }] }"#,
        );

        let docs = load_hover_documents(dir.path());
        let ids: Vec<_> = docs.iter().map(|d| d.hovers[0].target.ids[0]).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn missing_directory_degrades_to_empty() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");

        assert!(load_hover_documents(&missing).is_empty());
        assert!(matches!(
            try_load_hover_documents(&missing),
            Err(HoverError::ReadDir { .. })
        ));
    }

    #[test]
    fn load_hover_file_classifies_errors() {
        let dir = TempDir::new().unwrap();
        write(&dir, "bad.json", "[1, 2");
        write(&dir, "plain.json", r#"{ "hovers": [] }"#);

        assert!(matches!(
            load_hover_file(&dir.path().join("bad.json")),
            Err(HoverError::ParseJson { .. })
        ));
        assert!(matches!(
            load_hover_file(&dir.path().join("plain.json")),
            Err(HoverError::NotHoverMap { .. })
        ));
        assert!(matches!(
            load_hover_file(&dir.path().join("absent.json")),
            Err(HoverError::ReadFile { .. })
        ));
    }

    #[test]
    fn ensure_hover_dir_creates_nested_path() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("config").join("hovers");

        ensure_hover_dir(&target).unwrap();
        assert!(target.is_dir());
        // Second call is a no-op
        ensure_hover_dir(&target).unwrap();
    }
}
