//! Target discovery
//!
//! Turns the path given on the command line into the list of files to
//! validate: the file itself, or every matching file under a directory.

use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

/// Directories never worth descending into
const SKIPPED_DIRS: [&str; 3] = [".git", "node_modules", "target"];

#[derive(Debug, Error)]
pub enum TargetError {
    #[error("Path does not exist: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Not a {expected} file: {}", .path.display())]
    WrongType { path: PathBuf, expected: String },

    #[error("Expected a file, got a directory: {}", .0.display())]
    NotAFile(PathBuf),

    #[error("Failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),
}

fn is_skipped(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| SKIPPED_DIRS.contains(&name))
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.contains(&ext))
}

/// Every file under `root` with one of `extensions`, in a stable order
pub fn collect_files(root: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>, TargetError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_skipped(e))
    {
        let entry = entry?;
        if entry.file_type().is_file() && has_extension(entry.path(), extensions) {
            files.push(entry.into_path());
        }
    }

    log::debug!(
        "Found {} file(s) under {} matching {:?}",
        files.len(),
        root.display(),
        extensions
    );

    Ok(files)
}

/// Resolve a command-line path into files.
///
/// A file must carry one of `extensions`. A directory is only accepted when
/// `allow_dir` is set, and is searched recursively.
pub fn resolve_targets(
    path: &Path,
    extensions: &[&str],
    allow_dir: bool,
) -> Result<Vec<PathBuf>, TargetError> {
    if path.is_dir() {
        if !allow_dir {
            return Err(TargetError::NotAFile(path.to_path_buf()));
        }
        return collect_files(path, extensions);
    }

    if !path.exists() {
        return Err(TargetError::NotFound(path.to_path_buf()));
    }

    if !has_extension(path, extensions) {
        return Err(TargetError::WrongType {
            path: path.to_path_buf(),
            expected: extensions
                .iter()
                .map(|ext| format!(".{}", ext))
                .collect::<Vec<_>>()
                .join("/"),
        });
    }

    Ok(vec![path.to_path_buf()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_collect_files_recursively_in_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::create_dir_all(dir.path().join("b/nested")).expect("mkdir");
        fs::create_dir_all(dir.path().join("node_modules/pkg")).expect("mkdir");
        fs::write(dir.path().join("b/nested/z.md"), "").expect("write");
        fs::write(dir.path().join("a.md"), "").expect("write");
        fs::write(dir.path().join("b/notes.txt"), "").expect("write");
        fs::write(dir.path().join("node_modules/pkg/README.md"), "").expect("write");

        let files = collect_files(dir.path(), &["md"]).expect("collect");
        let relative: Vec<_> = files
            .iter()
            .map(|f| f.strip_prefix(dir.path()).expect("prefix").to_path_buf())
            .collect();
        assert_eq!(
            relative,
            [PathBuf::from("a.md"), PathBuf::from("b/nested/z.md")]
        );
    }

    #[test]
    fn test_resolve_single_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = dir.path().join("Recipe.java");
        fs::write(&file, "").expect("write");

        let targets = resolve_targets(&file, &["java"], false).expect("resolve");
        assert_eq!(targets, [file]);
    }

    #[test]
    fn test_resolve_errors() {
        let dir = tempfile::tempdir().expect("tempdir");
        let text = dir.path().join("notes.txt");
        fs::write(&text, "").expect("write");

        assert!(matches!(
            resolve_targets(&dir.path().join("missing.md"), &["md"], true),
            Err(TargetError::NotFound(_))
        ));
        assert!(matches!(
            resolve_targets(&text, &["md"], true),
            Err(TargetError::WrongType { .. })
        ));
        assert!(matches!(
            resolve_targets(dir.path(), &["java"], false),
            Err(TargetError::NotAFile(_))
        ));
    }
}
