//! Document Loading
//!
//! Reads a file from disk and turns it into an immutable [`Document`]
//! snapshot that rules can inspect.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;

/// Directory a marketplace manifest conventionally lives in
const MANIFEST_DIR: &str = ".claude-plugin";

/// The declared type of a document, which selects its rule set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// Marketplace manifest (JSON)
    Manifest,
    /// Java recipe class
    JavaRecipe,
    /// Any Java source checked for language-level compatibility
    JavaSource,
    /// Declarative YAML recipe
    YamlRecipe,
    /// Markdown documentation
    Markdown,
}

impl DocumentKind {
    /// Guess the kind from a file extension.
    ///
    /// `.java` maps to [`DocumentKind::JavaRecipe`]; compatibility checks
    /// ask for [`DocumentKind::JavaSource`] explicitly.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(Self::Manifest),
            "java" => Some(Self::JavaRecipe),
            "yml" | "yaml" => Some(Self::YamlRecipe),
            "md" => Some(Self::Markdown),
            _ => None,
        }
    }

    /// File extensions accepted for this kind
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Manifest => &["json"],
            Self::JavaRecipe | Self::JavaSource => &["java"],
            Self::YamlRecipe => &["yml", "yaml"],
            Self::Markdown => &["md"],
        }
    }

    pub fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions().contains(&ext))
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Manifest => "manifest",
            Self::JavaRecipe => "java recipe",
            Self::JavaSource => "java source",
            Self::YamlRecipe => "yaml recipe",
            Self::Markdown => "markdown",
        };
        f.write_str(name)
    }
}

/// Why a document could not be loaded. Fatal to its validation run.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("File not found")]
    NotFound,

    #[error("Cannot read file: {0}")]
    Unreadable(#[from] io::Error),

    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Manifest root must be a JSON object")]
    NotAnObject,

    #[error("Unsupported file type for {kind}: expected .{expected}")]
    UnsupportedFile {
        kind: DocumentKind,
        expected: String,
    },
}

/// Parsed document body
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Json(Map<String, Value>),
    Text(String),
}

/// An immutable snapshot of a loaded document
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub path: PathBuf,
    pub kind: DocumentKind,
    /// Directory that relative paths inside the document resolve against
    pub base_dir: PathBuf,
    pub content: Content,
}

impl Document {
    /// Load `path`, resolving relative references against `base_dir` when
    /// given instead of the default for the kind
    pub fn load_with_base(
        path: &Path,
        kind: DocumentKind,
        base_dir: Option<&Path>,
    ) -> Result<Self, LoadError> {
        if !path.exists() {
            return Err(LoadError::NotFound);
        }
        if !kind.accepts(path) {
            return Err(LoadError::UnsupportedFile {
                kind,
                expected: kind.extensions().join(", ."),
            });
        }

        let text = fs::read_to_string(path)?;
        let content = match kind {
            DocumentKind::Manifest => match serde_json::from_str::<Value>(&text)? {
                Value::Object(map) => Content::Json(map),
                _ => return Err(LoadError::NotAnObject),
            },
            _ => Content::Text(text),
        };

        let base_dir = match base_dir {
            Some(dir) => dir.to_path_buf(),
            None => default_base_dir(path, kind),
        };

        log::debug!("Loaded {} document {}", kind, path.display());

        Ok(Self {
            path: path.to_path_buf(),
            kind,
            base_dir,
            content,
        })
    }

    /// Build a document from in-memory text (useful for testing)
    pub fn from_text(path: impl Into<PathBuf>, kind: DocumentKind, text: &str) -> Self {
        let path = path.into();
        let base_dir = default_base_dir(&path, kind);
        Self {
            path,
            kind,
            base_dir,
            content: Content::Text(text.to_string()),
        }
    }

    /// Build a manifest document from an already-parsed JSON object
    pub fn from_json(path: impl Into<PathBuf>, base_dir: impl Into<PathBuf>, map: Map<String, Value>) -> Self {
        Self {
            path: path.into(),
            kind: DocumentKind::Manifest,
            base_dir: base_dir.into(),
            content: Content::Json(map),
        }
    }

    pub fn text(&self) -> Option<&str> {
        match &self.content {
            Content::Text(text) => Some(text),
            Content::Json(_) => None,
        }
    }

    pub fn json(&self) -> Option<&Map<String, Value>> {
        match &self.content {
            Content::Json(map) => Some(map),
            Content::Text(_) => None,
        }
    }

    /// Path as shown in diagnostics
    pub fn display_path(&self) -> String {
        self.path.display().to_string()
    }

    /// The document's file name, if any
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|name| name.to_str())
    }
}

/// Manifests inside `.claude-plugin/` resolve against the repository root,
/// everything else against its own directory.
fn default_base_dir(path: &Path, kind: DocumentKind) -> PathBuf {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    if kind == DocumentKind::Manifest && parent.file_name().is_some_and(|name| name == MANIFEST_DIR) {
        return parent
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf();
    }

    parent.to_path_buf()
}
