// Sequential directory scanner with extension filter and path exclusions
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Directories that are never worth scanning.
const DEFAULT_EXCLUDES: &[&str] = &["node_modules", ".git", "dist", "build", "coverage"];

pub struct SourceFile {
    pub path: PathBuf,
    pub content: String,
}

pub struct SourceScanner {
    root: PathBuf,
    extensions: Vec<String>,
    excludes: Vec<String>,
}

impl SourceScanner {
    pub fn new(root: impl Into<PathBuf>, extensions: &[&str]) -> Self {
        Self {
            root: root.into(),
            extensions: extensions.iter().map(|e| e.to_string()).collect(),
            excludes: DEFAULT_EXCLUDES.iter().map(|e| e.to_string()).collect(),
        }
    }

    /// Add path substrings to exclude on top of the defaults.
    pub fn with_excludes(mut self, extra: &[&str]) -> Self {
        self.excludes.extend(extra.iter().map(|e| e.to_string()));
        self
    }

    /// Walk the tree and read every matching file. Unreadable or non-UTF-8
    /// files are logged and skipped; no partial entry is produced for them.
    pub fn scan(&self) -> Vec<SourceFile> {
        let mut files = Vec::new();

        for entry in WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if self.is_excluded(path) || !self.matches_extension(path) {
                continue;
            }

            match fs::read_to_string(path) {
                Ok(content) => {
                    debug!("Scanned: {}", path.display());
                    files.push(SourceFile {
                        path: path.to_path_buf(),
                        content,
                    });
                }
                Err(e) => {
                    warn!("Skipping {}: {}", path.display(), e);
                }
            }
        }

        files
    }

    fn is_excluded(&self, path: &Path) -> bool {
        let text = path.to_string_lossy();
        self.excludes.iter().any(|ex| text.contains(ex.as_str()))
    }

    fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| self.extensions.iter().any(|want| want == ext))
            .unwrap_or(false)
    }
}
