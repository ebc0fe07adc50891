//! Source-tree walker with pattern-based filtering.
//!
//! Enumerates the document files under an ingestion root using
//! glob include/exclude patterns and a file-size ceiling.
//! Discovery failures are fatal: an artifact built from a
//! partially enumerated tree would silently miss documents, so
//! any walk error aborts the run.

use glob::Pattern;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::core::error::{IngestError, Result};

/// Recursive document enumerator
pub struct SourceWalker {
    /// Patterns a file must match to be ingested (e.g. "*.md")
    include_patterns: Vec<Pattern>,

    /// Patterns that exclude files or whole directories
    exclude_patterns: Vec<Pattern>,

    /// Files larger than this are skipped
    max_file_size_bytes: u64,
}

impl SourceWalker {
    /// Create a walker from glob pattern strings.
    ///
    /// Fails with a configuration error if any pattern does not
    /// parse.
    pub fn new(
        include_patterns: Vec<String>,
        exclude_patterns: Vec<String>,
        max_file_size_mb: usize,
    ) -> Result<Self> {
        Ok(Self {
            include_patterns: parse_patterns(include_patterns, "include")?,
            exclude_patterns: parse_patterns(exclude_patterns, "exclude")?,
            max_file_size_bytes: (max_file_size_mb as u64) * 1024 * 1024,
        })
    }

    /// Collect all matching files under `root`, sorted by path.
    ///
    /// Sorting makes enumeration order (and therefore record
    /// order in the artifact) independent of filesystem
    /// iteration order.
    pub fn collect_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| self.should_descend(e, root))
        {
            let entry = entry.map_err(|e| {
                IngestError::Discovery(format!("failed to walk source tree: {e}"))
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();

            if let Ok(metadata) = entry.metadata() {
                if metadata.len() > self.max_file_size_bytes {
                    tracing::debug!("Skipping large file: {:?} ({} bytes)", path, metadata.len());
                    continue;
                }
            }

            if self.matches_patterns(path) {
                files.push(path.to_path_buf());
            }
        }

        files.sort();
        Ok(files)
    }

    /// Decide whether to descend into a directory entry.
    ///
    /// Hidden directories and excluded directory trees are
    /// pruned early; the root itself is never filtered.
    fn should_descend(&self, entry: &DirEntry, root: &Path) -> bool {
        let path = entry.path();

        if path == root {
            return true;
        }

        if entry.file_type().is_dir() {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                if name.starts_with('.') {
                    return false;
                }
            }

            if self.exclude_patterns.iter().any(|p| p.matches_path(path)) {
                tracing::debug!("Skipping excluded directory: {:?}", path);
                return false;
            }
        }

        true
    }

    /// Check a file path against include then exclude patterns.
    ///
    /// Include patterns match against the full path or the bare
    /// file name, so "*.md" works without a "**/" prefix.
    fn matches_patterns(&self, path: &Path) -> bool {
        let Some(path_str) = path.to_str() else {
            return false;
        };
        let file_name = path.file_name().and_then(|f| f.to_str());

        let included = self.include_patterns.is_empty()
            || self.include_patterns.iter().any(|p| {
                p.matches(path_str) || file_name.map(|f| p.matches(f)).unwrap_or(false)
            });

        included && !self.exclude_patterns.iter().any(|p| p.matches(path_str))
    }
}

fn parse_patterns(patterns: Vec<String>, kind: &str) -> Result<Vec<Pattern>> {
    patterns
        .into_iter()
        .map(|p| {
            Pattern::new(&p)
                .map_err(|e| IngestError::Config(format!("Invalid {kind} pattern '{p}': {e}")))
        })
        .collect()
}
