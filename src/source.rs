//! Where raw source text comes from.
//!
//! Fetching the plugin sources is someone else's job; the pipeline only
//! needs a [`SourceProvider`] that can list a directory and read a file.
//! [`DirectoryProvider`] serves a local cache directory. Tests use the
//! generated `MockSourceProvider`.

use async_trait::async_trait;
use futures::future::try_join_all;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;

/// A file's name (relative to the directory it was listed from) and its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
    pub contents: String,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to list {path}: {source}")]
    List {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SourceError {
    pub fn path(&self) -> &Path {
        match self {
            SourceError::List { path, .. } | SourceError::Read { path, .. } => path,
        }
    }

    pub fn is_not_found(&self) -> bool {
        match self {
            SourceError::List { source, .. } | SourceError::Read { source, .. } => {
                source.kind() == std::io::ErrorKind::NotFound
            }
        }
    }
}

#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait SourceProvider: Send + Sync {
    /// Names of the regular files directly inside `dir`, in listing order.
    async fn list(&self, dir: &str) -> Result<Vec<String>, SourceError>;

    /// Full text of the file at `path`.
    async fn read(&self, path: &str) -> Result<String, SourceError>;
}

/// Serves files below `root` on the local filesystem.
#[derive(Debug, Clone)]
pub struct DirectoryProvider {
    root: PathBuf,
}

impl DirectoryProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl SourceProvider for DirectoryProvider {
    /// Sorted by name so repeated runs see the same order.
    async fn list(&self, dir: &str) -> Result<Vec<String>, SourceError> {
        let path = self.root.join(dir);
        let list_error = |source| SourceError::List {
            path: path.clone(),
            source,
        };

        let mut entries = tokio::fs::read_dir(&path).await.map_err(list_error)?;
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(list_error)? {
            let file_type = entry.file_type().await.map_err(list_error)?;
            if file_type.is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        debug!(path = %path.display(), count = names.len(), "Listed source directory");
        Ok(names)
    }

    async fn read(&self, path: &str) -> Result<String, SourceError> {
        let full_path = self.root.join(path);
        tokio::fs::read_to_string(&full_path)
            .await
            .map_err(|source| SourceError::Read {
                path: full_path,
                source,
            })
    }
}

/// Reads every file of `dir` concurrently; the batch resolves once all reads have.
pub async fn read_dir_batch(
    provider: &dyn SourceProvider,
    dir: &str,
) -> Result<Vec<SourceFile>, SourceError> {
    let names = provider.list(dir).await?;
    let reads = names.into_iter().map(|name| async move {
        let contents = provider.read(&join(dir, &name)).await?;
        Ok::<_, SourceError>(SourceFile { name, contents })
    });
    let files = try_join_all(reads).await?;
    info!(dir = dir, count = files.len(), "Read source batch");
    Ok(files)
}

pub async fn read_file(provider: &dyn SourceProvider, path: &str) -> Result<SourceFile, SourceError> {
    let contents = provider.read(path).await?;
    let name = path.rsplit('/').next().unwrap_or(path).to_string();
    Ok(SourceFile { name, contents })
}

fn join(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", dir.trim_end_matches('/'), name)
    }
}
