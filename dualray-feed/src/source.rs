//! Snapshot sources
//!
//! A source hands the feed the raw text of a snapshot document once, at
//! start-up. The feed parses it with the core loader, so a source never
//! looks inside the text.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::errors::FeedError;

/// Where the initial snapshot comes from
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Fetch the whole snapshot document
    async fn fetch(&self) -> Result<String, FeedError>;

    /// Short description for logs
    fn describe(&self) -> String;
}

/// Snapshot read from a local file
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Source reading `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File this source reads
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SnapshotSource for FileSource {
    async fn fetch(&self) -> Result<String, FeedError> {
        Ok(tokio::fs::read_to_string(&self.path).await?)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

/// Snapshot held in memory
///
/// Used for bundled data and tests.
#[derive(Debug, Clone)]
pub struct StaticSource {
    text: String,
}

impl StaticSource {
    /// Source that always returns `text`
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait]
impl SnapshotSource for StaticSource {
    async fn fetch(&self) -> Result<String, FeedError> {
        Ok(self.text.clone())
    }

    fn describe(&self) -> String {
        format!("static snapshot ({} bytes)", self.text.len())
    }
}

#[async_trait]
impl<S: SnapshotSource + ?Sized> SnapshotSource for Box<S> {
    async fn fetch(&self) -> Result<String, FeedError> {
        (**self).fetch().await
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_source_returns_text() {
        let source = StaticSource::new("header\n");
        assert_eq!(source.fetch().await.unwrap(), "header\n");
        assert_eq!(source.describe(), "static snapshot (7 bytes)");
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let source = FileSource::new("/nonexistent/dualray/snapshot.csv");
        assert!(matches!(source.fetch().await, Err(FeedError::Io(_))));
        assert!(source.describe().contains("snapshot.csv"));
    }

    #[tokio::test]
    async fn boxed_source_delegates() {
        let source: Box<dyn SnapshotSource> = Box::new(StaticSource::new("x"));
        assert_eq!(source.fetch().await.unwrap(), "x");
    }
}
