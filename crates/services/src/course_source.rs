use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use crate::error::SourceError;

/// Where the manifest and course data files are read from.
#[async_trait]
pub trait CourseSource: Send + Sync {
    /// Human-readable location, for logs.
    fn describe(&self) -> String;

    /// Read the file at `path`, relative to the source root.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::NotFound` for a missing file, other variants for
    /// transport failures.
    async fn read(&self, path: &str) -> Result<Vec<u8>, SourceError>;
}

/// Course files on local disk under one root directory.
#[derive(Clone, Debug)]
pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, SourceError> {
        let relative = Path::new(path);
        // Data files may only point below the root.
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if path.trim().is_empty() || escapes {
            return Err(SourceError::InvalidPath(path.to_owned()));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl CourseSource for FileSource {
    fn describe(&self) -> String {
        self.root.display().to_string()
    }

    async fn read(&self, path: &str) -> Result<Vec<u8>, SourceError> {
        let full = self.resolve(path)?;
        match tokio::fs::read(&full).await {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(SourceError::NotFound(path.to_owned()))
            }
            Err(err) => Err(SourceError::Io {
                path: path.to_owned(),
                reason: err.to_string(),
            }),
        }
    }
}

/// Course files served over HTTP(S) below a base URL.
#[derive(Clone, Debug)]
pub struct HttpSource {
    client: Client,
    base: Url,
}

impl HttpSource {
    /// `base` is treated as a directory even without a trailing slash.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::InvalidPath` if `base` is not an absolute URL.
    pub fn new(base: &str) -> Result<Self, SourceError> {
        let mut normalized = base.trim().to_owned();
        if !normalized.ends_with('/') {
            normalized.push('/');
        }
        let base =
            Url::parse(&normalized).map_err(|_| SourceError::InvalidPath(base.to_owned()))?;
        Ok(Self {
            client: Client::new(),
            base,
        })
    }
}

#[async_trait]
impl CourseSource for HttpSource {
    fn describe(&self) -> String {
        self.base.to_string()
    }

    async fn read(&self, path: &str) -> Result<Vec<u8>, SourceError> {
        let url = self
            .base
            .join(path)
            .map_err(|_| SourceError::InvalidPath(path.to_owned()))?;
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(SourceError::NotFound(path.to_owned()));
        }
        if !status.is_success() {
            return Err(SourceError::HttpStatus {
                path: path.to_owned(),
                status,
            });
        }
        Ok(response.bytes().await?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn file_source_reads_below_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("data")).unwrap();
        std::fs::write(dir.path().join("data/courses.json"), b"{}").unwrap();

        let source = FileSource::new(dir.path());
        assert_eq!(source.read("data/courses.json").await.unwrap(), b"{}");
        assert!(matches!(
            source.read("data/missing.json").await,
            Err(SourceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn file_source_refuses_paths_outside_root() {
        let source = FileSource::new("/tmp/courses");
        assert!(matches!(
            source.read("../etc/passwd").await,
            Err(SourceError::InvalidPath(_))
        ));
        assert!(matches!(
            source.read("/etc/passwd").await,
            Err(SourceError::InvalidPath(_))
        ));
    }

    #[test]
    fn http_source_treats_base_as_directory() {
        let source = HttpSource::new("https://example.org/lms").unwrap();
        assert_eq!(source.describe(), "https://example.org/lms/");
        assert!(HttpSource::new("not a url").is_err());
    }
}
