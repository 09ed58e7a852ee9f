//! File-backed secret provider
//!
//! Reads a flat `NAME=VALUE` secrets file once at construction and
//! resolves `file:<key>` references against it.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::error::{ProviderError, ProviderResult};
use super::substitute::substitute;
use super::traits::Provider;
use crate::secrets::{parse_secrets, SecretMapping};
use crate::types::CancellationToken;

/// Marker for references resolved by the file provider
pub const FILE_MARKER: &str = "file";

/// Provider backed by a local secrets file
///
/// The file is read and parsed eagerly; a provider value always holds a
/// complete mapping. Malformed lines fail construction instead of being
/// skipped.
///
/// # Example
///
/// ```no_run
/// use std::collections::HashMap;
/// use secret_init_core::{CancellationToken, FileProvider, Provider};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let provider = FileProvider::new("/run/secrets/app.env")?;
///
/// let mut environ = HashMap::new();
/// environ.insert("MYSQL_PASSWORD".to_string(), "file:".to_string());
///
/// let entries = provider.load_secrets(&CancellationToken::new(), &environ).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FileProvider {
    path: PathBuf,
    mapping: SecretMapping,
}

impl FileProvider {
    /// Read and parse the secrets file at `path`
    pub fn new(path: impl AsRef<Path>) -> ProviderResult<Self> {
        let path = path.as_ref();
        let contents =
            fs::read_to_string(path).map_err(|e| ProviderError::file_access(path, e))?;
        Self::parse(path, &contents)
    }

    /// Build a provider from contents already read from `path`
    pub fn parse(path: impl Into<PathBuf>, contents: &str) -> ProviderResult<Self> {
        let path = path.into();
        let mapping = parse_secrets(contents).map_err(|e| ProviderError::Parse {
            path: path.clone(),
            line: e.line,
            reason: e.reason,
        })?;
        Ok(Self::from_mapping(path, mapping))
    }

    /// Build a provider around an existing mapping
    pub fn from_mapping(path: impl Into<PathBuf>, mapping: SecretMapping) -> Self {
        Self {
            path: path.into(),
            mapping,
        }
    }

    /// Path of the secrets file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The loaded secrets
    pub fn mapping(&self) -> &SecretMapping {
        &self.mapping
    }
}

#[async_trait]
impl Provider for FileProvider {
    fn name(&self) -> &str {
        "file"
    }

    fn marker(&self) -> &str {
        FILE_MARKER
    }

    fn duplicates(&self) -> &[String] {
        self.mapping.duplicates()
    }

    async fn load_secrets(
        &self,
        cancel: &CancellationToken,
        environ: &HashMap<String, String>,
    ) -> ProviderResult<Vec<String>> {
        if cancel.is_cancelled() {
            return Err(ProviderError::Cancelled);
        }
        substitute(FILE_MARKER, &self.mapping, environ)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::snapshot_from_pairs;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn secrets_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_new_reads_file() {
        let file = secrets_file("A=1\nB=2\n");
        let provider = FileProvider::new(file.path()).unwrap();

        assert_eq!(provider.path(), file.path());
        assert_eq!(provider.mapping().len(), 2);
        assert_eq!(provider.name(), "file");
        assert_eq!(provider.marker(), "file");
    }

    #[test]
    fn test_new_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.env");

        let err = FileProvider::new(&path).unwrap_err();
        match err {
            ProviderError::FileAccess { path: p, source } => {
                assert_eq!(p, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_new_directory_is_access_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            FileProvider::new(dir.path()),
            Err(ProviderError::FileAccess { .. })
        ));
    }

    #[test]
    fn test_new_malformed_file() {
        let file = secrets_file("A=1\nBROKEN\n");

        let err = FileProvider::new(file.path()).unwrap_err();
        match err {
            ProviderError::Parse { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_duplicates_visible_through_trait() {
        let file = secrets_file("A=1\nB=2\nA=3\n");
        let provider: std::sync::Arc<dyn Provider> =
            std::sync::Arc::new(FileProvider::new(file.path()).unwrap());

        assert_eq!(provider.duplicates(), &["A".to_string()]);
    }

    #[tokio::test]
    async fn test_load_secrets_cancelled() {
        let provider = FileProvider::parse("inline", "A=1").unwrap();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let environ = snapshot_from_pairs(vec![("A", "file:")]);
        assert!(matches!(
            provider.load_secrets(&cancel, &environ).await,
            Err(ProviderError::Cancelled)
        ));
    }

    #[tokio::test]
    async fn test_load_secrets_does_not_touch_input() {
        let provider = FileProvider::parse("inline", "A=1").unwrap();
        let environ = snapshot_from_pairs(vec![("A", "file:")]);

        let entries = provider
            .load_secrets(&CancellationToken::new(), &environ)
            .await
            .unwrap();

        assert_eq!(entries, vec!["A=1"]);
        assert_eq!(environ["A"], "file:");
    }
}
