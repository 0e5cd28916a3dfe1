//! Implements FileSource. Local paths go through tokio::fs, `s3://` locations
//! through object_store (credentials and region from the usual AWS_* env vars).

use crate::domain::{DomainError, SourceLocation};
use crate::ports::FileSource;
use async_trait::async_trait;
use object_store::aws::AmazonS3Builder;
use object_store::path::Path as ObjectPath;
use object_store::ObjectStore;
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// Reads roster and prompt files. Stateless; a store client is built per object read.
#[derive(Debug, Default, Clone)]
pub struct SourceReader;

impl SourceReader {
    pub fn new() -> Self {
        Self
    }

    async fn read_local(path: &Path) -> Result<String, DomainError> {
        match fs::read_to_string(path).await {
            Ok(s) => Ok(s),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(DomainError::NotFound(format!(
                "file not found: {}",
                path.display()
            ))),
            Err(e) => Err(DomainError::Source(format!(
                "error reading {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn read_object(bucket: &str, key: &str) -> Result<String, DomainError> {
        let store = AmazonS3Builder::from_env()
            .with_bucket_name(bucket)
            .build()
            .map_err(|e| DomainError::Source(format!("object store setup failed: {}", e)))?;
        let location = ObjectPath::from(key);

        let bytes = match store.get(&location).await {
            Ok(result) => result.bytes().await.map_err(|e| map_store_error(bucket, key, e))?,
            Err(e) => return Err(map_store_error(bucket, key, e)),
        };

        String::from_utf8(bytes.to_vec()).map_err(|e| {
            DomainError::Source(format!("s3://{}/{} is not valid UTF-8: {}", bucket, key, e))
        })
    }
}

fn map_store_error(bucket: &str, key: &str, e: object_store::Error) -> DomainError {
    match e {
        object_store::Error::NotFound { .. } => {
            DomainError::NotFound(format!("object not found: s3://{}/{}", bucket, key))
        }
        other => DomainError::Source(format!("error reading s3://{}/{}: {}", bucket, key, other)),
    }
}

#[async_trait]
impl FileSource for SourceReader {
    async fn read_text(&self, location: &SourceLocation) -> Result<String, DomainError> {
        let raw = match location {
            SourceLocation::Local(path) => Self::read_local(path).await?,
            SourceLocation::ObjectStore { bucket, key } => Self::read_object(bucket, key).await?,
        };
        debug!(source = %location, bytes = raw.len(), "read text source");
        Ok(raw.trim().to_string())
    }
}
