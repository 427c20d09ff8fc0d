use std::path::Path;

use chrono::Local;

use super::compress;
use super::error::UploadError;
use super::key::derive_object_key;
use super::store::{Connect, Credentials, ObjectClient, S3Connector};

/// Terminal result of one upload attempt. Failures are absorbed here; the
/// caller never sees a panic or an error return for a failed upload.
#[derive(Debug)]
pub enum UploadOutcome {
    Success { key: String },
    Failure { key: String, error: UploadError },
}

/// Uploads one local log file per call: read, gzip, put-object under a
/// date-partitioned key.
pub struct LogUploader<C: Connect = S3Connector> {
    connector: C,
    bucket: String,
}

impl LogUploader {
    pub fn new(credentials: Credentials, bucket: impl Into<String>) -> Self {
        Self::with_connector(S3Connector::new(credentials), bucket)
    }
}

impl<C: Connect> LogUploader<C> {
    pub fn with_connector(connector: C, bucket: impl Into<String>) -> Self {
        Self {
            connector,
            bucket: bucket.into(),
        }
    }

    /// Runs the full pipeline for `path` and reports the outcome. The object
    /// key is derived from today's wall-clock date, so re-uploading the same
    /// file on the same day overwrites the earlier object.
    pub async fn upload_log(&self, path: impl AsRef<Path>) -> UploadOutcome {
        let path = path.as_ref();
        let key = derive_object_key(path, Local::now().date_naive());
        match self.run_pipeline(path, &key).await {
            Ok(()) => {
                tracing::info!(%key, bucket = %self.bucket, "log uploaded");
                UploadOutcome::Success { key }
            }
            Err(error) => {
                tracing::error!(%key, bucket = %self.bucket, %error, "failed to upload log");
                UploadOutcome::Failure { key, error }
            }
        }
    }

    async fn run_pipeline(&self, path: &Path, key: &str) -> Result<(), UploadError> {
        // The session is scoped to this call; dropping it on any exit path,
        // including cancellation, releases the connection.
        let session = self.connector.connect().await?;
        let raw = tokio::fs::read(path)
            .await
            .map_err(UploadError::SourceRead)?;
        let body = compress::gzip(&raw).await?;
        session.put_object(&self.bucket, key, body, "gzip").await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use bytes::Bytes;

    use super::*;

    #[derive(Debug)]
    struct PutCall {
        bucket: String,
        key: String,
        body: Bytes,
        content_encoding: String,
    }

    #[derive(Default)]
    struct MockStore {
        puts: Mutex<Vec<PutCall>>,
        open_sessions: AtomicUsize,
        deny: bool,
    }

    struct MockConnector {
        store: Arc<MockStore>,
    }

    struct MockSession {
        store: Arc<MockStore>,
    }

    impl Drop for MockSession {
        fn drop(&mut self) {
            self.store.open_sessions.fetch_sub(1, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl Connect for MockConnector {
        type Client = MockSession;

        async fn connect(&self) -> Result<MockSession, UploadError> {
            self.store.open_sessions.fetch_add(1, Ordering::SeqCst);
            Ok(MockSession {
                store: Arc::clone(&self.store),
            })
        }
    }

    #[async_trait]
    impl ObjectClient for MockSession {
        async fn put_object(
            &self,
            bucket: &str,
            key: &str,
            body: Bytes,
            content_encoding: &str,
        ) -> Result<(), UploadError> {
            if self.store.deny {
                return Err(UploadError::Service(
                    "Access Denied: the service rejected the request".to_string(),
                ));
            }
            self.store.puts.lock().unwrap().push(PutCall {
                bucket: bucket.to_string(),
                key: key.to_string(),
                body,
                content_encoding: content_encoding.to_string(),
            });
            Ok(())
        }
    }

    fn uploader_with(store: Arc<MockStore>) -> LogUploader<MockConnector> {
        LogUploader::with_connector(MockConnector { store }, "test-bucket")
    }

    fn assert_date_partitioned(key: &str, basename: &str) {
        let parts: Vec<&str> = key.split('/').collect();
        assert_eq!(parts.len(), 5, "unexpected key shape: {key}");
        assert_eq!(parts[0], "logs");
        for (segment, width) in [(parts[1], 4), (parts[2], 2), (parts[3], 2)] {
            assert_eq!(segment.len(), width, "bad date segment in {key}");
            assert!(segment.bytes().all(|b| b.is_ascii_digit()));
        }
        assert_eq!(parts[4], format!("{basename}.gz"));
    }

    #[tokio::test]
    async fn missing_source_file_fails_without_put() {
        let store = Arc::new(MockStore::default());
        let outcome = uploader_with(store.clone())
            .upload_log("/nonexistent/access.log")
            .await;

        match outcome {
            UploadOutcome::Failure {
                error: UploadError::SourceRead(_),
                ..
            } => {}
            other => panic!("expected source-read failure, got {other:?}"),
        }
        assert!(store.puts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn uploads_compressed_file_exactly_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("access.log");
        std::fs::write(&path, b"hello world").unwrap();

        let store = Arc::new(MockStore::default());
        let outcome = uploader_with(store.clone()).upload_log(&path).await;

        let key = match outcome {
            UploadOutcome::Success { key } => key,
            UploadOutcome::Failure { key, error } => panic!("upload of {key} failed: {error}"),
        };
        assert_date_partitioned(&key, "access.log");

        let expected_body = compress::gzip(b"hello world").await.unwrap();
        let puts = store.puts.lock().unwrap();
        assert_eq!(puts.len(), 1);
        assert_eq!(puts[0].bucket, "test-bucket");
        assert_eq!(puts[0].key, key);
        assert_eq!(puts[0].body, expected_body);
        assert_eq!(puts[0].content_encoding, "gzip");
    }

    #[tokio::test]
    async fn service_denial_reports_failure_and_releases_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("access.log");
        std::fs::write(&path, b"hello world").unwrap();

        let store = Arc::new(MockStore {
            deny: true,
            ..MockStore::default()
        });
        let outcome = uploader_with(store.clone()).upload_log(&path).await;

        match outcome {
            UploadOutcome::Failure { key, error } => {
                assert_date_partitioned(&key, "access.log");
                assert!(error.to_string().contains("Access Denied"));
            }
            UploadOutcome::Success { key } => panic!("denied upload reported success for {key}"),
        }
        assert_eq!(store.open_sessions.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn repeat_upload_same_day_hits_same_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        std::fs::write(&path, b"line one\n").unwrap();

        let store = Arc::new(MockStore::default());
        let uploader = uploader_with(store.clone());
        uploader.upload_log(&path).await;
        uploader.upload_log(&path).await;

        let puts = store.puts.lock().unwrap();
        assert_eq!(puts.len(), 2);
        assert_eq!(puts[0].key, puts[1].key);
    }
}
