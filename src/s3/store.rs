use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::primitives::ByteStream;
use aws_types::region::Region;
use bytes::Bytes;

use super::error::UploadError;

/// Static credentials and endpoint for an S3-compatible service. Nothing is
/// validated up front; bad values surface as auth or transport errors at
/// upload time.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub endpoint_url: String,
}

/// A live client session. The only operation the uploader needs is a single
/// put-object; dropping the session releases its connection resources.
#[async_trait]
pub trait ObjectClient: Send + Sync {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_encoding: &str,
    ) -> Result<(), UploadError>;
}

/// Produces a fresh session per upload call. The seam exists so tests can
/// substitute an in-memory client for the real SDK.
#[async_trait]
pub trait Connect: Send + Sync {
    type Client: ObjectClient;

    async fn connect(&self) -> Result<Self::Client, UploadError>;
}

/// Connects to an S3-compatible endpoint with static credentials and
/// path-style addressing.
pub struct S3Connector {
    credentials: Credentials,
}

impl S3Connector {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }
}

#[async_trait]
impl Connect for S3Connector {
    type Client = S3Session;

    async fn connect(&self) -> Result<S3Session, UploadError> {
        let creds = aws_sdk_s3::config::Credentials::new(
            self.credentials.access_key_id.clone(),
            self.credentials.secret_access_key.clone(),
            None,
            None,
            "logdump",
        );
        // Custom endpoints accept any signing region; path-style keeps the
        // bucket out of the hostname for MinIO-style services.
        let config = aws_sdk_s3::config::Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .endpoint_url(&self.credentials.endpoint_url)
            .credentials_provider(creds)
            .force_path_style(true)
            .build();
        Ok(S3Session {
            client: aws_sdk_s3::Client::from_conf(config),
        })
    }
}

pub struct S3Session {
    client: aws_sdk_s3::Client,
}

#[async_trait]
impl ObjectClient for S3Session {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_encoding: &str,
    ) -> Result<(), UploadError> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(body))
            .content_encoding(content_encoding)
            .send()
            .await
            .map_err(UploadError::from_put_object)?;
        Ok(())
    }
}
