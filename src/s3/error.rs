use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::operation::put_object::PutObjectError;

/// Everything that can go wrong between opening the source file and the
/// put-object response. All variants are absorbed into an upload outcome at
/// the pipeline boundary; none escape the uploader.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// Source file missing, unreadable, or the read itself failed.
    #[error("failed to read source file: {0}")]
    SourceRead(#[source] std::io::Error),

    /// The gzip encoder failed. Fatal to the operation, no partial output.
    #[error("gzip compression failed: {0}")]
    Compression(#[source] std::io::Error),

    /// Network-level failure reaching the storage endpoint.
    #[error("could not reach storage endpoint: {0}")]
    Transport(String),

    /// The service rejected the credentials or the request signature.
    #[error("storage service rejected the credentials: {0}")]
    Auth(String),

    /// Any other non-success response from the storage service.
    #[error("storage service error: {0}")]
    Service(String),
}

/// Service error codes that mean the credentials, not the request, were
/// rejected.
fn is_auth_code(code: &str) -> bool {
    matches!(
        code,
        "AccessDenied"
            | "InvalidAccessKeyId"
            | "SignatureDoesNotMatch"
            | "ExpiredToken"
            | "TokenRefreshRequired"
    )
}

impl UploadError {
    /// Sorts a put-object SDK error into the transport/auth/service buckets.
    pub(crate) fn from_put_object(err: SdkError<PutObjectError>) -> Self {
        let detail = DisplayErrorContext(&err).to_string();
        match &err {
            SdkError::DispatchFailure(_)
            | SdkError::TimeoutError(_)
            | SdkError::ResponseError(_) => Self::Transport(detail),
            SdkError::ServiceError(ctx) => match ctx.err().code() {
                Some(code) if is_auth_code(code) => Self::Auth(detail),
                _ => Self::Service(detail),
            },
            _ => Self::Service(detail),
        }
    }
}
