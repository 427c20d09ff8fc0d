mod s3;

use s3::{Credentials, LogUploader, UploadOutcome};
use tracing_subscriber::EnvFilter;

#[::tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Credentials come from the environment; endpoint, bucket and file are
    // placeholder values a deployment overrides the same way. Missing or bad
    // credentials only surface at upload time as an auth failure.
    let credentials = Credentials {
        access_key_id: std::env::var("AWS_ACCESS_KEY_ID").unwrap_or_default(),
        secret_access_key: std::env::var("AWS_SECRET_ACCESS_KEY").unwrap_or_default(),
        endpoint_url: std::env::var("LOGDUMP_ENDPOINT")
            .unwrap_or_else(|_| "https://your-endpoint-url".to_string()),
    };
    let bucket =
        std::env::var("LOGDUMP_BUCKET").unwrap_or_else(|_| "your-bucket-name".to_string());
    let log_path =
        std::env::var("LOGDUMP_FILE").unwrap_or_else(|_| "path_to_your_log_file.log".to_string());

    let uploader = LogUploader::new(credentials, bucket);
    match uploader.upload_log(&log_path).await {
        UploadOutcome::Success { key } => tracing::debug!(%key, "run complete"),
        UploadOutcome::Failure { key, error } => {
            tracing::debug!(%key, %error, "run complete with failure");
        }
    }
}
