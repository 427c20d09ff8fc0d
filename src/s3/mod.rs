//! Single-shot upload of a local log file to S3-compatible object storage.
//!
//! The pipeline is read -> gzip -> put-object under a date-partitioned key
//! (`logs/<YYYY>/<MM>/<DD>/<basename>.gz`). One upload per call, no retries;
//! every failure is absorbed into an [`UploadOutcome`] instead of crashing
//! the caller.

mod compress;
mod error;
mod key;
mod store;
mod uploader;

pub use error::UploadError;
pub use store::Credentials;
pub use uploader::{LogUploader, UploadOutcome};
