use async_compression::tokio::bufread::GzipEncoder;
use bytes::Bytes;
use tokio::io::AsyncReadExt;

use super::error::UploadError;

const CHUNK_SIZE: usize = 64 * 1024;

/// Gzip-compresses `data` at the default level into a standard gzip
/// container.
///
/// The encoder is drained in fixed-size chunks with a yield between chunks,
/// so compressing a large file does not monopolize the executor thread.
pub async fn gzip(data: &[u8]) -> Result<Bytes, UploadError> {
    let mut encoder = GzipEncoder::new(data);
    let mut compressed = Vec::with_capacity(data.len() / 2 + 64);
    let mut chunk = [0u8; CHUNK_SIZE];
    loop {
        let n = encoder
            .read(&mut chunk)
            .await
            .map_err(UploadError::Compression)?;
        if n == 0 {
            break;
        }
        compressed.extend_from_slice(&chunk[..n]);
        tokio::task::yield_now().await;
    }
    Ok(Bytes::from(compressed))
}
