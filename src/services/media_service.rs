use bytes::Bytes;
use chrono::Utc;
use std::path::PathBuf;
use tokio::fs;

use crate::error::{Error, Result};

/// 2 MiB cap on decoded resume payloads.
const MAX_FILE_SIZE: usize = 2 * 1024 * 1024;

const PDF_MAGIC: &[u8] = b"%PDF";

/// Disk-backed resume store. Objects live flat under the configured root,
/// keyed by an upload-time prefix plus the original filename.
#[derive(Clone)]
pub struct MediaService {
    root: PathBuf,
}

impl MediaService {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn max_file_size(&self) -> usize {
        MAX_FILE_SIZE
    }

    /// Only the decoded bytes decide the type; extension and declared MIME
    /// are ignored.
    pub fn is_pdf(data: &[u8]) -> bool {
        data.starts_with(PDF_MAGIC)
    }

    /// Timestamp prefix avoids collisions between uploads sharing a name;
    /// there is no further collision detection.
    pub fn build_object_key(file_name: &str) -> String {
        let safe = file_name.replace(['/', '\\'], "_");
        format!("{}_{}", Utc::now().timestamp_millis(), safe)
    }

    pub async fn put_object(&self, key: &str, data: &Bytes) -> Result<()> {
        fs::create_dir_all(&self.root).await?;
        fs::write(self.root.join(key), data).await.map_err(|e| {
            tracing::error!(error = %e, key, "failed to write resume object");
            Error::Internal(format!("Failed to save file: {}", e))
        })
    }

    pub async fn get_object(&self, key: &str) -> Result<Vec<u8>> {
        Ok(fs::read(self.root.join(key)).await?)
    }

    pub async fn delete_object(&self, key: &str) -> Result<()> {
        fs::remove_file(self.root.join(key)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniffs_pdf_by_content() {
        assert!(MediaService::is_pdf(b"%PDF-1.7 rest of file"));
        assert!(!MediaService::is_pdf(b"MZ binary renamed to .pdf"));
        assert!(!MediaService::is_pdf(b""));
    }

    #[test]
    fn object_keys_keep_the_filename_and_strip_separators() {
        let key = MediaService::build_object_key("../etc/passwd.pdf");
        assert!(key.ends_with("_.._etc_passwd.pdf"));
        assert!(!key.contains('/'));
    }
}
