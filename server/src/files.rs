//! Persistence for uploaded image attachments.
//!
//! Files land in a single upload directory as `<nanos>_<name>`, where `nanos`
//! is the UTC time of the save and `name` is the client's filename with any
//! path components stripped. The returned reference is the path of the saved
//! file, relative to wherever the upload directory was configured.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

const FALLBACK_NAME: &str = "upload.bin";

/// A file received in a multipart request, fully buffered.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[async_trait]
pub trait FileSink: Send + Sync {
    /// Persist `content` and return a reference to the stored file.
    async fn save(&self, original_name: &str, content: &[u8]) -> io::Result<String>;
}

/// Writes uploads into a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct DiskSink {
    dir: PathBuf,
}

impl DiskSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn ensure_dir(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await
    }
}

#[async_trait]
impl FileSink for DiskSink {
    async fn save(&self, original_name: &str, content: &[u8]) -> io::Result<String> {
        let name = sanitize_file_name(original_name);
        let mut stamp = Utc::now().timestamp_nanos_opt().unwrap_or_default();
        // create_new fails on an existing name; bump the stamp until it is free
        loop {
            let path = self.dir.join(format!("{stamp}_{name}"));
            match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(mut file) => {
                    file.write_all(content).await?;
                    file.flush().await?;
                    tracing::debug!(path = %path.display(), size = content.len(), "upload saved");
                    return Ok(path.to_string_lossy().into_owned());
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => stamp += 1,
                Err(e) => return Err(e),
            }
        }
    }
}

/// Save `uploads` in order and return their references in the same order.
///
/// Stops at the first failure. Files saved earlier in the batch stay on disk.
pub async fn save_all(sink: &dyn FileSink, uploads: &[Upload]) -> io::Result<Vec<String>> {
    let mut refs = Vec::with_capacity(uploads.len());
    for upload in uploads {
        match sink.save(&upload.file_name, &upload.bytes).await {
            Ok(reference) => refs.push(reference),
            Err(e) => {
                if !refs.is_empty() {
                    tracing::warn!(saved = ?refs, "upload batch failed after partial save");
                }
                return Err(e);
            }
        }
    }
    Ok(refs)
}

/// Keep only the final path component of a client-supplied filename, with
/// `..` sequences and NUL bytes removed; an empty result becomes `upload.bin`.
fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned = base.replace("..", "").replace('\0', "").trim().to_string();
    if cleaned.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        cleaned
    }
}
