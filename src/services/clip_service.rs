//! ClipService — stores raw video clips for a phrase on local disk.
//!
//! Payloads land at `base_path/{phrase_id}/{clip_id}-{file_name}`. Each clip
//! is streamed to a temp file, fsynced, then renamed into place, so a failed
//! upload never leaves a partial clip behind. No transcoding happens here.

use crate::{
    errors::{ServiceError, ServiceResult},
    models::clip::Clip,
};
use bytes::Bytes;
use chrono::Utc;
use futures::{Stream, StreamExt, pin_mut};
use md5::Context;
use std::{
    io,
    path::{Path, PathBuf},
};
use tokio::{
    fs::{self, File},
    io::AsyncWriteExt,
};
use tracing::{debug, warn};
use uuid::Uuid;

const MAX_FILE_NAME_LEN: usize = 255;

#[derive(Clone, Debug)]
pub struct ClipService {
    /// Root directory for clip payloads.
    pub base_path: PathBuf,
}

impl ClipService {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Rejects empty names, path separators, `..` and control characters.
    fn ensure_name_safe(name: &str) -> ServiceResult<()> {
        let unsafe_name = name.is_empty()
            || name.len() > MAX_FILE_NAME_LEN
            || name.contains("..")
            || name
                .chars()
                .any(|c| c.is_control() || c == '/' || c == '\\');
        if unsafe_name {
            return Err(ServiceError::InvalidInput(format!(
                "`{name}` is not a usable file name."
            )));
        }
        Ok(())
    }

    fn clip_path(&self, phrase_id: &str, clip_id: Uuid, file_name: &str) -> PathBuf {
        let mut path = self.base_path.clone();
        path.push(phrase_id);
        path.push(format!("{clip_id}-{file_name}"));
        path
    }

    /// Stream one clip to disk. Only `video/*` content types are accepted.
    pub async fn store_clip<S>(
        &self,
        phrase_id: &str,
        file_name: &str,
        content_type: Option<&str>,
        stream: S,
    ) -> ServiceResult<Clip>
    where
        S: Stream<Item = io::Result<Bytes>>,
    {
        let content_type = content_type
            .filter(|ct| ct.starts_with("video/"))
            .ok_or_else(|| ServiceError::InvalidInput("Only video files are allowed.".into()))?;
        Self::ensure_name_safe(phrase_id)?;
        Self::ensure_name_safe(file_name)?;

        let clip_id = Uuid::new_v4();
        let file_path = self.clip_path(phrase_id, clip_id, file_name);
        let parent = file_path
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| ServiceError::Backend("clip path missing parent directory".into()))?;
        fs::create_dir_all(&parent).await.map_err(io_error)?;

        let tmp_path = parent.join(format!(".tmp-{}", Uuid::new_v4()));
        let result = write_payload(&tmp_path, stream).await;
        let (size_bytes, etag) = match result {
            Ok(written) => written,
            Err(err) => {
                let _ = fs::remove_file(&tmp_path).await;
                return Err(io_error(err));
            }
        };

        if let Err(err) = fs::rename(&tmp_path, &file_path).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(io_error(err));
        }
        debug!(path = %file_path.display(), size_bytes, "clip stored");

        Ok(Clip {
            id: clip_id,
            phrase_id: phrase_id.to_string(),
            file_name: file_name.to_string(),
            content_type: content_type.to_string(),
            size_bytes,
            etag,
            stored_at: Utc::now(),
        })
    }
}

/// Write the stream to `path`, returning byte count and hex MD5.
async fn write_payload<S>(path: &Path, stream: S) -> io::Result<(i64, String)>
where
    S: Stream<Item = io::Result<Bytes>>,
{
    let mut file = File::create(path).await?;
    let mut size_bytes: i64 = 0;
    let mut digest = Context::new();

    pin_mut!(stream);
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        size_bytes += chunk.len() as i64;
        digest.consume(&chunk);
        file.write_all(&chunk).await?;
    }
    file.flush().await?;
    file.sync_all().await?;

    Ok((size_bytes, format!("{:x}", digest.compute())))
}

fn io_error(err: io::Error) -> ServiceError {
    warn!(error = %err, "clip storage I/O failure");
    ServiceError::Backend(format!("Could not store clip: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    fn chunks(parts: &[&'static str]) -> impl Stream<Item = io::Result<Bytes>> {
        stream::iter(
            parts
                .iter()
                .copied()
                .map(|p| Ok(Bytes::from_static(p.as_bytes())))
                .collect::<Vec<_>>(),
        )
    }

    #[tokio::test]
    async fn stores_video_with_md5_etag() {
        let dir = tempfile::tempdir().unwrap();
        let service = ClipService::new(dir.path());

        let clip = service
            .store_clip("7", "hello.mp4", Some("video/mp4"), chunks(&["hello ", "world"]))
            .await
            .unwrap();

        assert_eq!(clip.size_bytes, 11);
        assert_eq!(clip.etag, format!("{:x}", md5::compute(b"hello world")));
        let on_disk = service.clip_path("7", clip.id, "hello.mp4");
        assert_eq!(tokio::fs::read(on_disk).await.unwrap(), b"hello world");
    }

    #[tokio::test]
    async fn rejects_non_video_content() {
        let dir = tempfile::tempdir().unwrap();
        let service = ClipService::new(dir.path());

        for ct in [Some("image/png"), None] {
            let err = service
                .store_clip("7", "a.png", ct, chunks(&["x"]))
                .await
                .unwrap_err();
            assert_eq!(err.to_string(), "Only video files are allowed.");
        }
    }

    #[tokio::test]
    async fn rejects_traversal_names() {
        let dir = tempfile::tempdir().unwrap();
        let service = ClipService::new(dir.path());

        for name in ["../escape.mp4", "a/b.mp4", ""] {
            let err = service
                .store_clip("7", name, Some("video/mp4"), chunks(&["x"]))
                .await
                .unwrap_err();
            assert!(matches!(err, ServiceError::InvalidInput(_)), "{name}");
        }
    }

    #[tokio::test]
    async fn failed_stream_leaves_no_files() {
        let dir = tempfile::tempdir().unwrap();
        let service = ClipService::new(dir.path());

        let broken = stream::iter(vec![
            Ok(Bytes::from_static(b"part")),
            Err(io::Error::other("connection reset")),
        ]);
        let err = service
            .store_clip("7", "clip.mp4", Some("video/mp4"), broken)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Backend(_)));

        let mut entries = tokio::fs::read_dir(dir.path().join("7")).await.unwrap();
        assert!(entries.next_entry().await.unwrap().is_none());
    }
}
