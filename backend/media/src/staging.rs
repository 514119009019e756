//! Temp-file staging for in-flight downloads.

use chrono::Utc;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;
use uuid::Uuid;

/// A fresh staging path under `dir`: `video_<unix_millis>_<8 hex>.mp4`.
///
/// The millisecond timestamp orders files; the random suffix keeps two
/// downloads that start in the same millisecond apart.
pub fn temp_media_path(dir: &Path) -> PathBuf {
    let suffix = Uuid::new_v4().simple().to_string();
    dir.join(format!(
        "video_{}_{}.mp4",
        Utc::now().timestamp_millis(),
        &suffix[..8]
    ))
}

/// Delete a staged file.
pub async fn remove_staged(path: &Path) -> std::io::Result<()> {
    fs::remove_file(path).await?;
    debug!(path = %path.display(), "Removed staged media file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn paths_are_unique_and_namespaced() {
        let dir = Path::new("/tmp");
        let a = temp_media_path(dir);
        let b = temp_media_path(dir);
        assert_ne!(a, b);
        let name = a.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("video_"));
        assert!(name.ends_with(".mp4"));
        assert_eq!(a.parent(), Some(dir));
    }

    #[tokio::test]
    async fn remove_deletes_file() {
        let dir = TempDir::new().unwrap();
        let path = temp_media_path(dir.path());
        std::fs::write(&path, b"x").unwrap();
        remove_staged(&path).await.unwrap();
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn remove_missing_is_error() {
        let dir = TempDir::new().unwrap();
        assert!(remove_staged(&dir.path().join("nope.mp4")).await.is_err());
    }
}
