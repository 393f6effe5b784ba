//! Local filesystem storage implementation.
//!
//! ## Storage Layout
//!
//! ```text
//! {output_dir}/
//! ├── {prefix}_{year}.json
//! └── {prefix}_{year}.txt
//! {archive_dir}/
//! └── {year}.json
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::{OutputConfig, StructuredEpisode};
use crate::storage::{EpisodeStorage, RunFiles};

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    output_dir: PathBuf,
    archive_dir: PathBuf,
    file_prefix: String,
}

impl LocalStorage {
    /// Create a new LocalStorage with explicit directories.
    pub fn new(
        output_dir: impl Into<PathBuf>,
        archive_dir: impl Into<PathBuf>,
        file_prefix: impl Into<String>,
    ) -> Self {
        Self {
            output_dir: output_dir.into(),
            archive_dir: archive_dir.into(),
            file_prefix: file_prefix.into(),
        }
    }

    pub fn from_config(config: &OutputConfig) -> Self {
        Self::new(&config.dir, &config.archive_dir, &config.file_prefix)
    }

    /// Per-run file path for a year and extension.
    fn run_path(&self, year: i32, extension: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}_{}.{}", self.file_prefix, year, extension))
    }

    fn archive_path(&self, year: i32) -> PathBuf {
        self.archive_dir.join(format!("{}.json", year))
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Temp file next to `path`: `name.json` stages as `name.json.tmp`.
    fn tmp_path(path: &Path) -> PathBuf {
        let mut name = path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        path.with_file_name(name)
    }

    /// Write `bytes` to the temp file for `path`, returning the temp path.
    async fn stage_bytes(path: &Path, bytes: &[u8]) -> Result<PathBuf> {
        Self::ensure_dir(path).await?;

        let tmp = Self::tmp_path(path);
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        Ok(tmp)
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
        let tmp = Self::stage_bytes(path, bytes).await?;
        tokio::fs::rename(&tmp, path).await?;
        Ok(())
    }

    /// Write JSON data, pretty-printed with two-space indentation.
    async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(value)?;
        Self::write_bytes(path, &bytes).await
    }

    /// Remove a staged temp file, ignoring errors.
    async fn discard(tmp: &Path) {
        if let Err(e) = tokio::fs::remove_file(tmp).await {
            log::debug!("Could not remove {}: {}", tmp.display(), e);
        }
    }

    /// Read JSON data, returning None if the file doesn't exist.
    async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
        match tokio::fs::read(path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }
}

#[async_trait]
impl EpisodeStorage for LocalStorage {
    async fn write_run(
        &self,
        year: i32,
        episodes: &[StructuredEpisode],
        report: &str,
    ) -> Result<RunFiles> {
        let json_path = self.run_path(year, "json");
        let text_path = self.run_path(year, "txt");

        let bytes = serde_json::to_vec_pretty(episodes)?;
        let json_tmp = Self::stage_bytes(&json_path, &bytes).await?;
        let text_tmp = match Self::stage_bytes(&text_path, report.as_bytes()).await {
            Ok(tmp) => tmp,
            Err(e) => {
                Self::discard(&json_tmp).await;
                return Err(e);
            }
        };

        if let Err(e) = tokio::fs::rename(&json_tmp, &json_path).await {
            Self::discard(&json_tmp).await;
            Self::discard(&text_tmp).await;
            return Err(e.into());
        }
        tokio::fs::rename(&text_tmp, &text_path).await?;

        log::info!("Wrote {} episodes to {}", episodes.len(), json_path.display());
        log::info!("Wrote text report to {}", text_path.display());

        Ok(RunFiles {
            json: json_path.display().to_string(),
            text: text_path.display().to_string(),
        })
    }

    async fn load_archive(&self, year: i32) -> Result<Vec<StructuredEpisode>> {
        let path = self.archive_path(year);
        match Self::read_json(&path).await? {
            Some(episodes) => Ok(episodes),
            None => {
                log::info!("No archive found at {}", path.display());
                Ok(Vec::new())
            }
        }
    }

    async fn save_archive(&self, year: i32, episodes: &[StructuredEpisode]) -> Result<String> {
        let path = self.archive_path(year);
        Self::write_json(&path, episodes).await?;
        log::info!("Archive: {} episodes written to {}", episodes.len(), path.display());
        Ok(path.display().to_string())
    }

    async fn load_all_archives(&self) -> Result<BTreeMap<String, Vec<StructuredEpisode>>> {
        let mut archives = BTreeMap::new();

        let mut entries = match tokio::fs::read_dir(&self.archive_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::warn!("Archive directory {} not found", self.archive_dir.display());
                return Ok(archives);
            }
            Err(e) => return Err(AppError::Io(e)),
        };

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let episodes: Vec<StructuredEpisode> =
                Self::read_json(&path).await?.unwrap_or_default();
            log::debug!("Loaded {} episodes from {}", episodes.len(), path.display());
            archives.insert(stem.to_string(), episodes);
        }

        Ok(archives)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CallerRecord;
    use tempfile::TempDir;

    fn storage(tmp: &TempDir) -> LocalStorage {
        LocalStorage::new(tmp.path().join("out"), tmp.path().join("archive"), "gtwm_episodes")
    }

    fn episode(title: &str) -> StructuredEpisode {
        StructuredEpisode {
            episode_title: title.to_string(),
            date: "January 25, 2021".to_string(),
            duration: "01:00:00".to_string(),
            callers: vec![CallerRecord::new("Caller #1 café talk")],
            summary: "Résumé".to_string(),
        }
    }

    #[tokio::test]
    async fn test_write_run() {
        let tmp = TempDir::new().unwrap();
        let storage = storage(&tmp);

        let files = storage
            .write_run(2021, &[episode("One")], "hello\n")
            .await
            .unwrap();
        assert!(files.json.ends_with("gtwm_episodes_2021.json"));
        assert!(files.text.ends_with("gtwm_episodes_2021.txt"));

        let content = std::fs::read_to_string(&files.json).unwrap();
        assert!(content.contains("\"episode title\": \"One\""));
        assert!(content.contains("Résumé"));
        assert!(content.starts_with("[\n  {"));
        assert_eq!(std::fs::read_to_string(&files.text).unwrap(), "hello\n");

        let leftovers: Vec<_> = std::fs::read_dir(tmp.path().join("out"))
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|name| name.ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty(), "temp files left: {leftovers:?}");
    }

    #[test]
    fn test_tmp_path_keeps_extension() {
        let json = LocalStorage::tmp_path(Path::new("out/gtwm_episodes_2021.json"));
        let text = LocalStorage::tmp_path(Path::new("out/gtwm_episodes_2021.txt"));
        assert_eq!(json, Path::new("out/gtwm_episodes_2021.json.tmp"));
        assert_ne!(json, text);
    }

    #[tokio::test]
    async fn test_failed_report_leaves_no_output() {
        let tmp = TempDir::new().unwrap();
        let storage = storage(&tmp);

        // A directory in the way makes staging the report fail.
        std::fs::create_dir_all(tmp.path().join("out/gtwm_episodes_2021.txt.tmp")).unwrap();

        let result = storage.write_run(2021, &[episode("One")], "hello\n").await;
        assert!(result.is_err());
        assert!(!tmp.path().join("out/gtwm_episodes_2021.json").exists());
        assert!(!tmp.path().join("out/gtwm_episodes_2021.json.tmp").exists());
        assert!(!tmp.path().join("out/gtwm_episodes_2021.txt").exists());
    }

    #[tokio::test]
    async fn test_archive_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let storage = storage(&tmp);

        assert!(storage.load_archive(2021).await.unwrap().is_empty());

        storage
            .save_archive(2021, &[episode("One"), episode("Two")])
            .await
            .unwrap();
        let loaded = storage.load_archive(2021).await.unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[1].episode_title, "Two");
    }

    #[tokio::test]
    async fn test_load_all_archives() {
        let tmp = TempDir::new().unwrap();
        let storage = storage(&tmp);

        assert!(storage.load_all_archives().await.unwrap().is_empty());

        storage.save_archive(2020, &[episode("A")]).await.unwrap();
        storage.save_archive(2021, &[episode("B"), episode("C")]).await.unwrap();
        std::fs::write(tmp.path().join("archive/notes.txt"), "ignored").unwrap();

        let archives = storage.load_all_archives().await.unwrap();
        assert_eq!(archives.len(), 2);
        assert_eq!(archives["2021"].len(), 2);
    }
}
