use crate::config::Config;
use crate::error::{NpmUpdateError, Result};
use crate::utils::logging::verbose;
use jiff::Timestamp;
use regex::Regex;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

const BACKUP_PREFIX: &str = "package-backup-";
const BACKUP_SUFFIX: &str = ".json";

/// BackupManager snapshots the manifest and finds snapshots again for restore
pub struct BackupManager<'a> {
    config: &'a Config,
}

impl<'a> BackupManager<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    pub fn file_name(timestamp_millis: i64) -> String {
        format!("{BACKUP_PREFIX}{timestamp_millis}{BACKUP_SUFFIX}")
    }

    /// Writes `raw` unchanged to `package-backup-<epoch millis>.json`.
    pub fn backup(&self, raw: &[u8]) -> Result<PathBuf> {
        self.backup_at(raw, Timestamp::now().as_millisecond())
    }

    fn backup_at(&self, raw: &[u8], timestamp_millis: i64) -> Result<PathBuf> {
        let path = self
            .config
            .project_path
            .join(Self::file_name(timestamp_millis));

        // create_new: an existing backup is never overwritten
        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .and_then(|mut file| file.write_all(raw))
            .map_err(|e| NpmUpdateError::Backup(format!("'{}': {}", path.display(), e)))?;

        verbose(
            self.config.verbose,
            format!("Wrote {} bytes to {}", raw.len(), path.display()),
        );
        Ok(path)
    }

    /// Finds the backup whose embedded timestamp is the greatest.
    pub fn locate_latest(&self) -> Result<PathBuf> {
        let pattern = Regex::new(r"^package-backup-(.+)\.json$")
            .map_err(|e| NpmUpdateError::Restore(format!("Regex error: {}", e)))?;

        let mut latest: Option<(u64, String)> = None;

        for entry in fs::read_dir(&self.config.project_path)? {
            let file_name = entry?.file_name().to_string_lossy().into_owned();

            let Some(captures) = pattern.captures(&file_name) else {
                continue;
            };

            let timestamp = captures[1]
                .parse::<u64>()
                .map_err(|_| NpmUpdateError::InvalidBackupTimestamp(file_name.clone()))?;

            let is_newer = match &latest {
                Some((best, best_name)) => {
                    timestamp > *best || (timestamp == *best && file_name < *best_name)
                }
                None => true,
            };
            if is_newer {
                latest = Some((timestamp, file_name));
            }
        }

        match latest {
            Some((_, file_name)) => {
                let path = self.config.project_path.join(file_name);
                verbose(
                    self.config.verbose,
                    format!("Latest backup: {}", path.display()),
                );
                Ok(path)
            }
            None => Err(NpmUpdateError::NoBackupFound(
                self.config.project_path.display().to_string(),
            )),
        }
    }

    /// Copies the bytes of `backup_path` over the manifest verbatim.
    pub fn restore_from<P: AsRef<Path>>(&self, backup_path: P) -> Result<()> {
        let backup_path = backup_path.as_ref();
        let data = fs::read(backup_path).map_err(|e| {
            NpmUpdateError::Restore(format!(
                "Failed to read backup '{}': {}",
                backup_path.display(),
                e
            ))
        })?;

        let manifest_path = self.config.manifest_path();
        fs::write(&manifest_path, &data).map_err(|e| {
            NpmUpdateError::Restore(format!(
                "Failed to write '{}': {}",
                manifest_path.display(),
                e
            ))
        })?;

        Ok(())
    }
}
