use crate::agents::backup_manager::BackupManager;
use crate::agents::package_manager::CommandRunner;
use crate::cli::RestoreTarget;
use crate::config::Config;
use crate::error::{NpmUpdateError, Result};
use crate::utils::logging::verbose;
use colored::Colorize;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// RestoreExecutor puts a backed-up manifest back in place and reinstalls from it
pub struct RestoreExecutor<'a> {
    config: &'a Config,
    runner: &'a dyn CommandRunner,
}

impl<'a> RestoreExecutor<'a> {
    pub fn new(config: &'a Config, runner: &'a dyn CommandRunner) -> Self {
        Self { config, runner }
    }

    /// Restores the manifest from `target`, wipes the dependency cache and
    /// runs a full install. Stops at the first failing step.
    pub fn restore(&self, target: &RestoreTarget) -> Result<PathBuf> {
        let backups = BackupManager::new(self.config);

        let backup_path = match target {
            RestoreTarget::Path(path) => self.config.project_path.join(path),
            RestoreTarget::Latest => backups.locate_latest()?,
        };

        println!(
            "{}",
            format!("Restoring package.json from {}", backup_path.display()).yellow()
        );
        backups.restore_from(&backup_path)?;

        self.remove_dependency_cache()?;

        self.runner
            .run(&self.config.package_manager, &["install".to_string()])?;

        Ok(backup_path)
    }

    /// Deletes `node_modules` recursively; a missing directory is fine.
    fn remove_dependency_cache(&self) -> Result<()> {
        let cache = self.config.dependency_cache_path();
        verbose(
            self.config.verbose,
            format!("Removing {}", cache.display()),
        );

        match fs::remove_dir_all(&cache) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(NpmUpdateError::Restore(format!(
                "Failed to remove '{}': {}",
                cache.display(),
                e
            ))),
        }
    }
}
