use crate::error::{NpmUpdateError, Result};
use std::path::{Path, PathBuf};

pub const MANIFEST_FILE: &str = "package.json";
pub const DEPENDENCY_CACHE_DIR: &str = "node_modules";

pub const PACKAGE_MANAGER_ENV: &str = "NPM_UPDATE_PACKAGE_MANAGER";
pub const VERBOSE_ENV: &str = "NPM_UPDATE_VERBOSE";

/// Runtime settings shared by every agent.
#[derive(Debug, Clone)]
pub struct Config {
    pub project_path: PathBuf,
    pub package_manager: String,
    pub verbose: bool,
}

impl Config {
    pub fn new<P: AsRef<Path>>(project_path: P, package_manager: impl Into<String>) -> Self {
        Self {
            project_path: project_path.as_ref().to_path_buf(),
            package_manager: package_manager.into(),
            verbose: false,
        }
    }

    /// Builds the configuration for `project_path`, reading overrides from the environment.
    pub fn from_env<P: AsRef<Path>>(project_path: P) -> Result<Self> {
        let project_path = Self::validate_project_path(project_path.as_ref())?;

        let package_manager = std::env::var(PACKAGE_MANAGER_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| Self::default_package_manager().to_string());

        let mut config = Self::new(project_path, package_manager);
        config.verbose = std::env::var_os(VERBOSE_ENV).is_some();
        Ok(config)
    }

    pub fn default_package_manager() -> &'static str {
        if cfg!(target_os = "windows") {
            "npm.cmd"
        } else {
            "npm"
        }
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.project_path.join(MANIFEST_FILE)
    }

    pub fn dependency_cache_path(&self) -> PathBuf {
        self.project_path.join(DEPENDENCY_CACHE_DIR)
    }

    fn validate_project_path(path: &Path) -> Result<PathBuf> {
        let canonical = path.canonicalize().map_err(|e| {
            NpmUpdateError::ProjectValidation(format!("Invalid path '{}': {e}", path.display()))
        })?;

        if !canonical.is_dir() {
            return Err(NpmUpdateError::ProjectValidation(format!(
                "Path '{}' is not a directory",
                canonical.display()
            )));
        }

        Ok(canonical)
    }
}
