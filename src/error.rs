use thiserror::Error;

#[derive(Error, Debug)]
pub enum NpmUpdateError {
    #[error("Failed to read manifest: {0}")]
    ManifestRead(String),

    #[error("Failed to parse manifest: {0}")]
    ManifestParse(String),

    #[error("Backup failed: {0}")]
    Backup(String),

    #[error("No backup file found in '{0}'")]
    NoBackupFound(String),

    #[error("Error reading the timestamp of backup file '{0}'")]
    InvalidBackupTimestamp(String),

    #[error("Restore failed: {0}")]
    Restore(String),

    #[error("Package manager command failed: {0}")]
    CommandExecution(String),

    #[error("Project validation failed: {0}")]
    ProjectValidation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl NpmUpdateError {
    /// Errors that must terminate the process instead of being reported and swallowed.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::ManifestRead(_)
                | Self::ManifestParse(_)
                | Self::Backup(_)
                | Self::ProjectValidation(_)
                | Self::Io(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, NpmUpdateError>;
