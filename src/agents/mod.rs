pub mod backup_manager;
pub mod dependency_filter;
pub mod manifest_loader;
pub mod package_manager;
pub mod restore_executor;
pub mod update_executor;

pub use backup_manager::BackupManager;
pub use dependency_filter::select;
pub use manifest_loader::ManifestLoader;
pub use package_manager::{CommandRunner, ProcessRunner};
pub use restore_executor::RestoreExecutor;
pub use update_executor::{DependencyClass, UpdateExecutor};
