use crate::agents::manifest_loader::DependencyMap;
use crate::agents::package_manager::CommandRunner;
use crate::config::Config;
use crate::error::Result;
use crate::utils::logging::verbose;

/// The two dependency sections of a manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyClass {
    Production,
    Development,
}

impl DependencyClass {
    /// Flag passed to the package manager so the manifest entry is rewritten.
    pub fn save_flag(self) -> &'static str {
        match self {
            DependencyClass::Production => "--save",
            DependencyClass::Development => "--save-dev",
        }
    }

    pub fn manifest_key(self) -> &'static str {
        match self {
            DependencyClass::Production => "dependencies",
            DependencyClass::Development => "devDependencies",
        }
    }
}

/// UpdateExecutor reinstalls a set of packages so they resolve to their latest version
pub struct UpdateExecutor<'a> {
    config: &'a Config,
    runner: &'a dyn CommandRunner,
}

impl<'a> UpdateExecutor<'a> {
    pub fn new(config: &'a Config, runner: &'a dyn CommandRunner) -> Self {
        Self { config, runner }
    }

    /// Uninstalls every package in `dependencies`, then installs them again.
    ///
    /// Does nothing when `dependencies` is empty. The install step only runs
    /// after a successful uninstall.
    pub fn update(&self, dependencies: &DependencyMap, class: DependencyClass) -> Result<()> {
        if dependencies.is_empty() {
            verbose(
                self.config.verbose,
                format!("No {} selected, skipping", class.manifest_key()),
            );
            return Ok(());
        }

        let packages: Vec<&str> = dependencies.keys().map(String::as_str).collect();

        self.runner.run(
            &self.config.package_manager,
            &Self::command_args("uninstall", class, &packages),
        )?;
        self.runner.run(
            &self.config.package_manager,
            &Self::command_args("install", class, &packages),
        )?;

        Ok(())
    }

    fn command_args(subcommand: &str, class: DependencyClass, packages: &[&str]) -> Vec<String> {
        let mut args = Vec::with_capacity(packages.len() + 2);
        args.push(subcommand.to_string());
        args.push(class.save_flag().to_string());
        args.extend(packages.iter().map(|name| name.to_string()));
        args
    }
}
