use crate::agents::manifest_loader::Manifest;
use crate::agents::{
    BackupManager, CommandRunner, DependencyClass, ManifestLoader, RestoreExecutor,
    UpdateExecutor, select,
};
use crate::cli::{self, Options, RestoreTarget};
use crate::config::Config;
use crate::error::Result;
use crate::utils::logging::report_failure;
use colored::Colorize;

/// Runs whatever `options` asks for: help, a restore, or an update.
///
/// package.json must be readable and valid JSON whatever the mode.
/// Only fatal errors are returned. Failures of individual package manager
/// steps are printed and swallowed.
pub fn execute(config: &Config, options: &Options, runner: &dyn CommandRunner) -> Result<()> {
    let manifest = ManifestLoader::new(config).load()?;

    if options.help {
        execute_help();
        return Ok(());
    }

    if let Some(target) = &options.restore {
        execute_restore(config, target, runner);
        return Ok(());
    }

    execute_update(config, options, &manifest, runner)
}

pub fn execute_help() {
    print!("{}", cli::render_help());
}

/// Restore package.json from a backup and reinstall every package
pub fn execute_restore(config: &Config, target: &RestoreTarget, runner: &dyn CommandRunner) {
    println!("{}", "Starting restore process...".cyan().bold());

    match RestoreExecutor::new(config, runner).restore(target) {
        Ok(backup_path) => println!(
            "\n{}",
            format!(
                "✓ package.json restored from {} and packages reinstalled",
                backup_path.display()
            )
            .green()
        ),
        Err(e) => report_failure(e),
    }
}

/// Back up package.json, then reinstall the selected dependencies
pub fn execute_update(
    config: &Config,
    options: &Options,
    manifest: &Manifest,
    runner: &dyn CommandRunner,
) -> Result<()> {
    println!("{}", "Starting dependency update process...".cyan().bold());

    println!("\n{}", "1. Reading package.json...".yellow());
    println!(
        "   {} dependencies, {} devDependencies",
        manifest.dependencies().len(),
        manifest.dev_dependencies().len()
    );

    let classes = requested_classes(options);
    if classes.is_empty() {
        eprintln!("You must specify --deps or --devdeps or both");
        return Ok(());
    }

    if options.nobackup {
        println!("\n{}", "2. Skipping package.json backup (--nobackup)".yellow());
    } else {
        println!("\n{}", "2. Backing up package.json...".yellow());
        let backup_path = BackupManager::new(config).backup(&manifest.raw)?;
        println!(
            "{}",
            format!("✓ Backup written to {}", backup_path.display()).green()
        );
    }

    let packages = options.packages.as_deref();
    let exclude = options.exclude.as_deref();
    let executor = UpdateExecutor::new(config, runner);

    println!("\n{}", "3. Reinstalling packages...".yellow());
    let mut failures = 0;
    for class in classes {
        let all = match class {
            DependencyClass::Production => manifest.dependencies(),
            DependencyClass::Development => manifest.dev_dependencies(),
        };
        let selected = select(all, packages, exclude);

        println!(
            "   {} {} package(s) from {}",
            "•".bright_cyan(),
            selected.len(),
            class.manifest_key().bright_cyan()
        );

        if let Err(e) = executor.update(&selected, class) {
            failures += 1;
            report_failure(e);
        }
    }

    if failures == 0 {
        println!(
            "\n{}",
            "✨ Update process completed successfully!".green().bold()
        );
    } else {
        println!(
            "\n{}",
            format!("Update finished with {} failed step(s)", failures).red()
        );
    }

    Ok(())
}

fn requested_classes(options: &Options) -> Vec<DependencyClass> {
    let mut classes = Vec::new();
    if options.deps {
        classes.push(DependencyClass::Production);
    }
    if options.devdeps {
        classes.push(DependencyClass::Development);
    }
    classes
}
