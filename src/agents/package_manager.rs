use crate::error::{NpmUpdateError, Result};
use crate::utils::logging::{announce_command, verbose};
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Runs one external command to completion.
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<()>;
}

/// ProcessRunner executes package manager commands inside the project directory
pub struct ProcessRunner {
    project_path: PathBuf,
    verbose: bool,
}

impl ProcessRunner {
    pub fn new<P: AsRef<Path>>(project_path: P, verbose: bool) -> Self {
        Self {
            project_path: project_path.as_ref().to_path_buf(),
            verbose,
        }
    }
}

impl CommandRunner for ProcessRunner {
    /// Spawns `program` with an explicit argument vector and streams its output
    fn run(&self, program: &str, args: &[String]) -> Result<()> {
        announce_command(program, args);
        verbose(
            self.verbose,
            format!("Working directory: {}", self.project_path.display()),
        );

        let mut child = Command::new(program)
            .current_dir(&self.project_path)
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| {
                NpmUpdateError::CommandExecution(format!("Failed to spawn '{}': {}", program, e))
            })?;

        // Forward raw bytes; output need not be UTF-8 and must be drained fully
        let forwarded = match child.stdout.take() {
            Some(mut stdout) => io::copy(&mut stdout, &mut io::stdout().lock()).map(|_| ()),
            None => Ok(()),
        };

        let status = child.wait().map_err(|e| {
            NpmUpdateError::CommandExecution(format!("Failed to wait for '{}': {}", program, e))
        })?;

        forwarded.map_err(|e| {
            NpmUpdateError::CommandExecution(format!(
                "Failed to forward output of '{}': {}",
                program, e
            ))
        })?;

        if !status.success() {
            return Err(NpmUpdateError::CommandExecution(format!(
                "'{} {}' exited with code {}",
                program,
                args.join(" "),
                status.code().unwrap_or(-1)
            )));
        }

        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_program_is_a_spawn_error() {
        let dir = tempdir().unwrap();
        let runner = ProcessRunner::new(dir.path(), false);
        let err = runner
            .run("npm-update-definitely-not-installed", &["install".to_string()])
            .unwrap_err();
        assert!(matches!(err, NpmUpdateError::CommandExecution(_)));
        assert!(!err.is_fatal());
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_reported() {
        let dir = tempdir().unwrap();
        let runner = ProcessRunner::new(dir.path(), false);
        let err = runner
            .run("sh", &["-c".to_string(), "exit 3".to_string()])
            .unwrap_err();
        assert!(err.to_string().contains("exited with code 3"));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_output_does_not_break_the_command() {
        let dir = tempdir().unwrap();
        let runner = ProcessRunner::new(dir.path(), false);
        let script = "printf 'ok\\r\\n\\377\\n'; seq 1 200000; touch done".to_string();
        runner.run("sh", &["-c".to_string(), script]).unwrap();
        assert!(dir.path().join("done").exists());
    }

    #[cfg(unix)]
    #[test]
    fn arguments_are_not_shell_interpreted() {
        let dir = tempdir().unwrap();
        let runner = ProcessRunner::new(dir.path(), false);
        runner
            .run("touch", &["a;touch b".to_string()])
            .unwrap();
        assert!(dir.path().join("a;touch b").exists());
        assert!(!dir.path().join("b").exists());
    }
}
