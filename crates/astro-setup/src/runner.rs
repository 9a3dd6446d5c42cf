//! Subprocess execution.

use std::io;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// A command to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Executable name or path.
    pub program: String,
    /// Arguments.
    pub args: Vec<String>,
    /// Working directory.
    pub cwd: PathBuf,
    /// Kill the process after this long.
    pub timeout: Duration,
    /// Discard output instead of passing it through.
    pub quiet: bool,
}

impl CommandSpec {
    /// Create a spec from a program and its arguments.
    pub fn new(
        program: impl Into<String>,
        args: impl IntoIterator<Item = impl Into<String>>,
        cwd: impl Into<PathBuf>,
        timeout: Duration,
    ) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            cwd: cwd.into(),
            timeout,
            quiet: false,
        }
    }

    /// Discard the command's output.
    #[must_use]
    pub fn quiet(mut self) -> Self {
        self.quiet = true;
        self
    }

    /// Command line for log and report messages.
    #[must_use]
    pub fn display(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// How a command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Exit status zero.
    Success,
    /// Non-zero exit, or killed by a signal (`None`).
    Failed(Option<i32>),
    /// Killed after exceeding its timeout.
    TimedOut,
}

impl CommandOutcome {
    /// True for a zero exit status.
    #[must_use]
    pub fn is_success(self) -> bool {
        self == Self::Success
    }
}

/// Error starting or supervising a command.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// The executable does not exist.
    #[error("Executable not found: {program}")]
    NotFound {
        /// Program name.
        program: String,
    },
    /// Spawning or waiting failed for another reason.
    #[error("Failed to run {program}: {source}")]
    Io {
        /// Program name.
        program: String,
        /// Underlying I/O error.
        source: io::Error,
    },
}

/// Runs external commands.
pub trait CommandRunner {
    /// Run a command to completion or timeout.
    ///
    /// # Errors
    ///
    /// Returns `RunError::NotFound` when the executable is missing and
    /// `RunError::Io` when the process cannot be spawned or supervised.
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutcome, RunError>;
}

/// Runs commands as child processes.
///
/// Stdin is closed so interactive prompts cannot block a run. Output is
/// inherited unless the spec is quiet.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutcome, RunError> {
        let output = || {
            if spec.quiet {
                Stdio::null()
            } else {
                Stdio::inherit()
            }
        };

        tracing::debug!(command = %spec.display(), cwd = %spec.cwd.display(), "Running command");
        let mut child = Command::new(&spec.program)
            .args(&spec.args)
            .current_dir(&spec.cwd)
            .stdin(Stdio::null())
            .stdout(output())
            .stderr(output())
            .spawn()
            .map_err(|source| match source.kind() {
                io::ErrorKind::NotFound => RunError::NotFound {
                    program: spec.program.clone(),
                },
                _ => RunError::Io {
                    program: spec.program.clone(),
                    source,
                },
            })?;

        let io_error = |source| RunError::Io {
            program: spec.program.clone(),
            source,
        };
        let started = Instant::now();
        loop {
            if let Some(status) = child.try_wait().map_err(io_error)? {
                return Ok(if status.success() {
                    CommandOutcome::Success
                } else {
                    CommandOutcome::Failed(status.code())
                });
            }
            if started.elapsed() >= spec.timeout {
                tracing::warn!(command = %spec.display(), timeout = ?spec.timeout, "Command timed out");
                child.kill().map_err(io_error)?;
                child.wait().map_err(io_error)?;
                return Ok(CommandOutcome::TimedOut);
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn spec(program: &str, args: &[&str], timeout: Duration) -> CommandSpec {
        CommandSpec::new(program, args.iter().copied(), std::env::temp_dir(), timeout).quiet()
    }

    #[test]
    fn test_success_and_failure() {
        let ok = SystemRunner.run(&spec("true", &[], Duration::from_secs(10))).unwrap();
        assert_eq!(ok, CommandOutcome::Success);

        let failed = SystemRunner
            .run(&spec("sh", &["-c", "exit 3"], Duration::from_secs(10)))
            .unwrap();
        assert_eq!(failed, CommandOutcome::Failed(Some(3)));
    }

    #[test]
    fn test_missing_executable() {
        let err = SystemRunner
            .run(&spec("astro-definitely-not-installed", &[], Duration::from_secs(1)))
            .unwrap_err();
        assert!(matches!(err, RunError::NotFound { .. }));
    }

    #[test]
    fn test_timeout_kills_process() {
        let outcome = SystemRunner
            .run(&spec("sleep", &["5"], Duration::from_millis(200)))
            .unwrap();
        assert_eq!(outcome, CommandOutcome::TimedOut);
    }

    #[test]
    fn test_display() {
        let spec = spec("npm", &["install", "clsx@^2.1.1"], Duration::from_secs(1));
        assert_eq!(spec.display(), "npm install clsx@^2.1.1");
    }
}
