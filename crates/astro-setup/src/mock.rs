//! Scripted command runner for testing.

use std::sync::Mutex;

use crate::runner::{CommandOutcome, CommandRunner, CommandSpec, RunError};

type Rule = (String, Option<CommandOutcome>);

/// Command runner that records calls and returns scripted outcomes.
///
/// Rules match when the command line contains their needle; the first
/// matching rule wins. A rule with no outcome simulates a missing
/// executable. Unmatched commands succeed.
#[derive(Debug, Default)]
pub struct MockRunner {
    rules: Vec<Rule>,
    calls: Mutex<Vec<CommandSpec>>,
}

impl MockRunner {
    /// Create a runner where every command succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return `outcome` for commands whose line contains `needle`.
    #[must_use]
    pub fn with_outcome(mut self, needle: impl Into<String>, outcome: CommandOutcome) -> Self {
        self.rules.push((needle.into(), Some(outcome)));
        self
    }

    /// Report commands whose line contains `needle` as not installed.
    #[must_use]
    pub fn with_missing(mut self, needle: impl Into<String>) -> Self {
        self.rules.push((needle.into(), None));
        self
    }

    /// Command lines run so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(CommandSpec::display)
            .collect()
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutcome, RunError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(spec.clone());
        }
        let line = spec.display();
        match self.rules.iter().find(|(needle, _)| line.contains(needle.as_str())) {
            Some((_, Some(outcome))) => Ok(*outcome),
            Some((_, None)) => Err(RunError::NotFound {
                program: spec.program.clone(),
            }),
            None => Ok(CommandOutcome::Success),
        }
    }
}
