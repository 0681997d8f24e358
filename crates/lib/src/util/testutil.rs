//! Test utilities for clawbuild-lib.
//!
//! Provides a recording executor that stands in for the real toolchain, and
//! cross-platform helpers for tests that do spawn processes.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::path::Path;

use crate::execute::{ExitStatus, Executor, Invocation};

/// Records every invocation and answers with scripted outcomes.
///
/// Scripted outcomes are consumed in order; once exhausted every call exits
/// with the fallback status.
#[derive(Debug)]
pub struct RecordingExecutor {
  calls: RefCell<Vec<Invocation>>,
  outcomes: RefCell<VecDeque<io::Result<ExitStatus>>>,
  fallback: ExitStatus,
}

impl Default for RecordingExecutor {
  fn default() -> Self {
    Self::exiting_with(0)
  }
}

impl RecordingExecutor {
  pub fn new() -> Self {
    Self::default()
  }

  /// An executor whose every call exits with `code`.
  pub fn exiting_with(code: i32) -> Self {
    Self {
      calls: RefCell::new(Vec::new()),
      outcomes: RefCell::new(VecDeque::new()),
      fallback: ExitStatus::from_code(code),
    }
  }

  /// An executor that fails to launch with `kind`.
  pub fn failing_launch(kind: io::ErrorKind) -> Self {
    let executor = Self::new();
    executor.push_outcome(Err(io::Error::new(kind, "launch failed")));
    executor
  }

  pub fn push_outcome(&self, outcome: io::Result<ExitStatus>) {
    self.outcomes.borrow_mut().push_back(outcome);
  }

  pub fn calls(&self) -> Vec<Invocation> {
    self.calls.borrow().clone()
  }

  pub fn call_count(&self) -> usize {
    self.calls.borrow().len()
  }
}

impl Executor for RecordingExecutor {
  fn execute(&self, invocation: &Invocation) -> io::Result<ExitStatus> {
    self.calls.borrow_mut().push(invocation.clone());
    self
      .outcomes
      .borrow_mut()
      .pop_front()
      .unwrap_or(Ok(self.fallback))
  }
}

/// Returns an invocation running `script` through the platform shell.
#[cfg(unix)]
pub fn shell_invocation(script: &str, cwd: Option<&Path>) -> Invocation {
  Invocation {
    program: "/bin/sh".to_string(),
    args: vec!["-c".to_string(), script.to_string()],
    cwd: cwd.map(Path::to_path_buf),
  }
}

#[cfg(windows)]
pub fn shell_invocation(script: &str, cwd: Option<&Path>) -> Invocation {
  Invocation {
    program: "cmd.exe".to_string(),
    args: vec!["/C".to_string(), script.to_string()],
    cwd: cwd.map(Path::to_path_buf),
  }
}
