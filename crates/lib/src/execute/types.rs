//! Types shared by all executors.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// One fully-specified toolchain call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
  /// The executable to run.
  pub program: String,

  /// Arguments, in order.
  pub args: Vec<String>,

  /// Working directory. `None` runs in the current directory.
  pub cwd: Option<PathBuf>,
}

impl fmt::Display for Invocation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.program)?;
    for arg in &self.args {
      if arg.is_empty() || arg.contains(char::is_whitespace) {
        write!(f, " \"{}\"", arg)?;
      } else {
        write!(f, " {}", arg)?;
      }
    }
    Ok(())
  }
}

/// Exit outcome of a finished toolchain process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitStatus {
  code: Option<i32>,
  signal: Option<i32>,
}

impl ExitStatus {
  /// A normal exit with `code`.
  pub fn from_code(code: i32) -> Self {
    Self {
      code: Some(code),
      signal: None,
    }
  }

  /// Termination by `signal` without an exit code.
  pub fn from_signal(signal: i32) -> Self {
    Self {
      code: None,
      signal: Some(signal),
    }
  }

  pub fn success(&self) -> bool {
    self.code == Some(0)
  }

  pub fn code(&self) -> Option<i32> {
    self.code
  }

  pub fn signal(&self) -> Option<i32> {
    self.signal
  }

  /// The exit code this driver should terminate with to mirror the child.
  pub fn process_exit_code(&self) -> i32 {
    match (self.code, self.signal) {
      (Some(code), _) => code,
      (None, Some(signal)) => 128 + signal,
      (None, None) => 1,
    }
  }
}

impl From<std::process::ExitStatus> for ExitStatus {
  fn from(status: std::process::ExitStatus) -> Self {
    #[cfg(unix)]
    let signal = {
      use std::os::unix::process::ExitStatusExt;
      status.signal()
    };
    #[cfg(not(unix))]
    let signal = None;

    Self {
      code: status.code(),
      signal,
    }
  }
}

impl fmt::Display for ExitStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match (self.code, self.signal) {
      (Some(code), _) => write!(f, "exit code {}", code),
      (None, Some(signal)) => write!(f, "signal {}", signal),
      (None, None) => write!(f, "unknown status"),
    }
  }
}

/// Capability to run a toolchain invocation to completion.
///
/// Implementations block until the process exits. An `Err` means the process
/// could not be started or waited on; a started process always yields `Ok`,
/// whatever its exit status.
pub trait Executor {
  fn execute(&self, invocation: &Invocation) -> io::Result<ExitStatus>;
}

impl<E: Executor + ?Sized> Executor for &E {
  fn execute(&self, invocation: &Invocation) -> io::Result<ExitStatus> {
    (**self).execute(invocation)
  }
}
