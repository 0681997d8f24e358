//! Real child-process executor.
//!
//! The toolchain runs with inherited stdio so its progress is streamed live.
//! While it runs, its pid is published so an interrupt handler can forward
//! the host's interrupt to it instead of leaving an orphaned build behind.

use std::io;
use std::process::{Command, Stdio};
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use tracing::{debug, warn};

use super::types::{ExitStatus, Executor, Invocation};

/// Executes invocations as blocking child processes.
#[derive(Debug, Default)]
pub struct ProcessExecutor {
  active_child: Arc<AtomicU32>,
}

impl ProcessExecutor {
  pub fn new() -> Self {
    Self::default()
  }

  /// Handle for forwarding interrupts to the currently running child.
  pub fn interrupt_handle(&self) -> InterruptHandle {
    InterruptHandle {
      active_child: Arc::clone(&self.active_child),
    }
  }
}

impl Executor for ProcessExecutor {
  fn execute(&self, invocation: &Invocation) -> io::Result<ExitStatus> {
    let mut command = Command::new(&invocation.program);
    command
      .args(&invocation.args)
      .stdin(Stdio::inherit())
      .stdout(Stdio::inherit())
      .stderr(Stdio::inherit());

    if let Some(cwd) = &invocation.cwd {
      command.current_dir(cwd);
    }

    let mut child = command.spawn()?;
    self.active_child.store(child.id(), Ordering::SeqCst);
    debug!(pid = child.id(), "toolchain started");

    let status = child.wait();
    self.active_child.store(0, Ordering::SeqCst);

    let status = ExitStatus::from(status?);
    debug!(%status, "toolchain exited");
    Ok(status)
  }
}

/// Forwards a host interrupt to the running toolchain, if any.
#[derive(Debug, Clone)]
pub struct InterruptHandle {
  active_child: Arc<AtomicU32>,
}

impl InterruptHandle {
  /// The pid of the running toolchain process.
  pub fn active_pid(&self) -> Option<u32> {
    match self.active_child.load(Ordering::SeqCst) {
      0 => None,
      pid => Some(pid),
    }
  }

  /// Send an interrupt to the running child.
  ///
  /// Returns `true` if a child was running. The executor keeps waiting on the
  /// child, so its exit is still observed and reported.
  pub fn forward(&self) -> bool {
    let Some(pid) = self.active_pid() else {
      return false;
    };
    warn!(pid, "forwarding interrupt to toolchain");
    if let Err(e) = interrupt_process(pid) {
      warn!(pid, error = %e, "failed to interrupt toolchain");
    }
    true
  }
}

#[cfg(unix)]
fn interrupt_process(pid: u32) -> io::Result<()> {
  use rustix::process::{Pid, Signal, kill_process};

  let pid = i32::try_from(pid)
    .ok()
    .and_then(Pid::from_raw)
    .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, format!("invalid pid {}", pid)))?;
  kill_process(pid, Signal::INT).map_err(io::Error::from)
}

// Console control events already reach every process attached to the console.
#[cfg(not(unix))]
fn interrupt_process(_pid: u32) -> io::Result<()> {
  Ok(())
}

#[cfg(test)]
#[cfg(unix)]
mod tests {
  use super::*;
  use crate::util::testutil::shell_invocation;
  use tempfile::TempDir;

  #[test]
  fn reports_exit_code() {
    let executor = ProcessExecutor::new();
    let status = executor.execute(&shell_invocation("exit 3", None)).unwrap();
    assert_eq!(status.code(), Some(3));
    assert!(!status.success());
  }

  #[test]
  fn runs_in_working_directory() {
    let temp = TempDir::new().unwrap();
    let executor = ProcessExecutor::new();
    let status = executor
      .execute(&shell_invocation("touch marker", Some(temp.path())))
      .unwrap();
    assert!(status.success());
    assert!(temp.path().join("marker").exists());
  }

  #[test]
  fn missing_program_is_not_found() {
    let executor = ProcessExecutor::new();
    let invocation = Invocation {
      program: "clawbuild-no-such-toolchain".to_string(),
      args: vec![],
      cwd: None,
    };
    let err = executor.execute(&invocation).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::NotFound);
  }

  #[test]
  fn no_child_between_runs() {
    let executor = ProcessExecutor::new();
    let handle = executor.interrupt_handle();
    executor.execute(&shell_invocation("true", None)).unwrap();
    assert_eq!(handle.active_pid(), None);
    assert!(!handle.forward());
  }

  #[test]
  fn forwarded_interrupt_stops_child() {
    let executor = ProcessExecutor::new();
    let handle = executor.interrupt_handle();

    let forwarder = std::thread::spawn(move || {
      for _ in 0..200 {
        if handle.forward() {
          return true;
        }
        std::thread::sleep(std::time::Duration::from_millis(10));
      }
      false
    });

    let sleep = Invocation {
      program: "sleep".to_string(),
      args: vec!["30".to_string()],
      cwd: None,
    };
    let status = executor.execute(&sleep).unwrap();
    assert!(forwarder.join().unwrap(), "child should have been running");
    assert_eq!(status.signal(), Some(2));
    assert_eq!(status.process_exit_code(), 130);
  }
}
