//! The build driver.
//!
//! A [`Driver`] performs exactly one build: it resolves a [`BuildProfile`],
//! hands the resulting [`Invocation`] to its [`Executor`] and reports the
//! outcome. There are no retries and no fallbacks; the first error ends the
//! run.
//!
//! # States
//!
//! ```text
//! NotStarted -> Resolving -> Invoking -> Succeeded
//!                   |            |
//!                   +-> Failed <-+
//! ```

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, info};

use crate::backend::Backend;
use crate::config::DriverConfig;
use crate::execute::{ExitStatus, Executor, Invocation};
use crate::platform::Platform;
use crate::profile::{BuildProfile, ProfileError, resolve_profile};

/// Where a driver is in its one-shot lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
  NotStarted,
  Resolving,
  Invoking,
  Succeeded,
  Failed,
}

impl DriverState {
  pub fn is_terminal(&self) -> bool {
    matches!(self, Self::Succeeded | Self::Failed)
  }
}

impl fmt::Display for DriverState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Self::NotStarted => "not started",
      Self::Resolving => "resolving",
      Self::Invoking => "invoking",
      Self::Succeeded => "succeeded",
      Self::Failed => "failed",
    };
    write!(f, "{}", name)
  }
}

/// Errors that end a build run.
#[derive(Debug, Error)]
pub enum DriverError {
  /// Profile resolution failed before any process was started.
  #[error(transparent)]
  Profile(#[from] ProfileError),

  /// The toolchain ran and exited unsuccessfully.
  #[error("toolchain failed with {status}")]
  ToolchainFailure { status: ExitStatus },

  /// The toolchain executable could not be found.
  #[error("toolchain '{toolchain}' not found; is it installed and on PATH?")]
  EnvironmentMissing { toolchain: String },

  /// The toolchain could not be started or waited on.
  #[error("failed to run toolchain '{toolchain}': {source}")]
  Launch {
    toolchain: String,
    #[source]
    source: io::Error,
  },

  /// `run` was called on a driver that already ran.
  #[error("build driver already started")]
  AlreadyStarted,
}

impl DriverError {
  /// The exit code the process should terminate with for this error.
  pub fn exit_code(&self) -> i32 {
    match self {
      Self::ToolchainFailure { status } => status.process_exit_code(),
      _ => 1,
    }
  }
}

/// Outcome of a successful build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildResult {
  /// The toolchain's exit status.
  pub status: ExitStatus,

  /// Where the toolchain wrote the executable.
  pub artifact: PathBuf,
}

/// One-shot build orchestration for a single platform.
pub struct Driver<E: Executor> {
  platform: Platform,
  config: DriverConfig,
  executor: E,
  state: DriverState,
}

impl<E: Executor> Driver<E> {
  pub fn new(platform: Platform, config: DriverConfig, executor: E) -> Self {
    Self {
      platform,
      config,
      executor,
      state: DriverState::NotStarted,
    }
  }

  pub fn state(&self) -> DriverState {
    self.state
  }

  pub fn platform(&self) -> Platform {
    self.platform
  }

  pub fn config(&self) -> &DriverConfig {
    &self.config
  }

  /// Resolve a profile for this driver's platform.
  pub fn resolve(
    &self,
    backend_override: Option<Backend>,
    extra_args: Vec<String>,
  ) -> Result<BuildProfile, ProfileError> {
    resolve_profile(self.platform, backend_override, extra_args)
  }

  /// The exact invocation `invoke` would execute for `profile`.
  pub fn plan(&self, profile: &BuildProfile) -> Invocation {
    Invocation {
      program: self.config.toolchain.clone(),
      args: profile.toolchain_args(),
      cwd: self.config.project_dir.clone(),
    }
  }

  /// Run the toolchain once for `profile`.
  ///
  /// Each call targets the same artifact path for the same profile, so a
  /// repeated invocation overwrites the previous artifact.
  pub fn invoke(&self, profile: &BuildProfile) -> Result<BuildResult, DriverError> {
    let invocation = self.plan(profile);
    info!(backend = %profile.backend(), "invoking toolchain");
    debug!(command = %invocation, cwd = ?invocation.cwd, "toolchain command");

    let status = self.executor.execute(&invocation).map_err(|source| {
      if source.kind() == io::ErrorKind::NotFound {
        DriverError::EnvironmentMissing {
          toolchain: invocation.program.clone(),
        }
      } else {
        DriverError::Launch {
          toolchain: invocation.program.clone(),
          source,
        }
      }
    })?;

    if !status.success() {
      return Err(DriverError::ToolchainFailure { status });
    }

    Ok(BuildResult {
      status,
      artifact: self.config.artifact_path(profile),
    })
  }

  /// Resolve a profile, then invoke the toolchain with it.
  ///
  /// A driver runs once. Calling this again returns
  /// [`DriverError::AlreadyStarted`] without executing anything.
  pub fn run(
    &mut self,
    backend_override: Option<Backend>,
    extra_args: Vec<String>,
  ) -> Result<BuildResult, DriverError> {
    if self.state != DriverState::NotStarted {
      return Err(DriverError::AlreadyStarted);
    }

    self.transition(DriverState::Resolving);
    let profile = match self.resolve(backend_override, extra_args) {
      Ok(profile) => profile,
      Err(e) => {
        self.transition(DriverState::Failed);
        return Err(e.into());
      }
    };

    self.transition(DriverState::Invoking);
    match self.invoke(&profile) {
      Ok(result) => {
        self.transition(DriverState::Succeeded);
        info!(artifact = %result.artifact.display(), "build succeeded");
        Ok(result)
      }
      Err(e) => {
        self.transition(DriverState::Failed);
        Err(e)
      }
    }
  }

  fn transition(&mut self, next: DriverState) {
    debug!(from = %self.state, to = %next, "driver state");
    self.state = next;
  }
}
