//! Driver configuration.
//!
//! Configuration comes from the environment and is loaded once by the caller,
//! then handed to the [`Driver`](crate::driver::Driver) explicitly.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::consts::{ARTIFACT_NAME, DEFAULT_TOOLCHAIN, PROJECT_DIR_ENV, TARGET_DIR, TOOLCHAIN_ENV};
use crate::profile::BuildProfile;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("project directory {path} is not accessible: {source}")]
  ProjectDir {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

/// Where and with what the toolchain runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverConfig {
  /// Toolchain executable, resolved through `PATH` when not a path.
  pub toolchain: String,

  /// Directory the toolchain runs in. `None` means the current directory.
  pub project_dir: Option<PathBuf>,
}

impl Default for DriverConfig {
  fn default() -> Self {
    Self {
      toolchain: DEFAULT_TOOLCHAIN.to_string(),
      project_dir: None,
    }
  }
}

impl DriverConfig {
  /// Load configuration from the environment.
  ///
  /// - `CLAWBUILD_TOOLCHAIN`, then `CARGO`, then `cargo`
  /// - `CLAWBUILD_PROJECT_DIR`, canonicalized; unset means the current directory
  ///
  /// Empty values count as unset.
  pub fn from_env() -> Result<Self, ConfigError> {
    let toolchain = non_empty_var(TOOLCHAIN_ENV)
      .or_else(|| non_empty_var("CARGO"))
      .unwrap_or_else(|| DEFAULT_TOOLCHAIN.to_string());

    let config = Self::default().with_toolchain(toolchain);
    let config = match non_empty_var(PROJECT_DIR_ENV) {
      Some(dir) => config.with_project_dir(dir)?,
      None => config,
    };

    debug!(toolchain = %config.toolchain, project_dir = ?config.project_dir, "loaded driver config");
    Ok(config)
  }

  pub fn with_toolchain(mut self, toolchain: impl Into<String>) -> Self {
    self.toolchain = toolchain.into();
    self
  }

  /// Run the toolchain in `dir`, which must exist.
  pub fn with_project_dir(mut self, dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let dir = dir.as_ref();
    let canonical = dunce::canonicalize(dir).map_err(|source| ConfigError::ProjectDir {
      path: dir.to_path_buf(),
      source,
    })?;
    self.project_dir = Some(canonical);
    Ok(self)
  }

  /// The path the toolchain writes the artifact to for `profile`.
  ///
  /// Relative (`target/release/clawrs`) when no project directory is set.
  pub fn artifact_path(&self, profile: &BuildProfile) -> PathBuf {
    let relative = artifact_relative_path(profile);
    match &self.project_dir {
      Some(dir) => dir.join(relative),
      None => relative,
    }
  }
}

fn artifact_relative_path(profile: &BuildProfile) -> PathBuf {
  Path::new(TARGET_DIR)
    .join(profile.opt_level().dir_name())
    .join(format!("{}{}", ARTIFACT_NAME, profile.platform().os.exe_suffix()))
}

fn non_empty_var(name: &str) -> Option<String> {
  std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::platform::Platform;
  use crate::platform::arch::Arch;
  use crate::platform::os::Os;
  use crate::profile::resolve_profile;
  use serial_test::serial;
  use tempfile::TempDir;

  #[test]
  #[serial]
  fn toolchain_env_takes_precedence() {
    temp_env::with_vars(
      [
        (TOOLCHAIN_ENV, Some("/opt/bin/cargo-nightly")),
        ("CARGO", Some("/usr/bin/cargo")),
        (PROJECT_DIR_ENV, None),
      ],
      || {
        let config = DriverConfig::from_env().unwrap();
        assert_eq!(config.toolchain, "/opt/bin/cargo-nightly");
        assert_eq!(config.project_dir, None);
      },
    );
  }

  #[test]
  #[serial]
  fn falls_back_to_cargo_env_then_default() {
    temp_env::with_vars(
      [(TOOLCHAIN_ENV, Some("")), ("CARGO", Some("/usr/bin/cargo")), (PROJECT_DIR_ENV, None)],
      || {
        assert_eq!(DriverConfig::from_env().unwrap().toolchain, "/usr/bin/cargo");
      },
    );

    temp_env::with_vars(
      [(TOOLCHAIN_ENV, None::<&str>), ("CARGO", None), (PROJECT_DIR_ENV, None)],
      || {
        assert_eq!(DriverConfig::from_env().unwrap().toolchain, "cargo");
      },
    );
  }

  #[test]
  #[serial]
  fn project_dir_is_canonicalized() {
    let temp = TempDir::new().unwrap();
    let expected = dunce::canonicalize(temp.path()).unwrap();

    temp_env::with_var(PROJECT_DIR_ENV, Some(temp.path()), || {
      let config = DriverConfig::from_env().unwrap();
      assert_eq!(config.project_dir, Some(expected.clone()));
    });
  }

  #[test]
  #[serial]
  fn missing_project_dir_is_an_error() {
    temp_env::with_var(PROJECT_DIR_ENV, Some("/nonexistent/clawbuild/project"), || {
      let err = DriverConfig::from_env().unwrap_err();
      assert!(err.to_string().contains("/nonexistent/clawbuild/project"));
    });
  }

  #[test]
  fn artifact_path_is_fixed_relative_path() {
    let profile = resolve_profile(Platform::new(Arch::Aarch64, Os::MacOs), None, vec![]).unwrap();
    let config = DriverConfig::default();
    assert_eq!(config.artifact_path(&profile), PathBuf::from("target/release/clawrs"));
  }

  #[test]
  fn artifact_path_has_exe_suffix_on_windows() {
    let profile = resolve_profile(Platform::new(Arch::X86_64, Os::Windows), None, vec![]).unwrap();
    let config = DriverConfig::default();
    assert_eq!(
      config.artifact_path(&profile),
      Path::new("target").join("release").join("clawrs.exe")
    );
  }

  #[test]
  fn artifact_path_is_under_project_dir() {
    let temp = TempDir::new().unwrap();
    let config = DriverConfig::default().with_project_dir(temp.path()).unwrap();
    let profile = resolve_profile(Platform::new(Arch::X86_64, Os::Linux), None, vec![]).unwrap();
    let dir = dunce::canonicalize(temp.path()).unwrap();
    assert_eq!(config.artifact_path(&profile), dir.join("target").join("release").join("clawrs"));
  }
}
