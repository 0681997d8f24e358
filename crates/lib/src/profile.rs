//! Build profile resolution.
//!
//! A [`BuildProfile`] is resolved once per run from the host [`Platform`] and
//! an optional backend override. It is never mutated afterwards.

use std::fmt;

use thiserror::Error;
use tracing::debug;

use crate::backend::Backend;
use crate::platform::Platform;

/// Optimization level passed to the toolchain.
///
/// Only release builds are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OptLevel {
  #[default]
  Release,
}

impl OptLevel {
  /// The toolchain flag selecting this level.
  pub fn flag(&self) -> &'static str {
    match self {
      Self::Release => "--release",
    }
  }

  /// The directory under `target/` the toolchain writes to.
  pub fn dir_name(&self) -> &'static str {
    match self {
      Self::Release => "release",
    }
  }
}

impl fmt::Display for OptLevel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.dir_name())
  }
}

/// Errors raised while resolving a profile.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
  /// The requested backend cannot be built on this platform.
  #[error("backend '{backend}' is not supported on {platform}")]
  UnsupportedBackend { backend: Backend, platform: Platform },
}

/// The resolved configuration for one toolchain invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildProfile {
  opt_level: OptLevel,
  backend: Backend,
  platform: Platform,
  extra_args: Vec<String>,
}

impl BuildProfile {
  pub fn opt_level(&self) -> OptLevel {
    self.opt_level
  }

  pub fn backend(&self) -> Backend {
    self.backend
  }

  /// The platform this profile was resolved for.
  pub fn platform(&self) -> Platform {
    self.platform
  }

  /// Arguments appended verbatim after the generated flags.
  pub fn extra_args(&self) -> &[String] {
    &self.extra_args
  }

  /// Whether the backend is the one the toolchain selects on its own.
  pub fn uses_default_backend(&self) -> bool {
    self.backend == Backend::default_for(self.platform.os)
  }

  /// Toolchain flags selecting the backend.
  ///
  /// Empty when the backend is already the platform default. Moving from an
  /// accelerated default down to the CPU baseline has to switch the default
  /// features off instead.
  pub fn backend_args(&self) -> Vec<String> {
    if self.uses_default_backend() {
      return Vec::new();
    }
    match self.backend.feature() {
      Some(feature) => vec!["--features".to_string(), feature.to_string()],
      None => vec!["--no-default-features".to_string()],
    }
  }

  /// The full toolchain argument list for this profile.
  pub fn toolchain_args(&self) -> Vec<String> {
    let mut args = vec!["build".to_string(), self.opt_level.flag().to_string()];
    args.extend(self.backend_args());
    args.extend(self.extra_args.iter().cloned());
    args
  }
}

/// Resolve the build profile for `platform`.
///
/// Without an override the platform default backend is selected. An override
/// is validated against the platform and rejected with
/// [`ProfileError::UnsupportedBackend`] when it cannot be built there.
pub fn resolve_profile(
  platform: Platform,
  backend_override: Option<Backend>,
  extra_args: Vec<String>,
) -> Result<BuildProfile, ProfileError> {
  let backend = match backend_override {
    Some(backend) if !backend.is_supported_on(platform.os) => {
      return Err(ProfileError::UnsupportedBackend { backend, platform });
    }
    Some(backend) => backend,
    None => Backend::default_for(platform.os),
  };

  debug!(%platform, %backend, overridden = backend_override.is_some(), "resolved build profile");

  Ok(BuildProfile {
    opt_level: OptLevel::Release,
    backend,
    platform,
    extra_args,
  })
}
