//! Hardware-acceleration backends.
//!
//! Each backend maps to a cargo feature of the clawrs package. Backend
//! availability depends only on the host operating system.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::platform::os::Os;

/// Acceleration backend compiled into the artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
  /// Portable baseline, available everywhere.
  Cpu,
  /// Apple GPU compute; native on macOS.
  Metal,
  /// NVIDIA GPU compute.
  Cuda,
  /// Cross-vendor GPU compute.
  Vulkan,
}

/// Returned when a backend name does not match any known backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown backend '{name}' (expected one of: cpu, metal, cuda, vulkan)")]
pub struct BackendParseError {
  pub name: String,
}

impl Backend {
  pub const ALL: [Backend; 4] = [Self::Cpu, Self::Metal, Self::Cuda, Self::Vulkan];

  /// Returns the lowercase name used on the command line.
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Cpu => "cpu",
      Self::Metal => "metal",
      Self::Cuda => "cuda",
      Self::Vulkan => "vulkan",
    }
  }

  /// The cargo feature enabling this backend, if any.
  pub fn feature(&self) -> Option<&'static str> {
    match self {
      Self::Cpu => None,
      Self::Metal => Some("metal"),
      Self::Cuda => Some("cuda"),
      Self::Vulkan => Some("vulkan"),
    }
  }

  /// The backend selected when no override is given.
  ///
  /// Metal is a default feature of the package on macOS, so the toolchain
  /// enables it without any flag.
  pub fn default_for(os: Os) -> Self {
    match os {
      Os::MacOs => Self::Metal,
      Os::Linux | Os::Windows => Self::Cpu,
    }
  }

  /// Whether this backend can be built on `os`.
  pub fn is_supported_on(&self, os: Os) -> bool {
    match self {
      Self::Cpu => true,
      Self::Metal => os == Os::MacOs,
      Self::Cuda | Self::Vulkan => matches!(os, Os::Linux | Os::Windows),
    }
  }

  /// All backends that can be built on `os`, in declaration order.
  pub fn supported_on(os: Os) -> Vec<Backend> {
    Self::ALL.into_iter().filter(|b| b.is_supported_on(os)).collect()
  }
}

impl fmt::Display for Backend {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl FromStr for Backend {
  type Err = BackendParseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let name = s.trim().to_ascii_lowercase();
    Self::ALL
      .into_iter()
      .find(|b| b.as_str() == name)
      .ok_or_else(|| BackendParseError { name: s.to_string() })
  }
}
