//! clawbuild-lib: Core types and logic for the clawrs build driver
//!
//! This crate turns "build clawrs for this host" into exactly one toolchain
//! invocation:
//! - `Platform`: the detected host (OS and CPU architecture)
//! - `Backend`: the hardware-acceleration backend compiled into the artifact
//! - `BuildProfile`: the resolved, immutable flags for one build
//! - `Driver`: the one-shot state machine that resolves, invokes and reports

pub mod backend;
pub mod config;
pub mod consts;
pub mod driver;
pub mod execute;
pub mod platform;
pub mod profile;
pub mod util;

pub use backend::{Backend, BackendParseError};
pub use config::DriverConfig;
pub use driver::{BuildResult, Driver, DriverError, DriverState};
pub use execute::{ExitStatus, Executor, Invocation, ProcessExecutor};
pub use platform::Platform;
pub use profile::{BuildProfile, OptLevel, ProfileError, resolve_profile};
