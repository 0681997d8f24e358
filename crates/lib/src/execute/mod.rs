//! Toolchain execution.
//!
//! The driver never spawns processes itself; it hands an [`Invocation`] to an
//! [`Executor`]. [`ProcessExecutor`] runs real child processes, tests
//! substitute executors that record invocations and simulate exit statuses.

pub mod process;
mod types;

pub use process::{InterruptHandle, ProcessExecutor};
pub use types::*;
