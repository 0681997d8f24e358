/// Executable produced by a successful build.
pub const ARTIFACT_NAME: &str = "clawrs";

/// Toolchain invoked when neither `CLAWBUILD_TOOLCHAIN` nor `CARGO` is set.
pub const DEFAULT_TOOLCHAIN: &str = "cargo";

/// Directory (relative to the project) the toolchain writes into.
pub const TARGET_DIR: &str = "target";

pub const TOOLCHAIN_ENV: &str = "CLAWBUILD_TOOLCHAIN";
pub const PROJECT_DIR_ENV: &str = "CLAWBUILD_PROJECT_DIR";
pub const BACKEND_ENV: &str = "CLAWBUILD_BACKEND";
