//! Implementation of the default build command.
//!
//! Resolves a build profile for the host, runs the toolchain once and prints
//! where the artifact was written.

use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use clap::Args;
use tracing::debug;

use clawbuild_lib::consts::{ARTIFACT_NAME, BACKEND_ENV};
use clawbuild_lib::{Backend, Driver, DriverConfig, Platform, ProcessExecutor};

use crate::output::{format_duration, print_info, print_stat, print_step, print_success};

#[derive(Debug, Default, Args)]
pub struct BuildArgs {
  /// Acceleration backend to build with (cpu, metal, cuda, vulkan) [default: native for this platform]
  #[arg(long, value_name = "BACKEND", env = BACKEND_ENV)]
  pub backend: Option<Backend>,

  /// Print the toolchain command without running it
  #[arg(long)]
  pub dry_run: bool,

  /// Extra arguments passed to the toolchain after the generated flags
  #[arg(last = true, value_name = "TOOLCHAIN_ARGS")]
  pub toolchain_args: Vec<String>,
}

/// Execute the build.
///
/// Any error ends the run; the caller maps it to the process exit code.
pub fn cmd_build(args: BuildArgs) -> Result<()> {
  let platform = Platform::current().ok_or_else(|| {
    anyhow!(
      "Unsupported host platform: {}-{}",
      std::env::consts::ARCH,
      std::env::consts::OS
    )
  })?;
  let config = DriverConfig::from_env().context("Failed to load configuration")?;

  let executor = ProcessExecutor::new();
  let interrupt = executor.interrupt_handle();
  let mut driver = Driver::new(platform, config, executor);

  if args.dry_run {
    let profile = driver.resolve(args.backend, args.toolchain_args)?;
    print_info(&format!("Would run: {}", driver.plan(&profile)));
    print_stat("Platform", &platform.triple());
    print_stat("Backend", profile.backend().as_str());
    print_stat("Artifact", &driver.config().artifact_path(&profile).display().to_string());
    return Ok(());
  }

  // Nothing to clean up before the toolchain starts, so exit right away then.
  ctrlc::set_handler(move || {
    if !interrupt.forward() {
      std::process::exit(130);
    }
  })
  .context("Failed to install interrupt handler")?;

  print_step(&format!("Building {} for {}", ARTIFACT_NAME, platform));
  let started = Instant::now();
  let result = driver.run(args.backend, args.toolchain_args)?;
  debug!(state = %driver.state(), "driver finished");

  print_success(&format!("Build finished in {}", format_duration(started.elapsed())));
  print_stat("Artifact", &result.artifact.display().to_string());

  Ok(())
}
