//! Implementation of the `clawbuild info` command.
//!
//! Shows what a build on this host would use without running anything.

use anyhow::{Context, Result};

use clawbuild_lib::{Backend, DriverConfig, Platform, resolve_profile};

use crate::output::{print_info, print_stat};

pub fn cmd_info() -> Result<()> {
  println!("System:");
  let Some(platform) = Platform::current() else {
    println!("Could not detect platform.");
    return Ok(());
  };

  let config = DriverConfig::from_env().context("Failed to load configuration")?;
  let profile = resolve_profile(platform, None, Vec::new())?;
  let supported: Vec<&str> = Backend::supported_on(platform.os).iter().map(Backend::as_str).collect();

  print_stat("Platform", &platform.triple());
  print_stat("Default backend", profile.backend().as_str());
  print_stat("Supported backends", &supported.join(", "));
  print_stat("Toolchain", &config.toolchain);
  print_stat("Artifact", &config.artifact_path(&profile).display().to_string());
  println!();
  print_info("Override the backend with --backend <name> or CLAWBUILD_BACKEND.");

  Ok(())
}
