mod cmd;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use clawbuild_lib::DriverError;

use crate::cmd::{BuildArgs, cmd_build, cmd_info};
use crate::output::print_error;

/// clawbuild - Build the clawrs release executable for this host
#[derive(Parser)]
#[command(name = "clawbuild")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Option<Commands>,

  #[command(flatten)]
  build: BuildArgs,
}

#[derive(Subcommand)]
enum Commands {
  /// Show the platform, default backend and artifact path
  Info,
}

fn main() {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  let result = match cli.command {
    Some(Commands::Info) => cmd_info(),
    None => cmd_build(cli.build),
  };

  if let Err(err) = result {
    print_error(&format!("{:#}", err));
    std::process::exit(exit_code(&err));
  }
}

fn init_tracing(verbose: bool) {
  let fallback = if verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}

/// Toolchain failures exit with the toolchain's own code; everything else with 1.
fn exit_code(err: &anyhow::Error) -> i32 {
  err.downcast_ref::<DriverError>().map_or(1, DriverError::exit_code)
}
