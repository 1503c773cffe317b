use std::{ffi::OsString, process::ExitCode};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use heapprobe::{LibcHeap, Mode, Settings, report, run, signal};

const MODES: &str = "Modes:\n  1 or R1  Balanced allocate/free\n  2 or R2  Controlled leak";

/// Every invocation other than exactly one valid mode token is rejected
/// with the usage text and exit status 1, `--help` included.
#[derive(Parser)]
#[command(name = "heapprobe", disable_help_flag = true, disable_version_flag = true)]
struct Cli {
  /// Workload to run: 1/R1 (balanced) or 2/R2 (controlled leak).
  #[arg(value_name = "MODE")]
  mode: Mode,
}

fn main() -> ExitCode {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

  let args: Vec<OsString> = std::env::args_os().collect();
  if args.len() != 2 {
    eprintln!("error: expected exactly one MODE argument, got {}", args.len().saturating_sub(1));
    print_usage();
    return ExitCode::from(1);
  }

  let cli = match Cli::try_parse_from(&args) {
    Ok(cli) => cli,
    Err(err) => {
      eprint!("{}", err.render());
      print_usage();
      return ExitCode::from(1);
    }
  };

  match try_main(cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      log::error!("{err:#}");
      ExitCode::from(1)
    }
  }
}

fn print_usage() {
  eprintln!("\n{}\n\n{MODES}", Cli::command().render_usage());
}

fn try_main(cli: Cli) -> Result<()> {
  let cancel = signal::install().context("install termination signal handlers")?;
  let settings = Settings::default();

  report::banner(&settings);

  let summary = run(cli.mode, &mut LibcHeap, &settings, cancel);
  log::debug!("{summary:?}");

  if let Some(signum) = signal::received() {
    report::signal_received(signum);
  }

  report::goodbye();

  Ok(())
}
