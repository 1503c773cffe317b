use std::{fmt, str::FromStr};

use crate::{
  balanced::run_balanced, block::Heap, cancel::CancellationFlag, config::Settings,
  error::ProbeError, leak::run_leak,
};

/// Which workload to drive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
  /// One block alive at a time, replaced every iteration.
  Balanced,
  /// Growing ledger with periodic fixed-lag eviction.
  Leak,
}

impl FromStr for Mode {
  type Err = ProbeError;

  fn from_str(token: &str) -> Result<Self, Self::Err> {
    let digit = token.strip_prefix(['r', 'R']).unwrap_or(token);

    match digit {
      "1" => Ok(Self::Balanced),
      "2" => Ok(Self::Leak),
      _ => Err(ProbeError::InvalidInvocation {
        token: token.to_owned(),
      }),
    }
  }
}

impl fmt::Display for Mode {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    match self {
      Self::Balanced => f.write_str("Mode 1"),
      Self::Leak => f.write_str("Mode 2"),
    }
  }
}

/// Why a runner left its loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
  Cancelled,
  AllocationFailed,
  CapacityReached,
}

/// What a finished run did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
  pub mode: Mode,
  /// Completed iterations.
  pub iterations: u64,
  /// Blocks still held when the loop ended and freed during cleanup.
  pub released: usize,
  pub stop: StopReason,
}

/// Runs exactly one workload until it is cancelled or cannot continue.
pub fn run<H: Heap>(
  mode: Mode,
  heap: &mut H,
  settings: &Settings,
  cancel: &CancellationFlag,
) -> RunSummary {
  match mode {
    Mode::Balanced => run_balanced(heap, settings, cancel),
    Mode::Leak => run_leak(heap, settings, cancel),
  }
}
