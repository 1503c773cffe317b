//! Compile-time tunables.
//!
//! None of these are exposed on the command line. [`Settings`] gathers them
//! so the runners can take them by reference, and so tests can shrink the
//! ledger or drop the throttle delay.

use std::time::Duration;

/// Size of every block, in bytes.
pub const BLOCK_SIZE: usize = 4096;

/// Number of slots in the leak-mode ledger.
pub const MAX_BLOCKS: usize = 10_000;

/// Pause between iterations, in nanoseconds.
pub const DELAY_NS: u64 = 500_000;

/// Byte written over every freshly allocated block.
pub const FILL_BYTE: u8 = 0xAB;

/// How far behind the newest slot the leak runner evicts.
pub const EVICTION_LAG: usize = 5;

/// Leak runner evicts once every this many iterations.
pub const EVICTION_PERIOD: u64 = 5;

/// Leak runner prints progress once every this many iterations.
pub const LEAK_REPORT_PERIOD: u64 = 100;

/// Balanced runner prints progress once every this many iterations.
pub const BALANCED_REPORT_PERIOD: u64 = 1000;

/// Runtime view of the constants above.
///
/// A period of `0` disables the action it schedules.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
  pub block_size: usize,
  pub max_blocks: usize,
  pub delay: Duration,
  pub fill_byte: u8,
  pub eviction_lag: usize,
  pub eviction_period: u64,
  pub leak_report_period: u64,
  pub balanced_report_period: u64,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      block_size: BLOCK_SIZE,
      max_blocks: MAX_BLOCKS,
      delay: Duration::from_nanos(DELAY_NS),
      fill_byte: FILL_BYTE,
      eviction_lag: EVICTION_LAG,
      eviction_period: EVICTION_PERIOD,
      leak_report_period: LEAK_REPORT_PERIOD,
      balanced_report_period: BALANCED_REPORT_PERIOD,
    }
  }
}

/// True when `iteration` lands on a multiple of a non-zero `period`.
pub(crate) fn is_due(
  iteration: u64,
  period: u64,
) -> bool {
  period != 0 && iteration % period == 0
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_defaults_match_constants() {
    let settings = Settings::default();

    assert_eq!(settings.block_size, 4096);
    assert_eq!(settings.max_blocks, 10_000);
    assert_eq!(settings.delay, Duration::from_micros(500));
    assert_eq!(settings.fill_byte, 0xAB);
    assert_eq!(settings.eviction_lag, 5);
    assert_eq!(settings.eviction_period, 5);
    assert_eq!(settings.leak_report_period, 100);
    assert_eq!(settings.balanced_report_period, 1000);
  }

  #[test]
  fn test_is_due() {
    assert!(!is_due(4, 5));
    assert!(is_due(5, 5));
    assert!(is_due(10, 5));
    assert!(!is_due(10, 0));
  }
}
