use std::thread;

use crate::{
  block::{BlockHandle, Heap},
  cancel::CancellationFlag,
  config::{Settings, is_due},
  report,
  run::{Mode, RunSummary, StopReason},
};

/// Allocates a fresh block every iteration and frees the previous one.
///
/// ```text
///   iteration:    1        2        3        4
///               ┌───┐    ┌───┐    ┌───┐    ┌───┐
///   allocate    │ A │    │ B │    │ C │    │ D │
///               └───┘    └───┘    └───┘    └───┘
///   free          -        A        B        C
///   alive         A        B        C        D
/// ```
///
/// The new block is filled before the old one is freed. Between iterations
/// at most one block is alive; after the function returns none are.
pub fn run_balanced<H: Heap>(
  heap: &mut H,
  settings: &Settings,
  cancel: &CancellationFlag,
) -> RunSummary {
  report::mode_header(Mode::Balanced, settings);

  let mut previous: Option<H::Block> = None;
  let mut iterations: u64 = 0;
  let mut stop = StopReason::Cancelled;

  while !cancel.is_cancelled() {
    let mut block = match heap.allocate(settings.block_size) {
      Ok(block) => block,
      Err(err) => {
        report::allocation_failed(iterations, &err);
        stop = StopReason::AllocationFailed;
        break;
      }
    };

    block.fill(settings.fill_byte);

    let (addr, size) = (block.as_ptr(), block.len());
    drop(previous.replace(block));
    iterations += 1;

    if is_due(iterations, settings.balanced_report_period) {
      report::balanced_progress(iterations, addr, size);
    }

    thread::sleep(settings.delay);
  }

  let released = match previous.take() {
    Some(block) => {
      drop(block);
      report::last_block_released();
      1
    }
    None => 0,
  };

  report::mode_finished(Mode::Balanced, iterations);

  RunSummary {
    mode: Mode::Balanced,
    iterations,
    released,
    stop,
  }
}
