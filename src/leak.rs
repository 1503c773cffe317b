use std::thread;

use crate::{
  block::{BlockHandle, Heap},
  cancel::CancellationFlag,
  config::{Settings, is_due},
  ledger::Ledger,
  report,
  run::{Mode, RunSummary, StopReason},
};

/// Grows a ledger of blocks, freeing one every few iterations.
///
/// Every `eviction_period` iterations the block `eviction_lag` slots behind
/// the newest is released. With the default lag and period of five that
/// frees one block in five, so the live set grows by four blocks every five
/// iterations:
///
/// ```text
///   after iteration 5:   [ - ][ 1 ][ 2 ][ 3 ][ 4 ]
///   after iteration 10:  [ - ][ 1 ][ 2 ][ 3 ][ 4 ][ - ][ 6 ][ 7 ][ 8 ][ 9 ]
/// ```
///
/// The loop ends on cancellation, allocation failure, or once every ledger
/// slot has been handed out. Whatever is still held is released before
/// returning, so the growth never outlives the run.
pub fn run_leak<H: Heap>(
  heap: &mut H,
  settings: &Settings,
  cancel: &CancellationFlag,
) -> RunSummary {
  report::mode_header(Mode::Leak, settings);

  let mut ledger: Ledger<H::Block> = Ledger::with_capacity(settings.max_blocks);
  let mut iterations: u64 = 0;
  let mut stop = StopReason::Cancelled;

  while !cancel.is_cancelled() {
    if ledger.is_full() {
      stop = StopReason::CapacityReached;
      break;
    }

    let mut block = match heap.allocate(settings.block_size) {
      Ok(block) => block,
      Err(err) => {
        report::allocation_failed(iterations, &err);
        stop = StopReason::AllocationFailed;
        break;
      }
    };

    block.fill(settings.fill_byte);

    if ledger.append(block).is_err() {
      stop = StopReason::CapacityReached;
      break;
    }
    iterations += 1;

    if is_due(iterations, settings.eviction_period) && ledger.len() >= settings.eviction_lag {
      let index = ledger.len() - settings.eviction_lag;
      log::debug!("evicting slot {index}");
      ledger.release(index);
    }

    if is_due(iterations, settings.leak_report_period) {
      report::leak_progress(iterations, ledger.active_count(), settings.block_size);
    }

    thread::sleep(settings.delay);
  }

  if ledger.is_full() {
    report::capacity_reached(ledger.capacity());
  }

  report::mode_finished(Mode::Leak, iterations);

  let released = ledger.release_all();
  report::ledger_cleared(released);

  RunSummary {
    mode: Mode::Leak,
    iterations,
    released,
    stop,
  }
}
