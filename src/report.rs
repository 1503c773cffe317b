//! Console output.
//!
//! Progress and summaries go to stdout so they can be read next to `pmap`,
//! `htop` or `/proc/<pid>/status`. Conditions that end a run early go
//! through `log`.

use libc::{c_void, sbrk};

use crate::{config::Settings, error::ProbeError, run::Mode};

/// Current program break, i.e. the top of the `brk` heap.
pub fn program_break() -> *mut c_void {
  unsafe { sbrk(0) }
}

pub fn banner(settings: &Settings) {
  println!("=== heapprobe ===");
  println!("PID: {}", std::process::id());
  println!("Block size: {} bytes", settings.block_size);
  println!("Delay: {} ns", settings.delay.as_nanos());
  println!("Program break: {:?}\n", program_break());
}

pub fn mode_header(
  mode: Mode,
  settings: &Settings,
) {
  match mode {
    Mode::Balanced => {
      println!("[{mode}] Balanced allocate/free cycle");
    }
    Mode::Leak => {
      println!("[{mode}] Controlled leak");
      println!("Every {}th block is released", settings.eviction_period);
    }
  }
  println!("Press Ctrl+C to stop\n");
}

pub fn balanced_progress(
  iteration: u64,
  addr: *const u8,
  size: usize,
) {
  println!("[Iteration {iteration}] Allocated block {addr:?}, size: {size} bytes");
}

pub fn leak_progress(
  iteration: u64,
  active: usize,
  block_size: usize,
) {
  println!(
    "[Iteration {iteration}] Active blocks: {active}, leaked: ~{} KiB",
    active * block_size / 1024
  );
}

pub fn allocation_failed(
  iteration: u64,
  err: &ProbeError,
) {
  log::error!("allocation failed at iteration {iteration}: {err}");
}

pub fn capacity_reached(capacity: usize) {
  log::warn!("block limit reached ({capacity})");
}

pub fn last_block_released() {
  println!("[Shutdown] Released the last block");
}

pub fn mode_finished(
  mode: Mode,
  iterations: u64,
) {
  println!("[{mode}] Finished after {iterations} iterations");
}

pub fn ledger_cleared(released: usize) {
  println!("[Cleanup] Released {released} blocks");
}

pub fn signal_received(signum: i32) {
  log::info!("received signal {signum}, memory has been released");
}

pub fn goodbye() {
  println!("Program break: {:?}", program_break());
  println!("\n=== heapprobe finished cleanly ===");
}
