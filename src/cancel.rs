use std::sync::atomic::{AtomicBool, Ordering};

/// One-way stop request, checked by the runners between iterations.
///
/// Setting it is a single atomic store, so it is safe to do from a signal
/// handler. Once set it stays set. Relaxed ordering is enough: the flag only
/// gates whether another iteration starts and publishes no other data.
#[derive(Debug, Default)]
pub struct CancellationFlag {
  cancelled: AtomicBool,
}

impl CancellationFlag {
  pub const fn new() -> Self {
    Self {
      cancelled: AtomicBool::new(false),
    }
  }

  pub fn cancel(&self) {
    self.cancelled.store(true, Ordering::Relaxed);
  }

  pub fn is_cancelled(&self) -> bool {
    self.cancelled.load(Ordering::Relaxed)
  }
}
