//! Instrumented heap for exercising the runners without touching `malloc`.

use std::{
  cell::{Cell, RefCell},
  rc::Rc,
};

use crate::{
  block::{BlockHandle, Heap},
  cancel::CancellationFlag,
  error::ProbeError,
};

/// Shared record of everything the tracking heap has seen.
#[derive(Debug, Default)]
pub struct Probe {
  allocations: Cell<usize>,
  live: Cell<usize>,
  max_live_before_allocation: Cell<usize>,
  released: RefCell<Vec<usize>>,
  unfilled: Cell<usize>,
}

impl Probe {
  pub fn allocations(&self) -> usize {
    self.allocations.get()
  }

  pub fn live(&self) -> usize {
    self.live.get()
  }

  /// Largest number of blocks that were alive when a new one was requested.
  pub fn max_live_before_allocation(&self) -> usize {
    self.max_live_before_allocation.get()
  }

  /// Block ids in the order they were dropped.
  pub fn released(&self) -> Vec<usize> {
    self.released.borrow().clone()
  }

  /// Blocks that were dropped without ever being filled.
  pub fn unfilled(&self) -> usize {
    self.unfilled.get()
  }
}

pub struct TrackedBlock {
  id: usize,
  bytes: Vec<u8>,
  filled: bool,
  probe: Rc<Probe>,
}

impl BlockHandle for TrackedBlock {
  fn fill(
    &mut self,
    byte: u8,
  ) {
    self.bytes.fill(byte);
    self.filled = true;
  }

  fn as_ptr(&self) -> *const u8 {
    self.bytes.as_ptr()
  }

  fn len(&self) -> usize {
    self.bytes.len()
  }
}

impl Drop for TrackedBlock {
  fn drop(&mut self) {
    self.probe.live.set(self.probe.live.get() - 1);
    self.probe.released.borrow_mut().push(self.id);
    if !self.filled {
      self.probe.unfilled.set(self.probe.unfilled.get() + 1);
    }
  }
}

/// Heap whose blocks report back to a [`Probe`].
///
/// Blocks get ids `0, 1, 2, ...` in allocation order, which in leak mode is
/// also their ledger index.
pub struct TrackingHeap<'a> {
  probe: Rc<Probe>,
  fail_at: Option<usize>,
  cancel_after: Option<(usize, &'a CancellationFlag)>,
}

impl<'a> TrackingHeap<'a> {
  pub fn new() -> Self {
    Self {
      probe: Rc::default(),
      fail_at: None,
      cancel_after: None,
    }
  }

  /// Allocation number `n` (zero-based) fails, as do all after it.
  pub fn fail_at(
    mut self,
    n: usize,
  ) -> Self {
    self.fail_at = Some(n);
    self
  }

  /// Raises `flag` from inside the `n`th allocation, the way a signal
  /// landing mid-iteration would.
  pub fn cancel_after(
    mut self,
    n: usize,
    flag: &'a CancellationFlag,
  ) -> Self {
    self.cancel_after = Some((n, flag));
    self
  }

  pub fn probe(&self) -> &Probe {
    &self.probe
  }
}

impl Default for TrackingHeap<'_> {
  fn default() -> Self {
    Self::new()
  }
}

impl Heap for TrackingHeap<'_> {
  type Block = TrackedBlock;

  fn allocate(
    &mut self,
    size: usize,
  ) -> Result<TrackedBlock, ProbeError> {
    let probe = &self.probe;
    let id = probe.allocations.get();

    if self.fail_at.is_some_and(|n| id >= n) {
      return Err(ProbeError::AllocationExhausted { size });
    }

    let live = probe.live.get();
    probe
      .max_live_before_allocation
      .set(probe.max_live_before_allocation.get().max(live));
    probe.live.set(live + 1);
    probe.allocations.set(id + 1);

    if let Some((n, flag)) = self.cancel_after {
      if id + 1 == n {
        flag.cancel();
      }
    }

    Ok(TrackedBlock {
      id,
      bytes: vec![0; size],
      filled: false,
      probe: Rc::clone(probe),
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_default_heap_is_fresh() {
    let mut heap = TrackingHeap::default();

    let block = heap.allocate(8).unwrap();

    assert_eq!(heap.probe().allocations(), 1);
    assert_eq!(heap.probe().live(), 1);
    drop(block);
    assert_eq!(heap.probe().released(), vec![0]);
    assert_eq!(heap.probe().unfilled(), 1);
  }
}
