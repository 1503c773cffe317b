use crate::error::ProbeError;

/// Bounded, append-only table of owned handles.
///
/// Slots are handed out in order and never reused: the vector length is the
/// next free index. A slot holds `Some(handle)` until it is released, after
/// which it stays `None` for the rest of the run.
///
/// ```text
///   index:  0     1     2     3     4     5     6
///         ┌─────┬─────┬─────┬─────┬─────┬─────┬─────┬ ─ ─ ─ ─ ┐
///         │  -  │ H1  │ H2  │ H3  │ H4  │  -  │ H6  │   free    capacity
///         └─────┴─────┴─────┴─────┴─────┴─────┴─────┴ ─ ─ ─ ─ ┘
///                                                   ▲
///                                                   └── len()
/// ```
#[derive(Debug)]
pub struct Ledger<H> {
  slots: Vec<Option<H>>,
  capacity: usize,
}

impl<H> Ledger<H> {
  pub fn with_capacity(capacity: usize) -> Self {
    Self {
      slots: Vec::with_capacity(capacity),
      capacity,
    }
  }

  /// Stores `handle` in the next free slot and returns its index.
  ///
  /// Fails once every slot has been handed out, whether or not it has been
  /// released since. The handle is dropped in that case.
  pub fn append(
    &mut self,
    handle: H,
  ) -> Result<usize, ProbeError> {
    if self.is_full() {
      return Err(ProbeError::CapacityExhausted {
        capacity: self.capacity,
      });
    }

    let index = self.slots.len();
    self.slots.push(Some(handle));

    Ok(index)
  }

  /// Drops the handle at `index`. Empty or out-of-range slots are left alone.
  pub fn release(
    &mut self,
    index: usize,
  ) {
    if let Some(slot) = self.slots.get_mut(index) {
      drop(slot.take());
    }
  }

  /// Releases every occupied slot in index order and returns how many there
  /// were.
  pub fn release_all(&mut self) -> usize {
    let mut released = 0;

    for slot in &mut self.slots {
      if let Some(handle) = slot.take() {
        drop(handle);
        released += 1;
      }
    }

    released
  }

  /// Occupied slots in index order. Each call starts a fresh scan.
  pub fn occupied(&self) -> impl Iterator<Item = (usize, &H)> + '_ {
    self
      .slots
      .iter()
      .enumerate()
      .filter_map(|(index, slot)| slot.as_ref().map(|handle| (index, handle)))
  }

  pub fn active_count(&self) -> usize {
    self.occupied().count()
  }

  pub fn is_occupied(
    &self,
    index: usize,
  ) -> bool {
    matches!(self.slots.get(index), Some(Some(_)))
  }

  /// Number of slots handed out so far, released or not.
  pub fn len(&self) -> usize {
    self.slots.len()
  }

  pub fn capacity(&self) -> usize {
    self.capacity
  }

  pub fn is_full(&self) -> bool {
    self.slots.len() >= self.capacity
  }
}
