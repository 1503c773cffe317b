use std::{ptr::NonNull, slice};

use libc::{c_void, free, malloc};

use crate::error::ProbeError;

/// A fixed-size allocation the runners can fill and report on.
///
/// Dropping the handle gives the memory back to whichever heap produced it.
pub trait BlockHandle {
  /// Writes `byte` over every byte of the allocation.
  fn fill(
    &mut self,
    byte: u8,
  );

  /// Start address, for reporting only.
  fn as_ptr(&self) -> *const u8;

  fn len(&self) -> usize;
}

/// Source of blocks. The runners are generic over this so the tests can
/// watch every allocation and release.
pub trait Heap {
  type Block: BlockHandle;

  fn allocate(
    &mut self,
    size: usize,
  ) -> Result<Self::Block, ProbeError>;
}

/// A block taken straight from the C allocator with `malloc`.
///
/// The block is owned exclusively by whoever holds the value and is
/// `free`d exactly once, on drop.
#[derive(Debug)]
pub struct Block {
  ptr: NonNull<u8>,
  size: usize,
}

impl Block {
  pub fn new(size: usize) -> Result<Self, ProbeError> {
    // malloc(0) may legitimately return null, so ask for at least a byte.
    let raw = unsafe { malloc(size.max(1)) } as *mut u8;

    NonNull::new(raw)
      .map(|ptr| Self { ptr, size })
      .ok_or(ProbeError::AllocationExhausted { size })
  }

  pub fn as_slice(&self) -> &[u8] {
    unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.size) }
  }
}

impl BlockHandle for Block {
  fn fill(
    &mut self,
    byte: u8,
  ) {
    unsafe { self.ptr.as_ptr().write_bytes(byte, self.size) }
  }

  fn as_ptr(&self) -> *const u8 {
    self.ptr.as_ptr()
  }

  fn len(&self) -> usize {
    self.size
  }
}

impl Drop for Block {
  fn drop(&mut self) {
    unsafe { free(self.ptr.as_ptr() as *mut c_void) }
  }
}

/// The process heap, as seen through `malloc`/`free`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LibcHeap;

impl Heap for LibcHeap {
  type Block = Block;

  fn allocate(
    &mut self,
    size: usize,
  ) -> Result<Block, ProbeError> {
    Block::new(size)
  }
}
