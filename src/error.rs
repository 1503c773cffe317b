//! Error taxonomy shared by the runners and the command line.

use std::error::Error;
use std::fmt;

/// Everything that can stop a run or reject an invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProbeError {
  /// The allocator could not hand out a block of the requested size.
  AllocationExhausted {
    /// Bytes requested.
    size: usize,
  },
  /// The ledger has no free slot left.
  CapacityExhausted {
    /// Number of slots the ledger was built with.
    capacity: usize,
  },
  /// The mode token is not one we know.
  InvalidInvocation {
    /// What the user passed.
    token: String,
  },
}

impl fmt::Display for ProbeError {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    match self {
      Self::AllocationExhausted { size } => {
        write!(f, "allocator could not provide {size} bytes")
      }
      Self::CapacityExhausted { capacity } => {
        write!(f, "ledger is full ({capacity} slots)")
      }
      Self::InvalidInvocation { token } => {
        write!(f, "unknown mode '{token}' (expected 1, R1, 2 or R2)")
      }
    }
  }
}

impl Error for ProbeError {}
