//! # heapprobe - Watch the Heap Breathe
//!
//! This crate drives the C heap (`malloc`/`free`) through two synthetic
//! workloads so its behaviour can be watched from the outside with tools such
//! as `pmap`, `htop`, `valgrind` or `/proc/<pid>/smaps`.
//!
//! ## Modes
//!
//! ```text
//!   Mode 1 - balanced                 Mode 2 - controlled leak
//!
//!   live blocks                       live blocks
//!     │                                 │                        ╱
//!   1 ┤ ─────────────────────           │                   ╱
//!     │                                 │              ╱
//!     │                                 │         ╱
//!     │                                 │    ╱
//!   0 ┼──────────────────────▶ t      0 ┼╱──────────────────────▶ t
//!
//!   allocate new, free old            keep 4 of every 5, free the rest
//!                                     at shutdown or when the ledger
//!                                     is full
//! ```
//!
//! Every block is `BLOCK_SIZE` bytes and filled with `0xAB` right after it is
//! allocated, so each of its pages is actually touched and the pattern is easy
//! to spot in a memory dump.
//!
//! ## Crate Structure
//!
//! ```text
//!   heapprobe
//!   ├── block     - Block handle over malloc/free, Heap trait
//!   ├── ledger    - Bounded slot table used by the leak mode
//!   ├── cancel    - Cooperative stop flag
//!   ├── signal    - SIGINT/SIGTERM/SIGUSR1 -> stop flag
//!   ├── balanced  - Mode 1 runner
//!   ├── leak      - Mode 2 runner
//!   ├── run       - Mode selection and run summary
//!   ├── report    - Console output
//!   ├── config    - Compile-time constants
//!   └── error     - ProbeError
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use heapprobe::{LibcHeap, Mode, Settings, run, signal};
//!
//! let cancel = signal::install().unwrap();
//! let summary = run(Mode::Leak, &mut LibcHeap, &Settings::default(), cancel);
//! println!("{summary:?}");
//! ```
//!
//! ## Stopping
//!
//! Signals only raise a flag. A runner looks at the flag before starting each
//! iteration, so the iteration in progress always finishes, and all cleanup
//! and reporting happens on the main thread afterwards.
//!
//! ```text
//!   signal ──▶ flag = true
//!                  │
//!   ┌──────────────▼───────────────┐
//!   │ while !flag { iteration() }  │──▶ free remaining blocks ──▶ summary
//!   └──────────────────────────────┘
//! ```
//!
//! ## Limitations
//!
//! - **Unix-only**: uses `libc` for `malloc`, `sbrk` and `sigaction`
//! - **Single-threaded**: one runner owns all of its blocks
//! - **Fixed shape**: block size, delay and ledger size are constants

pub mod balanced;
pub mod block;
pub mod cancel;
pub mod config;
pub mod error;
pub mod leak;
pub mod ledger;
pub mod report;
pub mod run;
pub mod signal;

#[cfg(test)]
mod testing;

pub use block::{Block, BlockHandle, Heap, LibcHeap};
pub use cancel::CancellationFlag;
pub use config::Settings;
pub use error::ProbeError;
pub use ledger::Ledger;
pub use run::{Mode, RunSummary, StopReason, run};
