//! Termination signals.
//!
//! SIGINT, SIGTERM and SIGUSR1 are all treated as "stop after this
//! iteration". The handler records which signal arrived and raises the
//! process-wide [`CancellationFlag`]; everything else (reporting, freeing)
//! happens on the main thread once the runner notices.

use std::{
  io, mem, ptr,
  sync::atomic::{AtomicI32, Ordering},
};

use libc::{SA_RESTART, SIGINT, SIGTERM, SIGUSR1, c_int, sigaction, sigemptyset, sighandler_t};

use crate::cancel::CancellationFlag;

/// Signals that request a clean shutdown.
pub const TERMINATION_SIGNALS: [c_int; 3] = [SIGINT, SIGTERM, SIGUSR1];

static SHUTDOWN: CancellationFlag = CancellationFlag::new();
static LAST_SIGNAL: AtomicI32 = AtomicI32::new(0);

extern "C" fn on_termination(signum: c_int) {
  LAST_SIGNAL.store(signum, Ordering::Relaxed);
  SHUTDOWN.cancel();
}

/// Routes every termination signal to the shutdown flag and returns it.
///
/// Calling this more than once is harmless.
pub fn install() -> io::Result<&'static CancellationFlag> {
  for signum in TERMINATION_SIGNALS {
    unsafe {
      let mut action: sigaction = mem::zeroed();
      action.sa_sigaction = on_termination as extern "C" fn(c_int) as sighandler_t;
      action.sa_flags = SA_RESTART;
      sigemptyset(&mut action.sa_mask);

      if sigaction(signum, &action, ptr::null_mut()) != 0 {
        return Err(io::Error::last_os_error());
      }
    }
    log::debug!("handler installed for signal {signum}");
  }

  Ok(&SHUTDOWN)
}

/// Number of the most recent termination signal, if any arrived.
pub fn received() -> Option<c_int> {
  match LAST_SIGNAL.load(Ordering::Relaxed) {
    0 => None,
    signum => Some(signum),
  }
}
