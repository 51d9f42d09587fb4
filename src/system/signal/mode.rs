use std::sync::atomic::{AtomicBool, Ordering};

use super::SignalNumber;

static FOREGROUND_ONLY: AtomicBool = AtomicBool::new(false);

// both notices carry the leading newline because they interrupt a pending
// prompt line
const ENTER_NOTICE: &[u8] = b"\nEntering foreground-only mode (& is now ignored)\n";
const LEAVE_NOTICE: &[u8] = b"\nExiting foreground-only mode\n";

/// Whether the `&` background marker is currently ignored.
///
/// The flag may flip between any two statements of the main loop; callers
/// must read it once per decision and not assume stability across reads.
pub(crate) fn foreground_only() -> bool {
    FOREGROUND_ONLY.load(Ordering::SeqCst)
}

/// The SIGTSTP disposition: flip the execution mode and announce the change.
///
/// Runs in signal-handler context, so it is restricted to async-signal-safe
/// operations: a single atomic flip and a single raw `write(2)`. The notice
/// must not go through the buffered stdout handle.
pub(super) extern "C" fn toggle_foreground_only(_signal: SignalNumber) {
    let was_foreground_only = FOREGROUND_ONLY.fetch_xor(true, Ordering::SeqCst);

    let notice: &[u8] = if was_foreground_only {
        LEAVE_NOTICE
    } else {
        ENTER_NOTICE
    };
    unsafe { libc::write(libc::STDOUT_FILENO, notice.as_ptr().cast(), notice.len()) };
}

#[cfg(test)]
mod tests {
    use super::{foreground_only, toggle_foreground_only};
    use crate::system::signal::consts::SIGTSTP;

    #[test]
    fn flips_on_every_delivery() {
        assert!(!foreground_only());
        toggle_foreground_only(SIGTSTP);
        assert!(foreground_only());
        toggle_foreground_only(SIGTSTP);
        assert!(!foreground_only());
    }
}
