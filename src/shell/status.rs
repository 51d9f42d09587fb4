use crate::system::wait::WaitStatus;

/// Format a wait status the way the `status` built-in and the background
/// reaper report it.
///
/// A plain `waitpid` only reports exits and signal deaths, so those are the
/// only two shapes rendered.
pub(crate) fn render(status: &WaitStatus) -> String {
    match status.exit_status() {
        Some(code) => format!("exit value {code}"),
        None => format!("terminated by signal {}", status.term_signal().unwrap_or(0)),
    }
}
