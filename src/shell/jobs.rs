use crate::log::dev_warn;
use crate::system::wait::{Wait, WaitError, WaitOptions, WaitStatus};
use crate::system::ProcessId;

/// The background children still pending a reap, in launch order.
pub(crate) struct JobTable {
    pids: Vec<ProcessId>,
}

impl JobTable {
    pub(crate) const fn new() -> JobTable {
        JobTable { pids: Vec::new() }
    }

    /// Track a freshly launched background child.
    pub(crate) fn register(&mut self, pid: ProcessId) {
        debug_assert!(!self.pids.contains(&pid));
        self.pids.push(pid);
    }

    /// Poll every tracked child once, without blocking.
    ///
    /// Children whose wait confirms termination are removed and returned in
    /// launch order; children still running stay registered untouched. Each
    /// pid is therefore reported exactly once.
    pub(crate) fn reap(&mut self) -> Vec<(ProcessId, WaitStatus)> {
        let mut finished = Vec::new();

        self.pids.retain(|&pid| match pid.wait(WaitOptions::new().no_hang()) {
            Ok((_, status)) => {
                finished.push((pid, status));
                false
            }
            Err(WaitError::NotReady) => true,
            Err(WaitError::Io(err)) => {
                // nothing more can be learned about this child; dropping the
                // entry beats polling it forever
                dev_warn!("cannot wait for background child {pid}: {err}");
                false
            }
        });

        finished
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::JobTable;
    use crate::system::ProcessId;

    fn spawn_exiting_with(code: u8) -> ProcessId {
        let child = std::process::Command::new("sh")
            .args(["-c", &format!("exit {code}")])
            .spawn()
            .unwrap();
        ProcessId::new(child.id() as libc::pid_t)
    }

    #[test]
    fn reports_finished_children_in_launch_order() {
        let mut jobs = JobTable::new();
        let first = spawn_exiting_with(3);
        let second = spawn_exiting_with(4);
        jobs.register(first);
        jobs.register(second);

        // give both children time to finish, then reap them in one pass
        std::thread::sleep(Duration::from_millis(300));
        let finished = jobs.reap();

        let pids: Vec<ProcessId> = finished.iter().map(|(pid, _)| *pid).collect();
        assert_eq!(pids, [first, second]);
        assert_eq!(finished[0].1.exit_status(), Some(3));
        assert_eq!(finished[1].1.exit_status(), Some(4));

        // reported exactly once: a second pass finds nothing
        assert!(jobs.reap().is_empty());
    }

    #[test]
    fn running_children_stay_registered() {
        let mut jobs = JobTable::new();
        let mut child = std::process::Command::new("sleep").arg("5").spawn().unwrap();
        let pid = ProcessId::new(child.id() as libc::pid_t);
        jobs.register(pid);

        assert!(jobs.reap().is_empty());

        child.kill().unwrap();
        let finished = loop {
            let finished = jobs.reap();
            if !finished.is_empty() {
                break finished;
            }
            std::thread::sleep(Duration::from_millis(10));
        };
        assert_eq!(finished[0].0, pid);
        assert_eq!(finished[0].1.term_signal(), Some(libc::SIGKILL));
    }
}
