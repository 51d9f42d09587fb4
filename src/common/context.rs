use std::{env, path::PathBuf};

use crate::log::dev_info;
use crate::system::{process_id, ProcessId};

/// Environment snapshot taken once at startup.
#[derive(Debug)]
pub struct Context {
    pub shell_pid: ProcessId,
    pub home: Option<PathBuf>,
    // informational record only; `cd` acts on the real working directory
    pub working_dir: PathBuf,
}

impl Context {
    pub fn current() -> Context {
        let shell_pid = process_id();
        let home = env::var_os("HOME").map(PathBuf::from);
        let working_dir = env::var_os("PWD")
            .map(PathBuf::from)
            .or_else(|| env::current_dir().ok())
            .unwrap_or_default();

        let context = Context {
            shell_pid,
            home,
            working_dir,
        };

        dev_info!(
            "session started: pid {}, working directory {}",
            context.shell_pid,
            context.working_dir.display()
        );

        context
    }
}
