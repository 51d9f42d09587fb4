use std::path::PathBuf;

use crate::common::{Context, Error};
use crate::log::{dev_info, dev_warn};

/// The commands the shell runs itself instead of spawning a child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Builtin {
    Exit,
    ChangeDir,
    Status,
}

impl Builtin {
    /// Exact match on the first word of a command; anything else is an
    /// external program.
    pub(crate) fn from_name(name: &str) -> Option<Builtin> {
        match name {
            "exit" => Some(Builtin::Exit),
            "cd" => Some(Builtin::ChangeDir),
            "status" => Some(Builtin::Status),
            _ => None,
        }
    }
}

/// `cd [dir]`: change to `dir`, or to `$HOME` when no argument is given.
///
/// On failure the recorded working directory is left untouched; on success
/// it is refreshed from the real working directory.
pub(crate) fn change_directory(context: &mut Context, target: Option<&str>) {
    let path = match target {
        Some(target) => PathBuf::from(target),
        None => match context.home.clone() {
            Some(home) => home,
            None => {
                eprintln_ignore_io_error!("{}", Error::HomeNotSet);
                return;
            }
        },
    };

    if std::env::set_current_dir(&path).is_err() {
        eprintln_ignore_io_error!("{}", Error::DirectoryNotFound(path));
        return;
    }

    match std::env::current_dir() {
        Ok(working_dir) => {
            dev_info!("working directory now {}", working_dir.display());
            context.working_dir = working_dir;
        }
        Err(err) => dev_warn!("cannot read the new working directory: {err}"),
    }
}
