use std::{
    fs::{File, OpenOptions},
    io,
    os::unix::fs::OpenOptionsExt,
    os::unix::process::CommandExt,
    path::PathBuf,
    process::Command,
};

use crate::{
    common::Error,
    log::{dev_error, dev_info, dev_warn},
    system::{
        _exit, fork,
        signal::{consts::SIGINT, SignalHandler, SignalHandlerBehavior},
        wait::{Wait, WaitError, WaitOptions, WaitStatus},
        ForkResult, ProcessId,
    },
};

/// What became of a spawned command, as far as the prompt loop needs to know.
pub(crate) enum SpawnOutcome {
    /// The command ran in the foreground; its wait status is the new report
    /// of record.
    Foreground(WaitStatus),
    /// The command keeps running in the background under this pid.
    Background(ProcessId),
    /// Nothing left to track (the child was already gone, or it could not be
    /// checked on).
    Done,
}

/// Run an external command in a child process.
///
/// The caller has already dispatched built-ins, so `words` names an external
/// program, possibly followed by arguments and `<`/`>` redirections.
///
/// A failure to create the child process is unrecoverable by design: it is
/// reported and the whole shell terminates with exit code 2.
pub(crate) fn spawn_command(words: Vec<String>, background: bool) -> SpawnOutcome {
    let child_pid = match fork() {
        Ok(ForkResult::Parent(pid)) => pid,
        Ok(ForkResult::Child) => run_child(words),
        Err(err) => {
            eprintln_ignore_io_error!("cannot create child process: {err}");
            std::process::exit(2);
        }
    };

    dev_info!("spawned child process {child_pid}");

    if background {
        match child_pid.wait(WaitOptions::new().no_hang()) {
            Err(WaitError::NotReady) => {
                println_ignore_io_error!("background pid is {child_pid}");
                SpawnOutcome::Background(child_pid)
            }
            Ok((_, status)) => {
                // gone before the first check; nothing is registered or
                // reported for it later
                dev_info!("background child {child_pid} finished immediately: {status:?}");
                SpawnOutcome::Done
            }
            Err(WaitError::Io(err)) => {
                dev_warn!("cannot check on background child {child_pid}: {err}");
                SpawnOutcome::Done
            }
        }
    } else {
        loop {
            match child_pid.wait(WaitOptions::new()) {
                Ok((_, status)) => break SpawnOutcome::Foreground(status),
                Err(WaitError::Io(err)) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(WaitError::Io(err)) => {
                    dev_error!("cannot wait for foreground child {child_pid}: {err}");
                    break SpawnOutcome::Done;
                }
                // a blocking wait never reports NotReady
                Err(WaitError::NotReady) => continue,
            }
        }
    }
}

/// Child-side half of [`spawn_command`]; never returns.
///
/// Every error path writes its own single-line report and terminates the
/// child with exit code 1; nothing propagates to the parent except through
/// the wait status.
fn run_child(mut words: Vec<String>) -> ! {
    // The shell ignores interrupts and `SIG_IGN` survives exec, so the
    // command must get the default action back first.
    match SignalHandler::register(SIGINT, SignalHandlerBehavior::Default) {
        Ok(handler) => handler.forget(),
        Err(err) => dev_warn!("cannot restore default interrupt action: {err}"),
    }

    let redirections = match Redirections::extract(&mut words) {
        Ok(redirections) => redirections,
        Err(err) => {
            eprintln_ignore_io_error!("{err}");
            _exit(1);
        }
    };

    let Some(program) = words.first().cloned() else {
        // the line consisted solely of redirections
        eprintln_ignore_io_error!("missing command name");
        _exit(1);
    };

    let mut command = Command::new(&program);
    command.args(&words[1..]);

    if let Some(path) = redirections.input {
        match File::open(&path) {
            Ok(file) => {
                command.stdin(file);
            }
            Err(_) => {
                eprintln_ignore_io_error!("{}", Error::CannotOpenForInput(path));
                _exit(1);
            }
        }
    }

    if let Some(path) = redirections.output {
        match OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o644)
            .open(&path)
        {
            Ok(file) => {
                command.stdout(file);
            }
            Err(_) => {
                eprintln_ignore_io_error!("{}", Error::CannotOpenForOutput(path));
                _exit(1);
            }
        }
    }

    // PATH lookup and environment inheritance follow execvp semantics
    let err = command.exec();
    dev_warn!("failed to execute {program}: {err}");
    eprintln_ignore_io_error!("{}", Error::CommandNotFound(PathBuf::from(program)));
    _exit(1);
}

/// Redirection targets pulled out of a word list.
#[derive(Debug, Default, PartialEq, Eq)]
struct Redirections {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
}

impl Redirections {
    /// Scan `words` for `<` and `>` markers, each followed by a filename.
    ///
    /// The scan is linear: when a marker appears more than once, the last
    /// occurrence's filename wins. On success `words` is cut off at the
    /// earliest marker, so neither markers nor filenames reach the program.
    fn extract(words: &mut Vec<String>) -> Result<Redirections, Error> {
        let mut redirections = Redirections::default();
        let mut first_marker = None;

        for index in 0..words.len() {
            let marker = match words[index].as_str() {
                ">" => ">",
                "<" => "<",
                _ => continue,
            };

            let Some(filename) = words.get(index + 1) else {
                return Err(Error::MissingRedirectTarget(marker));
            };

            let filename = PathBuf::from(filename);
            if marker == ">" {
                redirections.output = Some(filename);
            } else {
                redirections.input = Some(filename);
            }
            first_marker.get_or_insert(index);
        }

        if let Some(cut) = first_marker {
            words.truncate(cut);
        }

        Ok(redirections)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{spawn_command, Redirections, SpawnOutcome};
    use crate::common::Error;
    use crate::system::wait::{Wait, WaitOptions};

    fn words(line: &str) -> Vec<String> {
        line.split_whitespace().map(str::to_owned).collect()
    }

    #[test]
    fn no_markers_no_changes() {
        let mut args = words("echo one two");
        let redirections = Redirections::extract(&mut args).unwrap();
        assert_eq!(redirections, Redirections::default());
        assert_eq!(args, words("echo one two"));
    }

    #[test]
    fn output_marker_cuts_argument_list() {
        let mut args = words("ls -l > out.txt");
        let redirections = Redirections::extract(&mut args).unwrap();
        assert_eq!(redirections.output, Some("out.txt".into()));
        assert_eq!(redirections.input, None);
        assert_eq!(args, words("ls -l"));
    }

    #[test]
    fn both_markers_in_either_order() {
        let mut args = words("sort < in.txt > out.txt");
        let redirections = Redirections::extract(&mut args).unwrap();
        assert_eq!(redirections.input, Some("in.txt".into()));
        assert_eq!(redirections.output, Some("out.txt".into()));
        assert_eq!(args, words("sort"));

        let mut args = words("sort > out.txt < in.txt");
        let redirections = Redirections::extract(&mut args).unwrap();
        assert_eq!(redirections.input, Some("in.txt".into()));
        assert_eq!(redirections.output, Some("out.txt".into()));
        assert_eq!(args, words("sort"));
    }

    #[test]
    fn last_duplicate_marker_wins() {
        let mut args = words("cat > first > second");
        let redirections = Redirections::extract(&mut args).unwrap();
        assert_eq!(redirections.output, Some("second".into()));
        assert_eq!(args, words("cat"));
    }

    #[test]
    fn marker_without_filename_is_an_error() {
        let mut args = words("wc <");
        let err = Redirections::extract(&mut args).unwrap_err();
        assert!(matches!(err, Error::MissingRedirectTarget("<")));
    }

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn foreground_child_reports_its_exit_status() {
        let SpawnOutcome::Foreground(status) = spawn_command(argv(&["sh", "-c", "exit 7"]), false)
        else {
            panic!("expected a foreground wait status");
        };
        assert_eq!(status.exit_status(), Some(7));
    }

    #[test]
    fn foreground_child_reports_a_signal_death() {
        let SpawnOutcome::Foreground(status) =
            spawn_command(argv(&["sh", "-c", "kill -KILL $$"]), false)
        else {
            panic!("expected a foreground wait status");
        };
        assert_eq!(status.term_signal(), Some(libc::SIGKILL));
    }

    #[test]
    fn background_child_is_handed_back_for_registration() {
        let SpawnOutcome::Background(pid) = spawn_command(words("sleep 0.2"), true) else {
            panic!("expected a background registration");
        };
        let (_, status) = pid.wait(WaitOptions::new()).unwrap();
        assert_eq!(status.exit_status(), Some(0));
    }
}
