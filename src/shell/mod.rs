use std::io::{self, BufRead};

use crate::common::{Context, Error};
use crate::exec::{spawn_command, SpawnOutcome};
use crate::log::{dev_info, user_error};
use crate::system::signal::{consts::*, mode, SignalHandler, SignalHandlerBehavior};
use crate::system::wait::WaitStatus;

mod builtin;
mod command;
mod jobs;
mod status;

use self::builtin::Builtin;
use self::command::CommandLine;
use self::jobs::JobTable;

pub fn main() {
    crate::log::ShellLogger::new("smallsh: ").into_global_logger();

    match run_shell() {
        Ok(()) => {}
        Err(error) => {
            user_error!("{error}");
            std::process::exit(1);
        }
    }
}

fn run_shell() -> Result<(), Error> {
    // Both dispositions stay installed for the entire session: interrupts
    // must never kill the shell itself, and the terminal-stop signal only
    // toggles foreground-only mode.
    let _ignore_interrupts = SignalHandler::register(SIGINT, SignalHandlerBehavior::Ignore)?;
    let _toggle_mode =
        SignalHandler::register(SIGTSTP, SignalHandlerBehavior::ToggleForegroundMode)?;

    Shell::new(Context::current()).run()
}

/// The prompt loop and the state that survives across its iterations.
struct Shell {
    context: Context,
    jobs: JobTable,
    last_status: WaitStatus,
}

impl Shell {
    fn new(context: Context) -> Shell {
        Shell {
            context,
            jobs: JobTable::new(),
            last_status: WaitStatus::default(),
        }
    }

    /// One iteration: reap finished background children, prompt, read a
    /// line, post-process it, dispatch. Returns on `exit` or end of input;
    /// outstanding background children are deliberately left running.
    fn run(mut self) -> Result<(), Error> {
        let mut input = io::stdin().lock();
        let mut line = String::new();

        loop {
            self.report_finished_jobs();

            print_flush_ignore_io_error!(": ");

            line.clear();
            if input.read_line(&mut line)? == 0 {
                dev_info!("end of input, leaving");
                return Ok(());
            }

            // a leading `#` comments out the whole line
            if line.starts_with('#') {
                continue;
            }

            let Some(command) =
                CommandLine::parse(&line, self.context.shell_pid, mode::foreground_only())
            else {
                continue;
            };

            match Builtin::from_name(&command.words[0]) {
                Some(Builtin::Exit) => {
                    dev_info!("exit requested");
                    return Ok(());
                }
                Some(Builtin::ChangeDir) => builtin::change_directory(
                    &mut self.context,
                    command.words.get(1).map(String::as_str),
                ),
                Some(Builtin::Status) => {
                    println_ignore_io_error!("{}", status::render(&self.last_status))
                }
                None => self.launch(command),
            }
        }
    }

    fn launch(&mut self, command: CommandLine) {
        match spawn_command(command.words, command.background) {
            SpawnOutcome::Foreground(status) => self.last_status = status,
            SpawnOutcome::Background(pid) => self.jobs.register(pid),
            SpawnOutcome::Done => {}
        }
    }

    fn report_finished_jobs(&mut self) {
        for (pid, status) in self.jobs.reap() {
            print_flush_ignore_io_error!("background pid {pid} is done: ");
            println_ignore_io_error!("{}", status::render(&status));
        }
    }
}
