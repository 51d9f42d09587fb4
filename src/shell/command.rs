use crate::system::ProcessId;

/// One prompt cycle's worth of input, ready for dispatch.
///
/// Lives for a single iteration of the prompt loop.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct CommandLine {
    pub(crate) words: Vec<String>,
    pub(crate) background: bool,
}

impl CommandLine {
    /// Split a raw line into words and apply the two post-processing steps:
    /// pid expansion and background-marker handling.
    ///
    /// `foreground_only` is sampled by the caller right before parsing; the
    /// marker is stripped either way, but it only requests background
    /// execution while the flag is off.
    ///
    /// Returns `None` when no words remain (a blank line, or a lone `&`).
    pub(crate) fn parse(line: &str, pid: ProcessId, foreground_only: bool) -> Option<CommandLine> {
        let mut words: Vec<String> = line.split_whitespace().map(str::to_owned).collect();

        expand_pid(&mut words, pid);
        let background = strip_background_marker(&mut words) && !foreground_only;

        if words.is_empty() {
            return None;
        }

        Some(CommandLine { words, background })
    }
}

/// Replace the first `$$` on the line with the shell's pid.
///
/// Only the first occurrence across the whole line is expanded; any further
/// `$$` pairs are left alone. This mirrors the historical behavior and is a
/// documented limitation, not an oversight.
fn expand_pid(words: &mut [String], pid: ProcessId) {
    for word in words.iter_mut() {
        if let Some(at) = word.find("$$") {
            word.replace_range(at..at + 2, &pid.to_string());
            return;
        }
    }
}

/// Remove a trailing standalone `&`, reporting whether one was present.
fn strip_background_marker(words: &mut Vec<String>) -> bool {
    if words.last().is_some_and(|word| word == "&") {
        words.pop();
        true
    } else {
        false
    }
}
