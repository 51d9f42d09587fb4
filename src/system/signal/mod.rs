//! Utilities to handle signals.

mod handler;
pub(crate) mod mode;
mod set;

pub(crate) use handler::{SignalHandler, SignalHandlerBehavior};

pub(crate) type SignalNumber = libc::c_int;

macro_rules! define_consts {
    ($($signal:ident,)*) => {
        pub(crate) mod consts {
            pub(crate) use libc::{$($signal,)*};
        }

        pub(crate) fn signal_name(signal: SignalNumber) -> std::borrow::Cow<'static, str> {
            match signal {
                $(consts::$signal => stringify!($signal).into(),)*
                _ => format!("signal {signal}").into(),
            }
        }
    };
}

define_consts! {
    SIGINT,
    SIGTSTP,
    SIGKILL,
    SIGSTOP,
}

#[cfg(test)]
mod tests {
    use super::{consts::*, signal_name, SignalHandler, SignalHandlerBehavior};
    use crate::cutils::cerr;

    #[test]
    fn names_known_and_unknown_signals() {
        assert_eq!(signal_name(SIGINT), "SIGINT");
        assert_eq!(signal_name(SIGTSTP), "SIGTSTP");
        assert_eq!(signal_name(libc::SIGTERM), "signal 15");
    }

    #[test]
    fn ignored_signal_does_not_terminate() {
        let handler = SignalHandler::register(SIGINT, SignalHandlerBehavior::Ignore).unwrap();
        cerr(unsafe { libc::raise(SIGINT) }).unwrap();
        // still alive; dropping the handler restores the original action
        drop(handler);
    }

    #[test]
    #[should_panic]
    fn kill_action_cannot_be_replaced() {
        let _ = SignalHandler::register(SIGKILL, SignalHandlerBehavior::Ignore);
    }
}
