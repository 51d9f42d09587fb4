use std::{fmt, path::PathBuf};

#[derive(Debug)]
pub enum Error {
    CommandNotFound(PathBuf),
    DirectoryNotFound(PathBuf),
    HomeNotSet,
    CannotOpenForInput(PathBuf),
    CannotOpenForOutput(PathBuf),
    MissingRedirectTarget(&'static str),
    Io(Option<PathBuf>, std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::CommandNotFound(p) => {
                write!(f, "{}: no such file or directory", p.display())
            }
            Error::DirectoryNotFound(p) => {
                write!(f, "{}: no such file or directory", p.display())
            }
            Error::HomeNotSet => f.write_str("HOME is not set"),
            Error::CannotOpenForInput(p) => {
                write!(f, "cannot open {} for input", p.display())
            }
            Error::CannotOpenForOutput(p) => {
                write!(f, "cannot open {} for output", p.display())
            }
            Error::MissingRedirectTarget(marker) => {
                write!(f, "missing filename after {marker}")
            }
            Error::Io(location, e) => {
                if let Some(path) = location {
                    write!(f, "cannot access '{}': {e}", path.display())
                } else {
                    write!(f, "IO error: {e}")
                }
            }
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(None, err)
    }
}

#[cfg(test)]
mod tests {
    use super::Error;
    use std::path::PathBuf;

    #[test]
    fn user_facing_messages() {
        let cases: &[(Error, &str)] = &[
            (
                Error::CommandNotFound(PathBuf::from("frobnicate")),
                "frobnicate: no such file or directory",
            ),
            (
                Error::DirectoryNotFound(PathBuf::from("/no/where")),
                "/no/where: no such file or directory",
            ),
            (
                Error::CannotOpenForInput(PathBuf::from("missing.txt")),
                "cannot open missing.txt for input",
            ),
            (
                Error::CannotOpenForOutput(PathBuf::from("/denied/out")),
                "cannot open /denied/out for output",
            ),
            (
                Error::MissingRedirectTarget(">"),
                "missing filename after >",
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.to_string(), *expected);
        }
    }
}
