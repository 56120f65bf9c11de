use std::fmt::Display;
use std::path::PathBuf;

pub trait ErrorType: Display + PartialEq {}

// An error tagged with the file it came from
#[derive(Debug, PartialEq)]
pub struct Error<T: ErrorType> {
    pub file: PathBuf,
    pub error: T,
}

impl<T: ErrorType> Display for Error<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\x1b[31;49;1m[{}]\x1b[39;49;1m  {}\x1b[0m", self.file.display(), self.error)
    }
}
