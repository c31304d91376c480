use std::{
    error,
    fmt::{self, Display, Formatter},
    io,
    path::PathBuf,
};

use crate::host::HostError;

/// Failures surfaced by skeleton operations.
///
/// The `Empty*` variants are validation errors raised at the point of
/// assignment, `MissingDocument` and `Io` cover the filesystem,
/// `Host` wraps name resolution failures in the live environment and
/// `NoLiveHost` marks operations that need one but were run detached.
#[derive(Debug)]
pub enum Error {
    EmptyName,
    EmptyPrefix,
    EmptyDataPath,
    EmptyBatch,
    NoLiveHost,
    Host(HostError),
    MissingDocument(PathBuf),
    NotADirectory(PathBuf),
    Io(io::Error),
    Document(serde_json::Error),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyName => write!(f, "Joint name must not be empty"),
            Error::EmptyPrefix => write!(f, "Skeleton prefix must not be empty"),
            Error::EmptyDataPath => write!(f, "Data path must not be empty"),
            Error::EmptyBatch => write!(f, "Skeleton batch must not be empty"),
            Error::NoLiveHost => write!(f, "No live host attached"),
            Error::Host(error) => Display::fmt(error, f),
            Error::MissingDocument(path) => {
                write!(f, "No document found at path {}", path.display())
            }
            Error::NotADirectory(path) => {
                write!(f, "Path {} is not a directory", path.display())
            }
            Error::Io(error) => Display::fmt(error, f),
            Error::Document(error) => write!(f, "Malformed document: {}", error),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Host(error) => Some(error),
            Error::Io(error) => Some(error),
            Error::Document(error) => Some(error),
            _ => None,
        }
    }
}

impl From<HostError> for Error {
    fn from(value: HostError) -> Self {
        Self::Host(value)
    }
}

impl From<io::Error> for Error {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Self::Document(value)
    }
}
