use camino::Utf8PathBuf;
use std::fmt;
use std::io;
use thiserror::Error;

/// Everything which can stop a fill run. None of these are recoverable: the run is abandoned,
/// and anything already copied stays where it is.
///
#[derive(Debug, Error)]
pub enum FillError {
    #[error("incorrect size specification: '{0}'")]
    InvalidSize(String),

    #[error("size specification '{0}' is too large")]
    SizeOverflow(String),

    #[error("failed to read playlist: {0}")]
    PlaylistRead(#[source] io::Error),

    #[error("playlist entry '{0}' is not valid UTF-8 once decoded")]
    Encoding(String),

    #[error("cannot stat {path}: {source}")]
    Stat {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{0} is not a regular file")]
    NotAFile(Utf8PathBuf),

    #[error("{0} has no file name")]
    NoFileName(Utf8PathBuf),

    #[error("cannot get free space on {path}: {source}")]
    FreeSpace {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to copy {src} to {dest}: {source}")]
    Copy {
        src: Utf8PathBuf,
        dest: Utf8PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to list {path}: {source}")]
    Listing {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Loader,
    Device,
    Copy,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorKind::Configuration => "configuration",
            ErrorKind::Loader => "playlist",
            ErrorKind::Device => "device",
            ErrorKind::Copy => "copy",
        };
        write!(f, "{}", label)
    }
}

impl FillError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FillError::InvalidSize(_) | FillError::SizeOverflow(_) => ErrorKind::Configuration,
            FillError::PlaylistRead(_)
            | FillError::Encoding(_)
            | FillError::Stat { .. }
            | FillError::NotAFile(_)
            | FillError::NoFileName(_) => ErrorKind::Loader,
            FillError::FreeSpace { .. } => ErrorKind::Device,
            FillError::CreateDir { .. } | FillError::Copy { .. } | FillError::Listing { .. } => {
                ErrorKind::Copy
            }
        }
    }
}
