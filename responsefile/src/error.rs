//! Errors reported by shortening and expansion.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub type Result<T, E = ResponseFileError> = std::result::Result<T, E>;

/// Failure of a [`shorten`](crate::shorten) or [`expand`](crate::expand) call.
///
/// Every variant is terminal for the call that produced it; nothing is
/// retried and no partial result is returned alongside it.
#[derive(Debug, Error)]
pub enum ResponseFileError {
    #[error("cannot create response file in {}", .dir.display())]
    TempFileCreate {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write response file {}", .path.display())]
    TempFileWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot close response file {}", .path.display())]
    TempFileClose {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read response file {}", .path.display())]
    ResponseFileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(
        "unsupported escape sequence {sequence:?} in {}:{line}:{column}",
        .path.display()
    )]
    UnsupportedEscapeSequence {
        path: PathBuf,
        /// 1-based line number within the response file.
        line: usize,
        /// 1-based char column of the backslash.
        column: usize,
        sequence: String,
    },

    #[error(
        "response file {} is nested more than {max_depth} levels deep",
        .path.display()
    )]
    NestingTooDeep { path: PathBuf, max_depth: usize },
}

impl ResponseFileError {
    /// Path of the response file the error is about.
    pub fn path(&self) -> &Path {
        match self {
            Self::TempFileCreate { dir, .. } => dir.as_path(),
            Self::TempFileWrite { path, .. }
            | Self::TempFileClose { path, .. }
            | Self::ResponseFileRead { path, .. }
            | Self::UnsupportedEscapeSequence { path, .. }
            | Self::NestingTooDeep { path, .. } => path.as_path(),
        }
    }
}
