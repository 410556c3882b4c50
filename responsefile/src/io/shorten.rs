//! Collapse long argument lists into a single `@path` response file.

use std::borrow::Cow;
use std::env;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::{Builder, TempPath};
use tracing::{debug, instrument, warn};

use crate::core::escape::append_encoded;
use crate::core::limit::{LengthLimit, total_arg_len};
use crate::error::{ResponseFileError, Result};

const TEMP_FILE_PREFIX: &str = "responsefile";

/// Parameters for [`shorten`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShortenOptions {
    /// Number of argument bytes which can be passed directly without a
    /// response file.
    ///
    /// `0` selects [`DEFAULT_ARG_LENGTH_LIMIT`](crate::core::limit::DEFAULT_ARG_LENGTH_LIMIT).
    /// A negative value always creates a response file, unless every
    /// argument is empty.
    pub arg_length_limit: i64,

    /// Directory for response files. Defaults to the OS temp dir.
    pub temp_dir: Option<PathBuf>,
}

impl ShortenOptions {
    /// Resolve `arg_length_limit` into the policy [`shorten`] applies.
    pub fn effective_limit(&self) -> LengthLimit {
        LengthLimit::from_config(self.arg_length_limit)
    }

    fn temp_dir(&self) -> PathBuf {
        self.temp_dir.clone().unwrap_or_else(env::temp_dir)
    }
}

/// Owns the response file created by [`shorten`], if there is one.
///
/// Call [`release`](Self::release) once the shortened arguments are no
/// longer needed. A handle that is dropped without being released removes
/// the file as well, so no exit path leaves it behind.
#[derive(Debug)]
#[must_use = "dropping the handle removes the response file"]
pub struct ReleaseHandle {
    file: Option<TempPath>,
}

impl ReleaseHandle {
    fn noop() -> Self {
        Self { file: None }
    }

    /// True when no response file was created.
    pub fn is_noop(&self) -> bool {
        self.file.is_none()
    }

    /// Path of the response file, if one was created.
    pub fn path(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    /// Delete the response file. Removal failures are logged, not returned.
    pub fn release(self) {
        let Some(file) = self.file else {
            return;
        };
        let path = file.to_path_buf();
        match file.close() {
            Ok(()) => debug!(path = %path.display(), "removed response file"),
            Err(err) => warn!(path = %path.display(), err = %err, "failed to remove response file"),
        }
    }

    /// Leave the response file on disk and return its path.
    ///
    /// The caller becomes responsible for removing it.
    pub fn keep(self) -> io::Result<Option<PathBuf>> {
        match self.file {
            Some(file) => file.keep().map(Some).map_err(|err| err.error),
            None => Ok(None),
        }
    }
}

/// Result of [`shorten`]: the arguments to pass on, plus the handle that
/// owns any response file they reference.
#[derive(Debug)]
pub struct Shortened<'a> {
    /// Either the input list unchanged, or a single `@path` argument.
    pub args: Cow<'a, [String]>,
    pub release: ReleaseHandle,
}

impl Shortened<'_> {
    /// True when `args` is a single `@path` backed by a new response file.
    pub fn used_response_file(&self) -> bool {
        !self.release.is_noop()
    }
}

/// Produce an argument list that uses a response file if `args` is too long.
///
/// When the arguments fit within the limit they are returned borrowed and
/// the handle is a no-op. Otherwise every argument is encoded onto its own
/// line in a new temporary file and the returned list is `["@<path>"]`.
///
/// On error nothing is left on disk and no handle is returned.
#[instrument(skip_all, fields(args = args.len()))]
pub fn shorten<'a>(args: &'a [String], opts: &ShortenOptions) -> Result<Shortened<'a>> {
    let total = total_arg_len(args);
    let limit = opts.effective_limit();
    if !limit.exceeded_by(total) {
        debug!(total, ?limit, "arguments fit without a response file");
        return Ok(Shortened {
            args: Cow::Borrowed(args),
            release: ReleaseHandle::noop(),
        });
    }

    // At least every argument plus its newline.
    let mut buf = String::with_capacity(total + args.len());
    for arg in args {
        append_encoded(&mut buf, arg);
        buf.push('\n');
    }

    let file = write_response_file(&buf, &opts.temp_dir())?;
    let reference = reference_arg(&file)?;
    debug!(total, ?limit, path = %file.display(), "wrote response file");
    Ok(Shortened {
        args: Cow::Owned(vec![reference]),
        release: ReleaseHandle { file: Some(file) },
    })
}

/// Create a uniquely named file in `dir` holding `contents`.
///
/// Until the returned path is handed out, any early return drops the
/// `NamedTempFile`, which removes the file (best-effort).
fn write_response_file(contents: &str, dir: &Path) -> Result<TempPath> {
    let mut file = Builder::new()
        .prefix(TEMP_FILE_PREFIX)
        .tempfile_in(dir)
        .map_err(|source| ResponseFileError::TempFileCreate {
            dir: dir.to_path_buf(),
            source,
        })?;

    if let Err(source) = file.write_all(contents.as_bytes()) {
        return Err(ResponseFileError::TempFileWrite {
            path: file.path().to_path_buf(),
            source,
        });
    }
    // The handle itself is closed by `into_temp_path`, which cannot fail;
    // flushing to disk is where a deferred write error would surface.
    if let Err(source) = file.as_file().sync_all() {
        return Err(ResponseFileError::TempFileClose {
            path: file.path().to_path_buf(),
            source,
        });
    }
    Ok(file.into_temp_path())
}

/// `@<path>`, rejecting paths that would not survive a round trip through a `String`.
fn reference_arg(file: &TempPath) -> Result<String> {
    match file.to_str() {
        Some(path) => Ok(format!("@{path}")),
        // `file` is dropped by the caller on this path, removing it.
        None => Err(ResponseFileError::TempFileCreate {
            dir: file.parent().map(Path::to_path_buf).unwrap_or_default(),
            source: io::Error::new(
                io::ErrorKind::InvalidData,
                "response file path is not valid UTF-8",
            ),
        }),
    }
}
