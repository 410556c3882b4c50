//! Replace `@path` arguments with the arguments stored in those files.

use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::core::escape::decode_line;
use crate::error::{ResponseFileError, Result};

/// Source of response file contents.
pub trait ResponseFileReader {
    fn read(&self, path: &Path) -> io::Result<String>;
}

/// Reads response files from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsReader;

impl ResponseFileReader for FsReader {
    fn read(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }
}

/// Parameters for [`expand`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpandOptions {
    /// Deepest allowed chain of response files; a top-level `@path` is depth 1.
    ///
    /// `None` is unbounded. A file that references itself then recurses
    /// until the stack is exhausted.
    pub max_depth: Option<usize>,
}

/// Expand response files in `args` from the local filesystem.
///
/// See [`expand_with`].
pub fn expand<'a>(args: &'a [String], opts: &ExpandOptions) -> Result<Cow<'a, [String]>> {
    expand_with(args, opts, &FsReader)
}

/// Produce an argument list with every `@path` argument replaced by the
/// arguments in that file, recursively.
///
/// Arguments not starting with `@` are passed through untouched; if there
/// are none that do, `args` is returned borrowed. Any read or decode
/// failure aborts the whole call.
#[instrument(skip_all, fields(args = args.len()))]
pub fn expand_with<'a, R>(
    args: &'a [String],
    opts: &ExpandOptions,
    reader: &R,
) -> Result<Cow<'a, [String]>>
where
    R: ResponseFileReader + ?Sized,
{
    let Some(first) = args.iter().position(|arg| arg.starts_with('@')) else {
        return Ok(Cow::Borrowed(args));
    };

    let expander = Expander {
        reader,
        max_depth: opts.max_depth,
    };
    let mut expanded = Vec::with_capacity(args.len() * 2);
    expanded.extend_from_slice(&args[..first]);
    for arg in &args[first..] {
        match arg.strip_prefix('@') {
            Some(path) => expander.expand_file(Path::new(path), 1, &mut expanded)?,
            None => expanded.push(arg.clone()),
        }
    }
    debug!(expanded = expanded.len(), "expanded response files");
    Ok(Cow::Owned(expanded))
}

struct Expander<'r, R: ?Sized> {
    reader: &'r R,
    max_depth: Option<usize>,
}

impl<R: ResponseFileReader + ?Sized> Expander<'_, R> {
    fn expand_file(&self, path: &Path, depth: usize, out: &mut Vec<String>) -> Result<()> {
        if let Some(max_depth) = self.max_depth {
            if depth > max_depth {
                return Err(ResponseFileError::NestingTooDeep {
                    path: path.to_path_buf(),
                    max_depth,
                });
            }
        }

        let contents = self
            .reader
            .read(path)
            .map_err(|source| ResponseFileError::ResponseFileRead {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(path = %path.display(), depth, bytes = contents.len(), "reading response file");

        // An empty file has no lines, and a final newline does not start one.
        for (index, line) in contents.split_terminator('\n').enumerate() {
            let line = line.strip_suffix('\r').unwrap_or(line);
            let arg =
                decode_line(line).map_err(|err| ResponseFileError::UnsupportedEscapeSequence {
                    path: path.to_path_buf(),
                    line: index + 1,
                    column: err.column,
                    sequence: err.sequence,
                })?;
            match arg.strip_prefix('@') {
                Some(nested) => self.expand_file(Path::new(nested), depth + 1, out)?,
                None => out.push(arg.into_owned()),
            }
        }
        Ok(())
    }
}
