//! Response files: `@path` arguments backed by newline-separated files.
//!
//! Programs such as GCC, MSVC tools, Go's compiler and linker, and ninja
//! accept an argument of the form `@path` in place of the arguments stored in
//! `path`, one per line. This works around command-line length limits,
//! notably the ~32KiB limit on Windows. Arguments may contain newlines, so
//! backslashes and newlines are escaped as `\\` and `\n`. Nested response
//! files are supported when expanding.
//!
//! - **[`core`]**: Pure logic (line codec, length policy). No I/O.
//! - **[`io`]**: Temp file creation, file reads, configuration and child
//!   processes.
//!
//! [`shorten`] and [`expand`] are inverses:
//!
//! ```no_run
//! use responsefile::{ExpandOptions, ShortenOptions, expand, shorten};
//!
//! # fn main() -> responsefile::Result<()> {
//! let args = vec!["-o".to_string(), "out\nfile".to_string()];
//! let opts = ShortenOptions { arg_length_limit: -1, ..Default::default() };
//! let shortened = shorten(&args, &opts)?;
//! assert_eq!(shortened.args.len(), 1);
//! let expanded = expand(&shortened.args, &ExpandOptions::default())?;
//! assert_eq!(&*expanded, args.as_slice());
//! shortened.release.release();
//! # Ok(())
//! # }
//! ```
//!
//! Quoting and `#` comments, which some readers support, are not supported.

pub mod core;
pub mod error;
pub mod exit_codes;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use crate::error::{ResponseFileError, Result};
pub use crate::io::expand::{ExpandOptions, FsReader, ResponseFileReader, expand, expand_with};
pub use crate::io::shorten::{ReleaseHandle, ShortenOptions, Shortened, shorten};
