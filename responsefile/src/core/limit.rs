//! Decides when an argument list is too long to pass directly.

/// Byte threshold used when no limit is configured.
///
/// Windows caps command lines at around 32KiB.
pub const DEFAULT_ARG_LENGTH_LIMIT: usize = 30 << 10;

/// Resolved form of a configured `arg_length_limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthLimit {
    /// Arguments totalling at most this many bytes are passed directly.
    Bytes(usize),
    /// Any non-empty argument list goes through a response file.
    Always,
}

impl LengthLimit {
    /// `0` selects [`DEFAULT_ARG_LENGTH_LIMIT`], negative values select
    /// [`LengthLimit::Always`], positive values are exact thresholds.
    pub fn from_config(raw: i64) -> Self {
        match raw {
            0 => Self::Bytes(DEFAULT_ARG_LENGTH_LIMIT),
            n if n < 0 => Self::Always,
            n => Self::Bytes(usize::try_from(n).unwrap_or(usize::MAX)),
        }
    }

    /// Whether `total_bytes` of arguments require a response file.
    ///
    /// Zero bytes never do, whatever the limit.
    pub fn exceeded_by(self, total_bytes: usize) -> bool {
        if total_bytes == 0 {
            return false;
        }
        match self {
            Self::Bytes(limit) => total_bytes > limit,
            Self::Always => true,
        }
    }
}

/// Sum of the UTF-8 byte lengths of `args`, without separators.
pub fn total_arg_len(args: &[String]) -> usize {
    args.iter().map(String::len).sum()
}
