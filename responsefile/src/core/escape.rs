//! Line codec for response files.
//!
//! Every argument is stored on exactly one line: a literal backslash becomes
//! `\\`, a literal newline becomes `\n`, and every other char is copied
//! verbatim.

use std::borrow::Cow;

use thiserror::Error;

/// Malformed escape found while decoding a single line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported escape sequence: {sequence:?}")]
pub struct DecodeError {
    /// The offending sequence, e.g. `\t`. A lone `\` at end of line is
    /// reported as just `\`.
    pub sequence: String,
    /// 1-based char column of the backslash that starts the sequence.
    pub column: usize,
}

/// Encode one argument as a single response file line.
///
/// Arguments without backslashes or newlines are returned as-is.
pub fn encode_arg(arg: &str) -> Cow<'_, str> {
    if !needs_escaping(arg) {
        return Cow::Borrowed(arg);
    }
    let mut buf = String::with_capacity(arg.len() + 2);
    append_encoded(&mut buf, arg);
    Cow::Owned(buf)
}

/// Append the encoded form of `arg` to `buf`.
pub fn append_encoded(buf: &mut String, arg: &str) {
    if !needs_escaping(arg) {
        buf.push_str(arg);
        return;
    }
    for ch in arg.chars() {
        match ch {
            '\\' => buf.push_str("\\\\"),
            '\n' => buf.push_str("\\n"),
            _ => buf.push(ch),
        }
    }
}

/// Decode one line (already split on `\n` and CR-stripped) back into an argument.
pub fn decode_line(line: &str) -> Result<Cow<'_, str>, DecodeError> {
    if !line.contains('\\') {
        return Ok(Cow::Borrowed(line));
    }

    let mut buf = String::with_capacity(line.len());
    let mut escape_start: Option<usize> = None;
    for (index, ch) in line.chars().enumerate() {
        let column = index + 1;
        match escape_start.take() {
            Some(start) => match ch {
                '\\' => buf.push('\\'),
                'n' => buf.push('\n'),
                other => {
                    return Err(DecodeError {
                        sequence: format!("\\{other}"),
                        column: start,
                    });
                }
            },
            None if ch == '\\' => escape_start = Some(column),
            None => buf.push(ch),
        }
    }
    if let Some(start) = escape_start {
        return Err(DecodeError {
            sequence: "\\".to_string(),
            column: start,
        });
    }
    Ok(Cow::Owned(buf))
}

fn needs_escaping(arg: &str) -> bool {
    arg.contains(['\\', '\n'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_args_are_borrowed() {
        assert!(matches!(encode_arg("plain arg"), Cow::Borrowed("plain arg")));
        assert!(matches!(decode_line("plain arg"), Ok(Cow::Borrowed("plain arg"))));
    }

    #[test]
    fn encode_escapes_backslash_and_newline_only() {
        assert_eq!(encode_arg("a\\b"), "a\\\\b");
        assert_eq!(encode_arg("line1\nline2"), "line1\\nline2");
        assert_eq!(encode_arg("tab\there\r"), "tab\there\r");
        assert_eq!(encode_arg("\\n"), "\\\\n");
    }

    #[test]
    fn encode_never_emits_a_newline() {
        for arg in ["\n", "\n\n\\", "trailing\n", "\\\n\\"] {
            assert!(!encode_arg(arg).contains('\n'), "encoded {arg:?}");
        }
    }

    #[test]
    fn append_encoded_extends_existing_buffer() {
        let mut buf = "first\n".to_string();
        append_encoded(&mut buf, "sec\nond");
        assert_eq!(buf, "first\nsec\\nond");
    }

    /// Decoding an encoded arg must give back the original for every
    /// special char the codec knows about, plus ones it must leave alone.
    #[test]
    fn decode_reverses_encode() {
        let cases = [
            "",
            "simple",
            "\\",
            "\\\\",
            "\n",
            "back\\slash and new\nline",
            "\\n literally",
            "carriage\r\nreturn\r",
            "ünïcödé ✓ 日本語",
            "@not-a-path\\",
        ];
        for arg in cases {
            let encoded = encode_arg(arg);
            let decoded = decode_line(&encoded).expect("decode");
            assert_eq!(decoded, arg, "round trip of {arg:?} via {encoded:?}");
        }
    }

    #[test]
    fn decode_rejects_unknown_escapes() {
        let err = decode_line("ab\\tc").expect_err("unsupported escape");
        assert_eq!(err.sequence, "\\t");
        assert_eq!(err.column, 3);

        let err = decode_line("ok\\\\\\r").expect_err("unsupported escape");
        assert_eq!(err.sequence, "\\r");
        assert_eq!(err.column, 5);
    }

    #[test]
    fn decode_rejects_trailing_backslash() {
        let err = decode_line("dangling\\").expect_err("trailing escape");
        assert_eq!(err.sequence, "\\");
        assert_eq!(err.column, 9);
        assert_eq!(err.to_string(), "unsupported escape sequence: \"\\\\\"");
    }

    #[test]
    fn decode_columns_count_chars_not_bytes() {
        let err = decode_line("é\\x").expect_err("unsupported escape");
        assert_eq!(err.column, 2);
        assert_eq!(err.sequence, "\\x");
    }
}
