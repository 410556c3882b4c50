//! Shorten → expand round trips through real temporary files.
//!
//! Every case checks whether a response file was expected, then expands the
//! shortened list and compares it with the original.

use responsefile::test_support::args;
use responsefile::{ExpandOptions, ShortenOptions, expand, shorten};

struct Case {
    arg_length_limit: i64,
    args: Vec<String>,
    want_response_file: bool,
}

fn case(arg_length_limit: i64, items: &[&str], want_response_file: bool) -> Case {
    Case {
        arg_length_limit,
        args: args(items),
        want_response_file,
    }
}

#[test]
fn shorten_then_expand_restores_args() {
    let cases = [
        case(0, &[], false),
        case(0, &["foo", "bar", "baz"], false),
        case(20, &["foo", "bar", "baz"], false),
        case(9, &["foo", "bar", "baz"], false),
        case(8, &["foo", "bar", "baz"], true),
        case(2, &["foo", "bar", "baz"], true),
        case(-1, &[], false),
        case(-1, &[""], false),
        case(-1, &["", ""], false),
        case(-1, &["foo", "bar", "baz"], true),
        case(-1, &["", "x", ""], true),
        case(
            -1,
            &["multi\nline", "back\\slash", "\\n", "crlf\r\n", "ünïcödé ✓"],
            true,
        ),
    ];

    let temp = tempfile::tempdir().expect("tempdir");
    for test in cases {
        let opts = ShortenOptions {
            arg_length_limit: test.arg_length_limit,
            temp_dir: Some(temp.path().to_path_buf()),
        };
        let shortened = shorten(&test.args, &opts).expect("shorten");
        assert_eq!(
            shortened.used_response_file(),
            test.want_response_file,
            "limit {} args {:?}",
            test.arg_length_limit,
            test.args
        );
        if test.want_response_file {
            assert_eq!(shortened.args.len(), 1);
            assert!(shortened.args[0].starts_with('@'));
        } else {
            assert_eq!(&*shortened.args, test.args.as_slice());
        }

        let expanded = expand(&shortened.args, &ExpandOptions::default()).expect("expand");
        assert_eq!(&*expanded, test.args.as_slice(), "round trip of {:?}", test.args);
        shortened.release.release();
    }
    assert_eq!(
        std::fs::read_dir(temp.path()).expect("read dir").count(),
        0,
        "every response file was released"
    );
}

#[test]
fn default_limit_shortens_large_lists() {
    let temp = tempfile::tempdir().expect("tempdir");
    let opts = ShortenOptions {
        arg_length_limit: 0,
        temp_dir: Some(temp.path().to_path_buf()),
    };
    let big: Vec<String> = (0..4096).map(|i| format!("--flag-{i:05}")).collect();
    let shortened = shorten(&big, &opts).expect("shorten");
    assert!(shortened.used_response_file());

    let expanded = expand(&shortened.args, &ExpandOptions::default()).expect("expand");
    assert_eq!(&*expanded, big.as_slice());
    shortened.release.release();
}

/// The handle is still released when expansion of the shortened list fails later on.
#[test]
fn release_after_failed_expand() {
    let temp = tempfile::tempdir().expect("tempdir");
    let opts = ShortenOptions {
        arg_length_limit: -1,
        temp_dir: Some(temp.path().to_path_buf()),
    };
    let input = args(&["ok", "@/definitely/missing/file"]);
    let shortened = shorten(&input, &opts).expect("shorten");
    let path = shortened.release.path().expect("path").to_path_buf();

    let result = expand(&shortened.args, &ExpandOptions::default());
    assert!(result.is_err());
    shortened.release.release();
    assert!(!path.exists());
}
