//! Stream contract tests: line reading, write concatenation, mode checks
//! and release semantics.

use memio_common::kind;
use memio_common::stream::{ByteStream, TextStream};

/// Test: N terminators → N+1 readline calls yield lines, then the sentinel
/// repeats.
#[test]
fn readline_yields_each_line_then_sentinel() {
    for content in ["", "a", "a\n", "a\nb", "a\n\nb\n", "\n\n\n"] {
        let terminators = content.matches('\n').count();
        let mut f = TextStream::with_initial(content);

        let mut lines = Vec::new();
        for _ in 0..=terminators {
            lines.push(f.readline().unwrap());
        }

        assert_eq!(lines.concat(), content, "content {content:?}");
        let last = lines.last().unwrap();
        if content.ends_with('\n') || content.is_empty() {
            assert_eq!(last, "", "content {content:?}");
        }
        assert_eq!(f.readline().unwrap(), "");
        assert_eq!(f.readline().unwrap(), "");
    }
}

#[test]
fn greeting_example_end_to_end() {
    let mut f = TextStream::with_initial("Hello!\nHi!\nGoodbye!");
    let mut printed = Vec::new();
    loop {
        let s = f.readline().unwrap();
        if s.is_empty() {
            break;
        }
        printed.push(s.trim().to_string());
    }
    f.close();

    assert_eq!(printed, ["Hello!", "Hi!", "Goodbye!"]);
}

#[test]
fn getvalue_is_concatenation_of_writes() {
    let chunks = ["", "alpha", "\n", "βeta", "", "γ\n"];
    let mut f = TextStream::new();
    for chunk in chunks {
        f.write(chunk).unwrap();
    }
    assert_eq!(f.getvalue().unwrap(), chunks.concat());

    let mut b = ByteStream::new();
    b.write(&[0u8, 1]).unwrap();
    b.write(&vec![2u8]).unwrap();
    b.write(b"\xff").unwrap();
    assert_eq!(b.getvalue().unwrap(), [0, 1, 2, 0xff]);
}

#[test]
fn wrong_element_type_is_type_error_and_preserves_content() {
    let mut text = TextStream::new();
    text.write("ok").unwrap();
    let err = text.write(b"\x00").unwrap_err();
    assert!(err.is(&kind::TYPE));
    assert!(!err.is(&kind::VALUE));
    assert_eq!(text.getvalue().unwrap(), "ok");

    let mut bytes = ByteStream::new();
    bytes.write(b"ok").unwrap();
    let err = bytes.write("text").unwrap_err();
    assert!(err.is(&kind::TYPE));
    assert_eq!(bytes.getvalue().unwrap(), b"ok");
}

#[test]
fn read_then_readline_sees_end() {
    let mut f = ByteStream::with_initial(b"\xe4\xb8\xad\xe6\x96\x87".to_vec());
    let all = f.read().unwrap();
    assert_eq!(String::from_utf8(all).unwrap(), "中文");
    assert!(f.readline().unwrap().is_empty());
}

#[test]
fn lines_iterator_matches_readline() {
    let mut f = TextStream::with_initial("x\ny\nz");
    let lines: Vec<String> = f.lines().collect::<Result<_, _>>().unwrap();
    assert_eq!(lines, ["x\n", "y\n", "z"]);
    assert_eq!(f.readline().unwrap(), "");
}

#[test]
fn released_stream_is_unusable() {
    let mut f = ByteStream::with_initial(vec![1, 2, 3]);
    f.close();
    let err = f.read().unwrap_err();
    assert!(err.is(&kind::VALUE));
    assert!(f.is_closed());
}
