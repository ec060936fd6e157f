//! The demonstrations run by the `memio` binary.
//!
//! Each demonstration prints into a [`Transcript`] instead of stdout so the
//! handlers and branches of a guarded region can all write to it through a
//! shared reference. `main` prints the transcript once the demonstration
//! returns, then reports the error if one escaped.

use memio_common::config::DemoSettings;
use memio_common::error::{Error, Result};
use memio_common::guard::{Disposition, Region};
use memio_common::kind;
use memio_common::numeric::{bar, checked_foo, divide, parse_int, validated_foo};
use memio_common::stream::{ByteStream, TextStream};
use std::cell::RefCell;
use std::fmt::{self, Write as _};
use tracing::{debug, warn};

/// Line-oriented output captured in a text stream.
pub struct Transcript {
    out: RefCell<TextStream>,
}

impl Transcript {
    pub fn new() -> Self {
        Self {
            out: RefCell::new(TextStream::new()),
        }
    }

    /// Append one line.
    pub fn say(&self, line: impl fmt::Display) {
        let mut out = self.out.borrow_mut();
        if let Err(e) = writeln!(out, "{line}") {
            warn!(error = %e, "transcript write failed");
        }
    }

    /// Everything said so far.
    pub fn text(&self) -> Result<String> {
        self.out.borrow().getvalue()
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

/// Render bytes the way a bytes literal is written, e.g. `b'\xe4\xb8'`.
pub fn bytes_literal(bytes: &[u8]) -> String {
    let escaped: String = bytes
        .iter()
        .flat_map(|&b| std::ascii::escape_default(b))
        .map(char::from)
        .collect();
    format!("b'{escaped}'")
}

/// Write chunks into a text stream, print the value, then read a seeded
/// stream line by line.
pub fn string_io(t: &Transcript, settings: &DemoSettings) -> Result<()> {
    let mut f = TextStream::new();
    for chunk in &settings.greeting {
        f.write(chunk)?;
    }
    t.say(f.getvalue()?);
    f.close();

    let mut f1 = TextStream::with_initial(settings.seed_text.as_str());
    loop {
        let s = f1.readline()?;
        if s.is_empty() {
            break;
        }
        t.say(s.trim());
    }
    f1.close();
    Ok(())
}

/// Read a seeded byte stream in one go.
pub fn bytes_io(t: &Transcript, settings: &DemoSettings) -> Result<()> {
    let mut f2 = ByteStream::with_initial(settings.seed_bytes.as_slice());
    let data = f2.read()?;
    t.say(bytes_literal(&data));
    t.say(String::from_utf8_lossy(&data));
    f2.close();
    Ok(())
}

/// Division guarded by handlers, a no-error branch and an always branch.
///
/// The divisor is parsed inside the region, so malformed text reaches the
/// value handler and zero reaches the division handler.
pub fn try_divide(t: &Transcript, dividend: i64, divisor: &str) -> Result<()> {
    Region::new(|| {
        t.say("try...");
        let r = divide(dividend, parse_int(divisor)?)?;
        t.say(format_args!("result: {r:?}"));
        Ok(r)
    })
    .except(&kind::ZERO_DIVISION, |e| {
        t.say(format_args!("except: {}", e.message()));
        Disposition::Suppress
    })
    .except(&kind::VALUE, |e| {
        t.say(format_args!("ValueError: {}", e.message()));
        Disposition::Suppress
    })
    .otherwise(|_| t.say("no error"))
    .finally(|| t.say("finally..."))
    .run()?;

    t.say("END");
    Ok(())
}

/// Catch everything two layers above the failure, log it and carry on.
pub fn log_and_continue(t: &Transcript, input: &str) -> Result<()> {
    Region::new(|| bar(input))
        .except(&kind::EXCEPTION, |e| {
            e.log();
            t.say(format_args!("logged: {e}"));
            Disposition::Suppress
        })
        .run()?;

    t.say("END");
    Ok(())
}

/// A broader handler declared first catches what a narrower one was meant
/// for.
pub fn shadowing(t: &Transcript) -> Result<()> {
    Region::new(|| {
        String::from_utf8(vec![0xe4, 0xb8])
            .map_err(|e| Error::new(&kind::UNICODE, e.to_string()))
    })
    .except(&kind::VALUE, |e| {
        t.say(format_args!("ValueError handler caught {}", e.kind()));
        Disposition::Suppress
    })
    .except(&kind::UNICODE, |_| {
        t.say("UnicodeError handler caught it");
        Disposition::Suppress
    })
    .run()?;
    Ok(())
}

/// Raise an application kind and let it reach the top.
pub fn raise(t: &Transcript, input: &str) -> Result<()> {
    let r = checked_foo(input)?;
    t.say(format_args!("result: {r:?}"));
    Ok(())
}

/// Log at an intermediate layer, then re-raise the same error.
pub fn reraise(t: &Transcript, input: &str) -> Result<()> {
    let bar2 = || {
        Region::new(|| validated_foo(input))
            .except(&kind::VALUE, |_| {
                t.say("ValueError!");
                Disposition::Reraise
            })
            .run()
    };
    if let Some(r) = bar2()? {
        t.say(format_args!("result: {r:?}"));
    }
    Ok(())
}

/// Catch a division by zero and raise a value error in its place.
pub fn translate(_t: &Transcript) -> Result<()> {
    Region::new(|| divide(10, 0))
        .except(&kind::ZERO_DIVISION, |_| {
            Disposition::Raise(Error::value("input error!"))
        })
        .run()?;
    Ok(())
}

/// Every demonstration that does not end the run.
pub fn all(t: &Transcript, settings: &DemoSettings) -> Result<()> {
    let divisor = settings.divisor.to_string();
    let sections: [(&str, &dyn Fn() -> Result<()>); 5] = [
        ("string-io", &|| string_io(t, settings)),
        ("bytes-io", &|| bytes_io(t, settings)),
        ("try", &|| try_divide(t, settings.dividend, &divisor)),
        ("log", &|| log_and_continue(t, &settings.input)),
        ("shadowing", &|| shadowing(t)),
    ];

    for (name, run) in sections {
        debug!(demo = name, "running");
        t.say(format_args!("== {name} =="));
        run()?;
    }
    Ok(())
}

// ─── Tests ──────────────────────────────────────────────────────────
