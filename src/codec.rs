//! JSON wire format.
//!
//! Clients of the movie service compare bodies byte-for-byte, so encoding is
//! pinned down more tightly than `serde_json::to_vec` would give us:
//!
//! - every encoded value is followed by a single `\n`;
//! - `<`, `>` and `&` inside strings are written as `\u003c`, `\u003e` and
//!   `\u0026`, and the JavaScript line terminators U+2028 / U+2029 as
//!   `\u2028` / `\u2029`, so a body can be embedded in an HTML page as-is.
//!
//! Decoding is lenient in the opposite direction: it never fails. Only the
//! first JSON value of a body is read, and anything that does not decode
//! becomes the type's zero value.

use std::io;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::Formatter;
use tracing::debug;

/// Encodes `value` as compact JSON with HTML-safe escaping and a trailing newline.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(128);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, HtmlSafeFormatter);
    value.serialize(&mut ser)?;
    buf.push(b'\n');
    Ok(buf)
}

/// Decodes the first JSON value in `body`, or returns `T::default()`.
///
/// Bytes after the first value are never looked at, so `{"id":"1"} junk`
/// decodes the same as `{"id":"1"}`. Empty bodies, syntax errors and type
/// mismatches all yield the zero value; the error is logged and dropped.
pub fn decode_or_default<T: DeserializeOwned + Default>(body: &[u8]) -> T {
    let mut values = serde_json::Deserializer::from_slice(body).into_iter::<T>();
    match values.next() {
        Some(Ok(value)) => value,
        Some(Err(e)) => {
            debug!(error = %e, "undecodable body, using zero value");
            T::default()
        }
        None => {
            debug!("empty body, using zero value");
            T::default()
        }
    }
}

// ── Formatter ─────────────────────────────────────────────────────────────────

/// Compact formatter that additionally escapes HTML-significant characters.
///
/// `serde_json` hands us string contents in fragments that already exclude
/// quotes, backslashes and control characters; this only has to split those
/// fragments further.
struct HtmlSafeFormatter;

impl Formatter for HtmlSafeFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (i, ch) in fragment.char_indices() {
            let escaped = match ch {
                '<' => "\\u003c",
                '>' => "\\u003e",
                '&' => "\\u0026",
                '\u{2028}' => "\\u2028",
                '\u{2029}' => "\\u2029",
                _ => continue,
            };
            writer.write_all(&fragment.as_bytes()[start..i])?;
            writer.write_all(escaped.as_bytes())?;
            start = i + ch.len_utf8();
        }
        writer.write_all(&fragment.as_bytes()[start..])
    }
}
