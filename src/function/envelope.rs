//! Result envelope and its body encoding.
//!
//! The envelope body is a JSON document embedded as a string, and consumers
//! compare that string byte for byte. It is written with a fixed convention:
//! `", "` and `": "` separators, ASCII-only output with `\uXXXX` escapes,
//! integers copied digit for digit, and repr-style float formatting.

use crate::error::ForwarderError;
use crate::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::ser::{Formatter, Serializer};
use serde_json::Value;
use std::io;

/// Message placed in every envelope body.
pub const MESSAGE: &str = "Called mock API";

/// Fixed-shape object returned to the invoking platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultEnvelope {
    /// Always 200, whatever the upstream answered.
    pub status_code: StatusCode,
    /// JSON-encoded [`EnvelopeBody`].
    pub body: String,
}

impl ResultEnvelope {
    /// Wrap a parsed upstream document.
    pub fn wrap(response: Value) -> Result<Self, ForwarderError> {
        let body = EnvelopeBody::new(response)
            .encode()
            .map_err(ForwarderError::Encode)?;
        Ok(Self {
            status_code: StatusCode::OK,
            body,
        })
    }

    /// Parse the body string back into its structured form.
    pub fn decode_body(&self) -> Result<EnvelopeBody, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// Structured content of [`ResultEnvelope::body`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeBody {
    pub message: String,
    pub response: Value,
}

impl EnvelopeBody {
    pub fn new(response: Value) -> Self {
        Self {
            message: MESSAGE.to_string(),
            response,
        }
    }

    /// Encode with [`to_compat_string`].
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        to_compat_string(self)
    }
}

/// Serialize `value` with spaced separators and ASCII-only output.
pub fn to_compat_string<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    let mut buf = Vec::with_capacity(128);
    let mut ser = Serializer::with_formatter(&mut buf, CompatFormatter);
    value.serialize(&mut ser)?;
    String::from_utf8(buf).map_err(<serde_json::Error as serde::ser::Error>::custom)
}

/// Spaced separators, ASCII-only strings, repr-style floats.
#[derive(Debug, Clone, Copy, Default)]
struct CompatFormatter;

impl Formatter for CompatFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    fn write_f64<W>(&mut self, writer: &mut W, value: f64) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(float_repr(value).as_bytes())
    }

    // Parsed numbers arrive here as their source lexeme.
    fn write_number_str<W>(&mut self, writer: &mut W, value: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if value.contains(|c| matches!(c, '.' | 'e' | 'E')) {
            let parsed = value
                .parse::<f64>()
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            writer.write_all(float_repr(parsed).as_bytes())
        } else if value == "-0" {
            writer.write_all(b"0")
        } else {
            writer.write_all(value.as_bytes())
        }
    }

    // Quotes, backslashes and control characters never reach here; they go
    // through `write_char_escape`, whose output already matches.
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (i, ch) in fragment.char_indices() {
            if ch.is_ascii() && ch != '\x7f' {
                continue;
            }
            writer.write_all(fragment[start..i].as_bytes())?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units).iter() {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = i + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}

/// Shortest round-trip digits; fixed notation for decimal exponents in
/// `[-4, 16)`, otherwise `d.ddde±XX`. Overflowed literals become
/// `Infinity`/`-Infinity`.
fn float_repr(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let scientific = format!("{:e}", value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if (-4..16).contains(&exponent) {
        let fixed = value.to_string();
        if fixed.contains('.') {
            fixed
        } else {
            fixed + ".0"
        }
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.abs())
    }
}
