//! Numeric policies for the temperature field.
//!
//! [`Tenths`] is the fixed-point policy: it accepts `-?d(d)?(.d)?`, i.e.
//! values in `[-99.9, 99.9]` with at most one fractional digit, and stores
//! them exactly as tenths of a degree. `f64` is the general floating policy.

use std::fmt;

use crate::error::RecordError;
use crate::stats::{FixedSummary, FloatSummary, Summary};

pub trait Temperature: Copy + PartialOrd + fmt::Debug {
    type Summary: Summary<Self>;

    fn parse(field: &[u8]) -> Result<Self, RecordError>;
}

/// A temperature in tenths of a degree, `"-3.4"` is `Tenths(-34)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tenths(pub i16);

impl Temperature for Tenths {
    type Summary = FixedSummary;

    #[inline(always)]
    fn parse(field: &[u8]) -> Result<Self, RecordError> {
        if field.is_empty() {
            return Err(RecordError::EmptyTemperature);
        }

        let digit = |b: u8| {
            if b.is_ascii_digit() {
                Ok((b - b'0') as i16)
            } else {
                Err(RecordError::invalid(field))
            }
        };

        let (neg, rest) = match field {
            [b'-', rest @ ..] => (true, rest),
            _ => (false, field),
        };

        let value = match *rest {
            [a] => digit(a)? * 10,
            [a, b'.', t] => digit(a)? * 10 + digit(t)?,
            [a, b] => digit(a)? * 100 + digit(b)? * 10,
            [a, b, b'.', t] => digit(a)? * 100 + digit(b)? * 10 + digit(t)?,
            _ => return Err(RecordError::invalid(field)),
        };

        Ok(Tenths(if neg { -value } else { value }))
    }
}

impl fmt::Display for Tenths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{}", abs / 10, abs % 10)
    }
}

impl Temperature for f64 {
    type Summary = FloatSummary;

    fn parse(field: &[u8]) -> Result<Self, RecordError> {
        if field.is_empty() {
            return Err(RecordError::EmptyTemperature);
        }

        let value: f64 = str::from_utf8(field)
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| RecordError::invalid(field))?;

        // NaN and infinities would poison min/max.
        if !value.is_finite() {
            return Err(RecordError::invalid(field));
        }

        Ok(value)
    }
}
