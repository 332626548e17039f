//! The `now` template value.
//!
//! Templates written against Jinja treat `now` like a Python `datetime`, so
//! [`Timestamp`] exposes the same surface: it prints as
//! `2024-05-01 12:34:56.123456+00:00`, has `year`/`month`/... attributes and
//! `strftime`, `isoformat` and `timestamp` methods.

use std::fmt::{self, Write as _};
use std::sync::Arc;

use chrono::{DateTime, Datelike, Timelike, Utc};
use minijinja::value::{from_args, Enumerator, Object, ObjectRepr};
use minijinja::{Error, ErrorKind, State, Value};

const ATTRIBUTES: &[&str] = &[
    "year",
    "month",
    "day",
    "hour",
    "minute",
    "second",
    "microsecond",
];

/// A UTC instant exposed to templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self(at)
    }

    /// Captures the current instant.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    pub fn datetime(&self) -> DateTime<Utc> {
        self.0
    }

    /// Formats with a strftime-style pattern.
    ///
    /// Unknown specifiers are reported as an error instead of panicking.
    pub fn strftime(&self, format: &str) -> Result<String, Error> {
        let mut out = String::new();
        write!(out, "{}", self.0.format(format)).map_err(|_| {
            Error::new(
                ErrorKind::InvalidOperation,
                format!("invalid strftime format: {format:?}"),
            )
        })?;
        Ok(out)
    }

    /// ISO 8601 with a `T` separator, e.g. `2024-05-01T12:34:56+00:00`.
    pub fn isoformat(&self) -> String {
        self.with_separator('T')
    }

    fn with_separator(&self, sep: char) -> String {
        let mut out = self.0.format("%Y-%m-%d").to_string();
        out.push(sep);
        out.push_str(&self.0.format("%H:%M:%S").to_string());
        let micros = self.0.timestamp_subsec_micros() % 1_000_000;
        if micros != 0 {
            let _ = write!(out, ".{micros:06}");
        }
        out.push_str("+00:00");
        out
    }

    fn attribute(&self, name: &str) -> Option<Value> {
        let value = match name {
            "year" => self.0.year() as i64,
            "month" => self.0.month() as i64,
            "day" => self.0.day() as i64,
            "hour" => self.0.hour() as i64,
            "minute" => self.0.minute() as i64,
            "second" => self.0.second() as i64,
            "microsecond" => (self.0.timestamp_subsec_micros() % 1_000_000) as i64,
            _ => return None,
        };
        Some(Value::from(value))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.with_separator(' '))
    }
}

impl From<Timestamp> for Value {
    fn from(ts: Timestamp) -> Self {
        Value::from_object(ts)
    }
}

impl Object for Timestamp {
    fn repr(self: &Arc<Self>) -> ObjectRepr {
        ObjectRepr::Plain
    }

    fn get_value(self: &Arc<Self>, key: &Value) -> Option<Value> {
        self.attribute(key.as_str()?)
    }

    fn enumerate(self: &Arc<Self>) -> Enumerator {
        Enumerator::Str(ATTRIBUTES)
    }

    fn call_method(
        self: &Arc<Self>,
        _state: &State<'_, '_>,
        method: &str,
        args: &[Value],
    ) -> Result<Value, Error> {
        match method {
            "strftime" => {
                let (format,): (&str,) = from_args(args)?;
                self.strftime(format).map(Value::from)
            }
            "isoformat" => {
                no_args(args)?;
                Ok(Value::from(self.isoformat()))
            }
            "timestamp" => {
                no_args(args)?;
                let secs = self.0.timestamp() as f64
                    + f64::from(self.0.timestamp_subsec_micros()) / 1_000_000.0;
                Ok(Value::from(secs))
            }
            _ => Err(Error::new(
                ErrorKind::UnknownMethod,
                format!("timestamp has no method named {method}"),
            )),
        }
    }

    fn render(self: &Arc<Self>, f: &mut fmt::Formatter<'_>) -> fmt::Result
    where
        Self: Sized + 'static,
    {
        fmt::Display::fmt(&**self, f)
    }
}

fn no_args(args: &[Value]) -> Result<(), Error> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(Error::from(ErrorKind::TooManyArguments))
    }
}
