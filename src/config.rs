use std::env;
use std::ffi::OsString;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::line_reader::DEFAULT_CAPACITY;

pub const MODE_VAR: &str = "WEATHER_MAP_MODE";
pub const BUFFER_SIZE_VAR: &str = "WEATHER_MAP_BUFFER_SIZE";

/// Numeric policy for the temperature field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Exact tenths, `[-99.9, 99.9]`, truncating mean.
    #[default]
    Fixed,
    /// Any decimal, incremental mean.
    Float,
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed" => Ok(Mode::Fixed),
            "float" => Ok(Mode::Float),
            other => Err(Error::Argument(format!(
                "{MODE_VAR} must be `fixed` or `float`, got {other:?}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub path: PathBuf,
    pub mode: Mode,
    pub buffer_capacity: usize,
}

impl Config {
    /// Reads the input path from the process arguments and the rest from the
    /// environment. The path is taken as an `OsString`, so it need not be
    /// UTF-8.
    pub fn from_env() -> Result<Self> {
        Self::from_args(env::args_os().skip(1), |key| env::var(key).ok())
    }

    pub fn from_args<I, A, F>(args: I, var: F) -> Result<Self>
    where
        I: IntoIterator<Item = A>,
        A: Into<OsString>,
        F: Fn(&str) -> Option<String>,
    {
        let mut args = args.into_iter().map(Into::into);

        let path: OsString = args
            .next()
            .ok_or_else(|| Error::Argument("expected an input file argument".to_string()))?;

        if let Some(extra) = args.next() {
            return Err(Error::Argument(format!(
                "expected exactly one argument, got extra {extra:?}"
            )));
        }

        let mode = match var(MODE_VAR) {
            Some(mode) => mode.parse()?,
            None => Mode::default(),
        };

        let buffer_capacity = match var(BUFFER_SIZE_VAR) {
            Some(size) => parse_capacity(&size)?,
            None => DEFAULT_CAPACITY,
        };

        Ok(Config {
            path: PathBuf::from(path),
            mode,
            buffer_capacity,
        })
    }
}

fn parse_capacity(size: &str) -> Result<usize> {
    match size.trim().replace('_', "").parse::<usize>() {
        Ok(capacity) if capacity > 0 => Ok(capacity),
        _ => Err(Error::Argument(format!(
            "{BUFFER_SIZE_VAR} must be a positive number of bytes, got {size:?}"
        ))),
    }
}
