use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Argument error: {0}")]
    Argument(String),
    #[error("line starting at byte {offset} does not fit in the {capacity} byte read buffer")]
    LineTooLong { offset: u64, capacity: usize },
    #[error("malformed record on line {line} (byte {offset})")]
    MalformedRecord {
        line: u64,
        offset: u64,
        source: RecordError,
    },
}

/// Why a single `<station>;<temperature>` line was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("missing ';' delimiter")]
    MissingDelimiter,
    #[error("empty station name")]
    EmptyStation,
    #[error("empty temperature")]
    EmptyTemperature,
    #[error("invalid temperature {field:?}")]
    InvalidTemperature { field: String },
}

impl RecordError {
    pub(crate) fn invalid(field: &[u8]) -> Self {
        Self::InvalidTemperature {
            field: String::from_utf8_lossy(field).into_owned(),
        }
    }
}
