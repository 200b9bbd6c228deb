//! Per-station min/mean/max over `<station>;<temperature>` files.
//!
//! The input is streamed through [`line_reader::LineReader`], a fixed-size
//! buffer that yields borrowed lines, so memory stays bounded by the buffer
//! plus one entry per distinct station.

pub mod byte_buffer;
pub mod config;
pub mod error;
pub mod line_reader;
pub mod process;
pub mod record;
pub mod stats;
pub mod temperature;
pub mod weather_map;

pub use config::{Config, Mode};
pub use error::{Error, RecordError, Result};
pub use process::{process, process_file};
pub use temperature::{Temperature, Tenths};
pub use weather_map::WeatherMap;
