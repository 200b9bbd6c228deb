use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};
use crate::line_reader::LineReader;
use crate::record::parse_record;
use crate::temperature::Temperature;
use crate::weather_map::WeatherMap;

/// Aggregates every record of `source`. The first bad line aborts the run.
pub fn process<T, R>(source: R, capacity: usize) -> Result<WeatherMap<T>>
where
    T: Temperature,
    R: Read,
{
    let mut reader = LineReader::with_capacity(capacity, source);
    let mut map = WeatherMap::new();

    log::debug!("reading with a {} byte buffer", reader.capacity());

    while reader.advance()? {
        while let Some(line) = reader.next_line() {
            let record =
                parse_record::<T>(line.as_bytes()).map_err(|source| Error::MalformedRecord {
                    line: line.number(),
                    offset: line.offset(),
                    source,
                })?;

            map.update(record.station, record.temperature);
        }
    }

    log::info!(
        "processed {} lines ({} bytes) into {} stations",
        reader.lines_read(),
        reader.position(),
        map.len()
    );

    Ok(map)
}

pub fn process_file<T, P>(path: P, capacity: usize) -> Result<WeatherMap<T>>
where
    T: Temperature,
    P: AsRef<Path>,
{
    log::debug!("opening {}", path.as_ref().display());

    let file = File::open(path.as_ref())?;
    process(file, capacity)
}
