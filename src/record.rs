use crate::byte_buffer::ByteBuffer;
use crate::error::RecordError;
use crate::temperature::Temperature;

/// One `<station>;<temperature>` line, station still borrowed from the line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Record<'a, T> {
    pub station: &'a [u8],
    pub temperature: T,
}

/// Splits `line` on its first `;` and parses the rest with policy `T`.
#[inline(always)]
pub fn parse_record<T: Temperature>(line: &[u8]) -> Result<Record<'_, T>, RecordError> {
    let semicolon = line
        .byte_position(b';')
        .ok_or(RecordError::MissingDelimiter)?;

    let station = &line[..semicolon];
    if station.is_empty() {
        return Err(RecordError::EmptyStation);
    }

    let temperature = T::parse(&line[semicolon + 1..])?;

    Ok(Record {
        station,
        temperature,
    })
}
