//! Streaming line reader over a fixed-capacity buffer.
//!
//! [`LineReader`] pulls blocks from any [`Read`] source into a buffer it owns
//! and hands out lines as borrowed [`Line`] views into that buffer. Nothing is
//! allocated per line. A line stays valid until the next call that mutates
//! the reader, which the borrow checker enforces.
//!
//! The buffer never grows. A line that does not fit is reported as
//! [`Error::LineTooLong`] rather than truncated.
//!
//! ```
//! use std::io::Cursor;
//! use weather_map::line_reader::LineReader;
//!
//! let mut reader = LineReader::with_capacity(16, Cursor::new("Oslo;-3.2\r\nLima;19.8"));
//! let mut lines = Vec::new();
//! while let Some(line) = reader.read_line().unwrap() {
//!     lines.push(line.to_vec());
//! }
//! assert_eq!(lines, [b"Oslo;-3.2".to_vec(), b"Lima;19.8".to_vec()]);
//! ```

use std::io::{ErrorKind, Read};
use std::ops::Deref;

use crate::byte_buffer::ByteBuffer;
use crate::error::{Error, Result};

pub const DEFAULT_CAPACITY: usize = 1 << 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    /// `[begin, examined)` holds no terminator; `[examined, end)` is unsearched.
    NeedSearch { examined: usize },
    /// The next line ends at `line_end` (terminator excluded), the one after
    /// starts at `next`.
    Found {
        line_end: usize,
        next: usize,
        eof: bool,
    },
    /// The source returned end-of-input. `[begin, examined)` holds no terminator.
    EndOfStream { examined: usize },
    Exhausted,
    Failed,
}

/// A line borrowed from the reader's buffer, terminator stripped.
#[derive(Clone, Copy, Debug)]
pub struct Line<'a> {
    bytes: &'a [u8],
    number: u64,
    offset: u64,
}

impl<'a> Line<'a> {
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// 1-based line number within the source.
    pub fn number(&self) -> u64 {
        self.number
    }

    /// Byte offset of the first byte of the line within the source.
    pub fn offset(&self) -> u64 {
        self.offset
    }
}

impl Deref for Line<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.bytes
    }
}

pub struct LineReader<R> {
    inner: R,
    buf: Box<[u8]>,
    begin: usize,
    end: usize,
    state: State,
    // Source offset of `buf[begin]`.
    position: u64,
    lines: u64,
}

impl<R: Read> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self::with_capacity(DEFAULT_CAPACITY, inner)
    }

    /// Creates a reader whose buffer holds `capacity` bytes. Every line,
    /// including its terminator, must fit in it.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_capacity(capacity: usize, inner: R) -> Self {
        assert!(capacity > 0, "line reader capacity must be non-zero");

        Self {
            inner,
            buf: vec![0u8; capacity].into_boxed_slice(),
            begin: 0,
            end: 0,
            state: State::NeedSearch { examined: 0 },
            position: 0,
            lines: 0,
        }
    }

    /// Makes sure a complete line is buffered, reading from the source as
    /// needed. Returns `Ok(false)` once the input is exhausted.
    ///
    /// After an error the reader is failed and keeps returning `Ok(false)`.
    pub fn advance(&mut self) -> Result<bool> {
        loop {
            self.locate();

            match self.state {
                State::Found { .. } => return Ok(true),
                State::NeedSearch { .. } => self.fill()?,
                // `locate` never leaves the reader at `EndOfStream`.
                State::EndOfStream { .. } | State::Exhausted | State::Failed => return Ok(false),
            }
        }
    }

    /// Takes the next line out of the buffer without reading from the source.
    pub fn next_line(&mut self) -> Option<Line<'_>> {
        self.locate();

        let State::Found {
            line_end,
            next,
            eof,
        } = self.state
        else {
            return None;
        };

        let start = self.begin;
        let offset = self.position;

        self.position += (next - start) as u64;
        self.begin = next;
        self.lines += 1;
        self.state = if eof {
            State::EndOfStream { examined: next }
        } else {
            State::NeedSearch { examined: next }
        };

        Some(Line {
            bytes: &self.buf[start..line_end],
            number: self.lines,
            offset,
        })
    }

    /// [`advance`](Self::advance) followed by [`next_line`](Self::next_line).
    pub fn read_line(&mut self) -> Result<Option<Line<'_>>> {
        if self.advance()? {
            Ok(self.next_line())
        } else {
            Ok(None)
        }
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    pub fn lines_read(&self) -> u64 {
        self.lines
    }

    /// Source offset of the first unconsumed byte.
    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    // Resolves the search states against what is already buffered.
    fn locate(&mut self) {
        match self.state {
            State::NeedSearch { examined } => {
                self.state = match self.search(examined) {
                    Some((line_end, next)) => State::Found {
                        line_end,
                        next,
                        eof: false,
                    },
                    None => State::NeedSearch { examined: self.end },
                };
            }
            State::EndOfStream { examined } => {
                self.state = match self.search(examined) {
                    Some((line_end, next)) => State::Found {
                        line_end,
                        next,
                        eof: true,
                    },
                    None if self.begin < self.end => {
                        let rest = self.buf[self.begin..self.end].trim_line_terminator();
                        State::Found {
                            line_end: self.begin + rest.len(),
                            next: self.end,
                            eof: true,
                        }
                    }
                    None => {
                        log::trace!("input exhausted after {} lines", self.lines);
                        State::Exhausted
                    }
                };
            }
            State::Found { .. } | State::Exhausted | State::Failed => {}
        }
    }

    fn search(&self, from: usize) -> Option<(usize, usize)> {
        let newline = from + self.buf[from..self.end].byte_position(b'\n')?;
        let line = self.buf[self.begin..newline].trim_line_terminator();

        Some((self.begin + line.len(), newline + 1))
    }

    // One physical read. Only called with everything buffered already searched.
    fn fill(&mut self) -> Result<()> {
        if self.begin > 0 {
            log::trace!("compacting {} buffered bytes", self.end - self.begin);
            self.buf.copy_within(self.begin..self.end, 0);
            self.end -= self.begin;
            self.begin = 0;
        }

        if self.end == self.buf.len() {
            self.state = State::Failed;
            return Err(Error::LineTooLong {
                offset: self.position,
                capacity: self.buf.len(),
            });
        }

        let read = loop {
            match self.inner.read(&mut self.buf[self.end..]) {
                Ok(read) => break read,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.state = State::Failed;
                    return Err(e.into());
                }
            }
        };

        log::trace!(
            "read {} bytes at offset {}",
            read,
            self.position + self.end as u64
        );

        if read == 0 {
            self.state = State::EndOfStream {
                examined: self.end,
            };
        } else {
            self.state = State::NeedSearch {
                examined: self.end,
            };
            self.end += read;
        }

        Ok(())
    }
}
