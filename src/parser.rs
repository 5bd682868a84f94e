//! Streaming CSV decoding.
//!
//! Records are pulled one at a time from any `Read` source, so the input file
//! is never resident in memory as a whole. Row arity is not enforced; only
//! decode failures (invalid UTF-8, an unterminated quoted field) end the
//! stream with an error.

use crate::error::{ImportError, Result};
use csv::{Reader, ReaderBuilder, StringRecord};
use std::io::{self, Read};

/// Byte-level quoting state, tracked alongside the CSV reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuoteState {
    FieldStart,
    Unquoted,
    Quoted,
    QuoteInQuoted,
}

/// Pass-through reader that follows RFC 4180 quoting as bytes go by.
///
/// `csv` silently closes a quoted field at end of input; this lets the
/// stream tell a truncated quote apart from a clean end.
struct QuoteGuard<R> {
    inner: R,
    state: QuoteState,
    /// Bytes of a leading UTF-8 BOM matched so far; `UTF8_BOM.len()` once
    /// the start of input has been settled.
    bom_pos: usize,
}

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

impl<R: Read> QuoteGuard<R> {
    fn new(inner: R) -> Self {
        QuoteGuard {
            inner,
            state: QuoteState::FieldStart,
            bom_pos: 0,
        }
    }

    fn inside_quotes(&self) -> bool {
        self.state == QuoteState::Quoted
    }

    fn advance(&mut self, byte: u8) {
        use QuoteState::*;
        // `csv` drops a leading BOM, so it must not count as field content.
        if self.bom_pos < UTF8_BOM.len() {
            if byte == UTF8_BOM[self.bom_pos] {
                self.bom_pos += 1;
                return;
            }
            // Partial match: those bytes were ordinary field content.
            if self.bom_pos > 0 {
                self.state = Unquoted;
            }
            self.bom_pos = UTF8_BOM.len();
        }
        self.state = match (self.state, byte) {
            (FieldStart, b'"') => Quoted,
            (Quoted, b'"') => QuoteInQuoted,
            (Quoted, _) => Quoted,
            // doubled quote: escaped, still inside the field
            (QuoteInQuoted, b'"') => Quoted,
            (_, b',' | b'\n' | b'\r') => FieldStart,
            (_, _) => Unquoted,
        };
    }
}

impl<R: Read> Read for QuoteGuard<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        for &byte in &buf[..n] {
            self.advance(byte);
        }
        Ok(n)
    }
}

/// Lazy, forward-only sequence of raw CSV records.
///
/// Yields `Err` at most once; the stream is exhausted afterwards.
pub struct RecordStream<R: Read> {
    reader: Reader<QuoteGuard<R>>,
    finished: bool,
}

impl<R: Read> RecordStream<R> {
    /// Wraps a byte source. The source has no header row.
    pub fn new(source: R) -> Self {
        let reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(QuoteGuard::new(source));

        RecordStream {
            reader,
            finished: false,
        }
    }

    /// Line number of the reader's current position (1-indexed).
    pub fn line(&self) -> u64 {
        self.reader.position().line()
    }
}

impl<R: Read> Iterator for RecordStream<R> {
    type Item = Result<StringRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let mut record = StringRecord::new();
        match self.reader.read_record(&mut record) {
            Ok(true) => Some(Ok(record)),
            Ok(false) => {
                self.finished = true;
                if self.reader.get_ref().inside_quotes() {
                    Some(Err(ImportError::Parse {
                        line: self.line(),
                        message: "unterminated quoted field at end of input".to_string(),
                    }))
                } else {
                    None
                }
            }
            Err(e) => {
                self.finished = true;
                Some(Err(ImportError::from_csv(e)))
            }
        }
    }
}
