//! Abstract character source/sink (spec §6.1), with concrete implementations
//! over in-memory strings and over `std::io::Read`/`Write`.
//!
//! The core depends only on these traits, never on a concrete stream type —
//! callers choose whether a dictionary is loaded from a string, a file, or
//! anything else that can produce a byte or character stream.

use std::io::{self, Read, Write};

/// A one-code-point-lookahead blocking character reader that tracks its
/// position as (line, column) for error reporting.
pub trait CharSource {
    /// Returns the next code point without consuming it.
    fn peek(&mut self) -> Option<char>;
    /// Consumes and returns the next code point, advancing line/column.
    fn next(&mut self) -> Option<char>;
    /// 1-based line number of the last consumed character.
    fn line(&self) -> u32;
    /// 1-based column number of the last consumed character.
    fn column(&self) -> u32;
}

/// A formatted-write sink. Named after the reference's `io_printf`/`io_eprintf`.
pub trait CharSink {
    fn write_str(&mut self, s: &str) -> io::Result<()>;

    fn write_fmt(&mut self, args: std::fmt::Arguments<'_>) -> io::Result<()> {
        self.write_str(&args.to_string())
    }
}

/// A [`CharSource`] over an in-memory string.
pub struct StrCharSource<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: u32,
    column: u32,
}

impl<'a> StrCharSource<'a> {
    pub fn new(text: &'a str) -> Self {
        StrCharSource {
            chars: text.chars().peekable(),
            line: 1,
            column: 0,
        }
    }
}

impl<'a> CharSource for StrCharSource<'a> {
    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn next(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn line(&self) -> u32 {
        self.line
    }

    fn column(&self) -> u32 {
        self.column
    }
}

/// A [`CharSink`] that appends to an owned `String` (handy for tests and for
/// `Dictionary::save_to_string`).
#[derive(Default)]
pub struct StringCharSink {
    pub buffer: String,
}

impl CharSink for StringCharSink {
    fn write_str(&mut self, s: &str) -> io::Result<()> {
        self.buffer.push_str(s);
        Ok(())
    }
}

/// A [`CharSource`] that decodes UTF-8 from a byte stream one code point at a
/// time, blocking on the underlying reader as needed.
pub struct ReadCharSource<R: Read> {
    reader: R,
    lookahead: Option<char>,
    line: u32,
    column: u32,
}

impl<R: Read> ReadCharSource<R> {
    pub fn new(reader: R) -> Self {
        ReadCharSource {
            reader,
            lookahead: None,
            line: 1,
            column: 0,
        }
    }

    fn read_char(&mut self) -> Option<char> {
        let mut buf = [0u8; 4];
        let mut len = 0usize;
        loop {
            if self.reader.read_exact(&mut buf[len..len + 1]).is_err() {
                return None;
            }
            len += 1;
            if let Ok(s) = std::str::from_utf8(&buf[..len]) {
                return s.chars().next();
            }
            if len == 4 {
                return None;
            }
        }
    }
}

impl<R: Read> CharSource for ReadCharSource<R> {
    fn peek(&mut self) -> Option<char> {
        if self.lookahead.is_none() {
            self.lookahead = self.read_char();
        }
        self.lookahead
    }

    fn next(&mut self) -> Option<char> {
        let c = self.lookahead.take().or_else(|| self.read_char())?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn line(&self) -> u32 {
        self.line
    }

    fn column(&self) -> u32 {
        self.column
    }
}

/// A [`CharSink`] that writes UTF-8 to an arbitrary byte sink.
pub struct WriteCharSink<W: Write> {
    writer: W,
}

impl<W: Write> WriteCharSink<W> {
    pub fn new(writer: W) -> Self {
        WriteCharSink { writer }
    }
}

impl<W: Write> CharSink for WriteCharSink<W> {
    fn write_str(&mut self, s: &str) -> io::Result<()> {
        self.writer.write_all(s.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn str_source_tracks_line_and_column() {
        let mut src = StrCharSource::new("ab\ncd");
        assert_eq!(src.next(), Some('a'));
        assert_eq!((src.line(), src.column()), (1, 1));
        assert_eq!(src.next(), Some('b'));
        assert_eq!((src.line(), src.column()), (1, 2));
        assert_eq!(src.next(), Some('\n'));
        assert_eq!((src.line(), src.column()), (2, 1));
        assert_eq!(src.next(), Some('c'));
        assert_eq!((src.line(), src.column()), (2, 2));
    }

    #[test]
    fn str_source_peek_does_not_consume() {
        let mut src = StrCharSource::new("xy");
        assert_eq!(src.peek(), Some('x'));
        assert_eq!(src.peek(), Some('x'));
        assert_eq!(src.next(), Some('x'));
        assert_eq!(src.next(), Some('y'));
        assert_eq!(src.next(), None);
    }

    #[test]
    fn read_char_source_decodes_utf8() {
        let bytes = "wątły".as_bytes().to_vec();
        let mut src = ReadCharSource::new(std::io::Cursor::new(bytes));
        let mut collected = String::new();
        while let Some(c) = src.next() {
            collected.push(c);
        }
        assert_eq!(collected, "wątły");
    }

    #[test]
    fn write_char_sink_round_trips() {
        let mut buf = Vec::new();
        {
            let mut sink = WriteCharSink::new(&mut buf);
            sink.write_str("łódka").unwrap();
        }
        assert_eq!(String::from_utf8(buf).unwrap(), "łódka");
    }
}
