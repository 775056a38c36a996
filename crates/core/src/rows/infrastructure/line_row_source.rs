use std::io::{self, BufRead, Write};

use crate::ingestion::domain::table_ref::Row;
use crate::rows::domain::row_parser::{parse_row, RowParseError};

pub const FIRST_PROMPT: &str = "Enter a row (JSON object) into the table: ";
pub const NEXT_PROMPT: &str = "Enter another row into the table \n[hit enter to stop]: ";

/// Lazily reads one JSON row per line until EOF or an empty line.
///
/// A line that fails to parse or is not valid UTF-8 yields an `Err` and
/// iteration carries on with the next line. An I/O failure yields an `Err`
/// and ends the sequence.
pub struct LineRowSource<R, W> {
    reader: R,
    prompt_out: Option<W>,
    lines_read: usize,
    finished: bool,
}

impl<R: BufRead> LineRowSource<R, io::Sink> {
    /// Reads rows without writing prompts, e.g. from a file or a pipe.
    pub fn without_prompts(reader: R) -> Self {
        Self {
            reader,
            prompt_out: None,
            lines_read: 0,
            finished: false,
        }
    }
}

impl<R: BufRead, W: Write> LineRowSource<R, W> {
    /// Writes a prompt to `prompt_out` before reading each line.
    pub fn new(reader: R, prompt_out: W) -> Self {
        Self {
            reader,
            prompt_out: Some(prompt_out),
            lines_read: 0,
            finished: false,
        }
    }

    fn prompt(&mut self) -> io::Result<()> {
        let text = if self.lines_read == 0 {
            FIRST_PROMPT
        } else {
            NEXT_PROMPT
        };
        if let Some(out) = self.prompt_out.as_mut() {
            out.write_all(text.as_bytes())?;
            out.flush()?;
        }
        Ok(())
    }
}

impl<R: BufRead, W: Write> Iterator for LineRowSource<R, W> {
    type Item = Result<Row, RowParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        if let Err(e) = self.prompt() {
            self.finished = true;
            return Some(Err(RowParseError::Io(e)));
        }

        let mut buf = Vec::new();
        match self.reader.read_until(b'\n', &mut buf) {
            Ok(0) => {
                self.finished = true;
                None
            }
            Ok(_) => {
                if buf.iter().all(u8::is_ascii_whitespace) {
                    self.finished = true;
                    return None;
                }
                self.lines_read += 1;
                let line = match String::from_utf8(buf) {
                    Ok(line) => line,
                    Err(source) => {
                        return Some(Err(RowParseError::Encoding {
                            line: self.lines_read,
                            source,
                        }))
                    }
                };
                Some(parse_row(line.trim(), self.lines_read))
            }
            Err(e) => {
                self.finished = true;
                Some(Err(RowParseError::Io(e)))
            }
        }
    }
}
