//! The line based wire format spoken on the client and admin ports.
//!
//! Every line is terminated by `\n`; a trailing `\r` is tolerated on input.
use std::io::{BufRead, Write};

use crate::content::Advance;
use crate::state::Mode;
use crate::{JksError, Result};

/// the most lines a client reads back from a single request
pub const MAX_RESPONSE_LINES: usize = 3;

/// The identity a client sends at the start of every request: two newline terminated lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// opaque token generated by the client, stable for the life of the client process
    pub id: String,
    /// the display name of the user
    pub name: String,
}

impl Request {
    /// builds a new request
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Request {
            id: id.into(),
            name: name.into(),
        }
    }

    /// reads the identifier line followed by the name line from `reader`
    ///
    /// # Errors
    /// returns [`JksError::Protocol`] if the stream ends before both lines were read
    pub fn read_from<R: BufRead>(reader: &mut R) -> Result<Request> {
        let id = read_line(reader)?
            .ok_or_else(|| JksError::Protocol("stream closed before client id".to_string()))?;
        let name = read_line(reader)?
            .ok_or_else(|| JksError::Protocol("stream closed before client name".to_string()))?;
        Ok(Request { id, name })
    }

    /// writes the request as two lines and flushes `writer`
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writeln!(writer, "{}", self.id)?;
        writeln!(writer, "{}", self.name)?;
        writer.flush()?;
        Ok(())
    }
}

/// The lines a server sends back to a client request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// `<tag><item tag> <name>: <body>`
    pub content: String,
    /// announces the end of a cycle, only sent on the request that completed it
    pub cycle_completed: Option<String>,
}

impl Response {
    /// formats the response for `name` after advancing a rotation in `mode`. Every line is
    /// prefixed with `server_tag`.
    pub fn new(server_tag: &str, mode: Mode, name: &str, step: &Advance) -> Self {
        Response {
            content: format!(
                "{}{} {}: {}",
                server_tag, step.item.tag, name, step.item.body
            ),
            cycle_completed: step
                .cycle_completed
                .then(|| format!("{}{} CYCLE COMPLETED", server_tag, mode)),
        }
    }

    /// writes the response lines and flushes `writer`
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writeln!(writer, "{}", self.content)?;
        if let Some(line) = &self.cycle_completed {
            writeln!(writer, "{}", line)?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// the single line a server sends back after an admin switched it into `mode`
pub fn mode_switched(server_tag: &str, mode: Mode) -> String {
    format!("{}Server has switched into {} mode.", server_tag, mode)
}

/// reads up to [`MAX_RESPONSE_LINES`] lines from `reader`, stopping early at end of stream
pub fn read_response<R: BufRead>(reader: &mut R) -> Result<Vec<String>> {
    let mut lines = Vec::with_capacity(MAX_RESPONSE_LINES);
    while lines.len() < MAX_RESPONSE_LINES {
        match read_line(reader)? {
            Some(line) => lines.push(line),
            None => break,
        }
    }
    Ok(lines)
}

/// reads one line without its line terminator, `None` at end of stream
pub(crate) fn read_line<R: BufRead>(reader: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let len = line.trim_end_matches(&['\r', '\n'][..]).len();
    line.truncate(len);
    Ok(Some(line))
}
