//! The line oriented console shared by the `jks-client` and `jks-admin` executables.
//!
//! A console talks to a default server and, optionally, an alternate one. The user drives
//! it with three inputs: an empty line sends a request to the current server, `s` switches
//! between the default and alternate server, and `quit` leaves. Inputs are matched exactly.
use std::fmt;
use std::io::{BufRead, Write};

use tracing::error;

use crate::protocol::read_line;
use crate::{JksError, Result};

/// the host used when no host is given on the command line
pub const DEFAULT_HOST: &str = "localhost";

/// What a line typed into the console asks for
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// send one request to the current server
    Request,
    /// switch between the default and alternate server
    Switch,
    /// leave the console
    Quit,
}

impl ConsoleCommand {
    /// parses a line of input. Anything that is not exactly `s` or `quit` is a request.
    pub fn parse(line: &str) -> Self {
        match line {
            "quit" => ConsoleCommand::Quit,
            "s" => ConsoleCommand::Switch,
            _ => ConsoleCommand::Request,
        }
    }
}

/// A server the console can talk to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// host name or IP address
    pub host: String,
    /// port of the protocol the console speaks
    pub port: u16,
}

impl Target {
    /// builds a target from a `host` and `port`
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Target {
            host: host.into(),
            port,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, port {}", self.host, self.port)
    }
}

/// The state of a console: its servers and which of them is current
#[derive(Debug, Clone)]
pub struct Console {
    default: Target,
    alternate: Option<Target>,
    on_alternate: bool,
}

impl Console {
    /// Builds a console from the hosts given on the command line.
    ///
    /// No host selects [`DEFAULT_HOST`], one host is used as the only server, and with two
    /// hosts the second one becomes the alternate. The default server is reached on `port`,
    /// the alternate on `alt_port`.
    ///
    /// # Errors
    /// returns [`JksError::Parsing`] if more than two hosts are given
    pub fn new(hosts: &[String], port: u16, alt_port: u16) -> Result<Self> {
        let (default, alternate) = match hosts {
            [] => (DEFAULT_HOST.to_string(), None),
            [host] => (host.clone(), None),
            [host, alt] => (host.clone(), Some(alt.clone())),
            _ => {
                return Err(JksError::Parsing(format!(
                    "expected at most two hosts, got {}",
                    hosts.len()
                )))
            }
        };

        Ok(Console {
            default: Target::new(default, port),
            alternate: alternate.map(|host| Target::new(host, alt_port)),
            on_alternate: false,
        })
    }

    /// the server requests are currently sent to
    pub fn current(&self) -> &Target {
        match &self.alternate {
            Some(alt) if self.on_alternate => alt,
            _ => &self.default,
        }
    }

    /// switches between the default and alternate server, returning the new current server.
    /// Returns `None`, and stays on the default server, if there is no alternate.
    pub fn switch(&mut self) -> Option<&Target> {
        self.alternate.as_ref()?;
        self.on_alternate = !self.on_alternate;
        Some(self.current())
    }

    /// writes the servers this console knows about to `out`
    pub fn describe<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "Server one: {}", self.default)?;
        if let Some(alt) = &self.alternate {
            writeln!(out, "Server two: {}", alt)?;
        }
        Ok(())
    }

    /// Runs the console until `quit` is entered or `input` ends.
    ///
    /// `prompt` is written before every line is read. Every request is handed to `send`
    /// along with the current server, and the lines it returns are echoed to `out`. A failed
    /// request is reported and the console carries on. `farewell` is written on the way out.
    pub fn run<R, W, F>(
        &mut self,
        input: &mut R,
        out: &mut W,
        prompt: &str,
        farewell: &str,
        mut send: F,
    ) -> Result<()>
    where
        R: BufRead,
        W: Write,
        F: FnMut(&Target) -> Result<Vec<String>>,
    {
        loop {
            write!(out, "{}", prompt)?;
            out.flush()?;

            let line = match read_line(input)? {
                Some(line) => line,
                None => break,
            };

            match ConsoleCommand::parse(&line) {
                ConsoleCommand::Quit => break,
                ConsoleCommand::Switch => match self.switch() {
                    Some(target) => writeln!(out, "Now communicating with: {}", target)?,
                    None => writeln!(out, "No secondary server being used.")?,
                },
                ConsoleCommand::Request => match send(self.current()) {
                    Ok(lines) => {
                        for line in lines {
                            writeln!(out, "{}", line)?;
                        }
                    }
                    Err(e) => {
                        error!("request to {} failed: {}", self.current(), e);
                        writeln!(out, "Socket error.")?;
                    }
                },
            }
        }

        writeln!(out, "{}", farewell)?;
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor};

    fn hosts(h: &[&str]) -> Vec<String> {
        h.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_is_exact() {
        assert_eq!(ConsoleCommand::parse(""), ConsoleCommand::Request);
        assert_eq!(ConsoleCommand::parse("s"), ConsoleCommand::Switch);
        assert_eq!(ConsoleCommand::parse("quit"), ConsoleCommand::Quit);
        assert_eq!(ConsoleCommand::parse("S"), ConsoleCommand::Request);
        assert_eq!(ConsoleCommand::parse("QUIT"), ConsoleCommand::Request);
        assert_eq!(ConsoleCommand::parse(" s"), ConsoleCommand::Request);
    }

    #[test]
    fn host_arguments() {
        let none = Console::new(&[], 4545, 4546).unwrap();
        assert_eq!(none.current(), &Target::new("localhost", 4545));

        let one = Console::new(&hosts(&["10.0.0.1"]), 4545, 4546).unwrap();
        assert_eq!(one.current(), &Target::new("10.0.0.1", 4545));

        assert!(Console::new(&hosts(&["a", "b", "c"]), 4545, 4546).is_err());
    }

    #[test]
    fn switch_toggles_between_hosts() {
        let mut console = Console::new(&hosts(&["alpha", "beta"]), 5050, 5051).unwrap();
        assert_eq!(console.switch(), Some(&Target::new("beta", 5051)));
        assert_eq!(console.switch(), Some(&Target::new("alpha", 5050)));

        let mut single = Console::new(&hosts(&["alpha"]), 5050, 5051).unwrap();
        assert_eq!(single.switch(), None);
        assert_eq!(single.current(), &Target::new("alpha", 5050));
    }

    #[test]
    fn run_dispatches_inputs() {
        let mut console = Console::new(&hosts(&["alpha", "beta"]), 4545, 4546).unwrap();
        let mut input = Cursor::new("\ns\n\nquit\n\n");
        let mut out = Vec::new();
        let mut sent = Vec::new();

        console
            .run(&mut input, &mut out, "> ", "Bye.", |target| {
                sent.push(target.clone());
                Ok(vec![format!("reply from {}", target.host)])
            })
            .unwrap();

        assert_eq!(sent, vec![Target::new("alpha", 4545), Target::new("beta", 4546)]);
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("reply from alpha\n"));
        assert!(out.contains("Now communicating with: beta, port 4546\n"));
        assert!(out.contains("reply from beta\n"));
        assert!(out.ends_with("Bye.\n"));
    }

    #[test]
    fn run_survives_failed_requests_and_eof() {
        let mut console = Console::new(&[], 4545, 4546).unwrap();
        let mut input = Cursor::new("\ns\n");
        let mut out = Vec::new();

        console
            .run(&mut input, &mut out, "", "Cancelled by client.", |_| {
                Err(io::Error::new(io::ErrorKind::ConnectionRefused, "refused").into())
            })
            .unwrap();

        let out = String::from_utf8(out).unwrap();
        assert_eq!(
            out,
            "Socket error.\nNo secondary server being used.\nCancelled by client.\n"
        );
    }
}
