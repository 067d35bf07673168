//! The jks-client executable supports the following command line arguments:
//!
//! `jks-client [HOST] [ALT_HOST] [--port PORT] [--alt-port PORT]`
//!
//!     Without a HOST the client talks to localhost. With two hosts, the second one is the
//!     secondary server that the `s` input switches to. The first host is reached on
//!     --port (default 4545), the second on --alt-port (default 4546).
//!
//! Once started, the client asks for your name and then reads commands from STDIN:
//!
//!     [enter]  get the next joke or proverb from the current server
//!     s        switch between the primary and secondary server
//!     quit     exit

use std::io::{self, BufRead, Write};
use std::process::exit;

use clap::{crate_version, value_t, App, Arg, ArgMatches};
use jks::console::Console;
use jks::{JksClient, JksError, Result};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

const PROMPT: &str =
    "Press enter for joke/proverb, (s) to switch to secondary server, (quit) to exit: ";

fn main() {
    // configure a subscriber that will log messages to STDERR
    subscriber_config();

    let matches = App::new("jks-client")
        .version(crate_version!())
        .author("strohs <strohs1@gmail.com>")
        .about("asks a jks server for jokes and proverbs")
        .arg(Arg::with_name("HOST")
            .index(1)
            .help("the primary server, localhost if not given"))
        .arg(Arg::with_name("ALT_HOST")
            .index(2)
            .help("the secondary server"))
        .arg(Arg::with_name("port")
            .long("port")
            .value_name("PORT")
            .help("the client port of the primary server")
            .default_value("4545"))
        .arg(Arg::with_name("alt-port")
            .long("alt-port")
            .value_name("PORT")
            .help("the client port of the secondary server")
            .default_value("4546"))
        .get_matches();

    if let Err(e) = run(&matches) {
        eprintln!("{:?}", e);
        exit(1);
    }
}

fn run(matches: &ArgMatches) -> Result<()> {
    let port = value_t!(matches, "port", u16).map_err(|e| JksError::Parsing(e.to_string()))?;
    let alt_port = value_t!(matches, "alt-port", u16).map_err(|e| JksError::Parsing(e.to_string()))?;
    let hosts: Vec<String> = ["HOST", "ALT_HOST"]
        .iter()
        .filter_map(|arg| matches.value_of(arg))
        .map(String::from)
        .collect();
    let mut console = Console::new(&hosts, port, alt_port)?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out, "jks-client starting up")?;
    console.describe(&mut out)?;

    write!(out, "Enter your name: ")?;
    out.flush()?;
    let mut name = String::new();
    input.read_line(&mut name)?;
    let client = JksClient::new(name.trim_end_matches(&['\r', '\n'][..]));

    console.run(&mut input, &mut out, PROMPT, "Cancelled by client.", |target| {
        client.request((target.host.as_str(), target.port))
    })
}

/// configures a tracing subscriber that will log warnings and errors to STDERR
fn subscriber_config() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::WARN)
        // log to stderr, stdout belongs to the console
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("setting tracing default subscriber failed");
}
