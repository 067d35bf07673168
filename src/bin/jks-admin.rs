//! The jks-admin executable switches jks servers between JOKE and PROVERB mode.
//!
//! `jks-admin [HOST] [ALT_HOST] [--port PORT] [--alt-port PORT]`
//!
//!     Without a HOST the admin talks to localhost. With two hosts, the second one is the
//!     secondary server that the `s` input switches to. The first host is reached on
//!     --port (default 5050), the second on --alt-port (default 5051).
//!
//! Commands read from STDIN:
//!
//!     [enter]  switch the mode of the current server
//!     s        switch between the primary and secondary server
//!     quit     exit

use std::io::{self, Write};
use std::process::exit;

use clap::{crate_version, value_t, App, Arg, ArgMatches};
use jks::client::toggle_mode;
use jks::console::Console;
use jks::{JksError, Result};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

const PROMPT: &str =
    "Press enter to switch modes, (s) to switch to secondary server, (quit) to exit: ";

fn main() {
    subscriber_config();

    let matches = App::new("jks-admin")
        .version(crate_version!())
        .author("strohs <strohs1@gmail.com>")
        .about("switches jks servers between joke and proverb mode")
        .arg(Arg::with_name("HOST")
            .index(1)
            .help("the primary server, localhost if not given"))
        .arg(Arg::with_name("ALT_HOST")
            .index(2)
            .help("the secondary server"))
        .arg(Arg::with_name("port")
            .long("port")
            .value_name("PORT")
            .help("the admin port of the primary server")
            .default_value("5050"))
        .arg(Arg::with_name("alt-port")
            .long("alt-port")
            .value_name("PORT")
            .help("the admin port of the secondary server")
            .default_value("5051"))
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

    writeln!(out, "jks-admin starting up")?;
    console.describe(&mut out)?;

    console.run(&mut input, &mut out, PROMPT, "Cancelled by admin.", |target| {
        toggle_mode((target.host.as_str(), target.port))
    })
}

/// configures a tracing subscriber that will log warnings and errors to STDERR
fn subscriber_config() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::WARN)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("setting tracing default subscriber failed");
}
