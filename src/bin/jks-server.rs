//! this binary starts the jks server
//! to see the list of options, type: `jks-server --help`
//!
//! `jks-server [primary|secondary]`
//!
//!     Starts a server as the primary (the default) or the secondary identity. The primary
//!     server accepts clients on port 4545 and admins on port 5050, the secondary on 4546 and
//!     5051. --client-port and --admin-port override the ports of the chosen identity.

use std::net::{IpAddr, SocketAddr};
use std::process::exit;

use clap::{crate_version, value_t, App, Arg};
use jks::{Identity, JksError, JksServer, NaiveThreadPool, Result, ServerState, ThreadPool};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_LOG_LEVEL: &str = "info";

/// ['Opt'] holds parsed and validated options from the command line
#[derive(Debug)]
struct Opt {
    identity: Identity,
    client_addr: SocketAddr,
    admin_addr: SocketAddr,
}

impl Opt {
    /// validates the `host` parameter and fills in the ports the `identity` does not get
    /// from the command line
    /// # Errors
    /// returns [`JksError::Parsing`] if `host` is not an IP address
    fn build(
        identity: Identity,
        host: &str,
        client_port: Option<u16>,
        admin_port: Option<u16>,
    ) -> Result<Opt> {
        let ip: IpAddr = host
            .parse()
            .map_err(|_| JksError::Parsing(format!("could not parse {} into an IP address", host)))?;

        Ok(Opt {
            identity,
            client_addr: SocketAddr::new(ip, client_port.unwrap_or_else(|| identity.client_port())),
            admin_addr: SocketAddr::new(ip, admin_port.unwrap_or_else(|| identity.admin_port())),
        })
    }
}

fn main() {
    let matches = App::new("jks-server")
        .version(crate_version!())
        .author("strohs <strohs1@gmail.com>")
        .about("serves jokes and proverbs to jks clients")
        .arg(Arg::with_name("IDENTITY")
            .index(1)
            .possible_values(&["primary", "secondary"])
            .help("runs the server as the primary or the secondary server"))
        .arg(Arg::with_name("host")
            .long("host")
            .value_name("IP_ADDR")
            .help("sets the IP address both listeners bind to")
            .default_value(DEFAULT_HOST))
        .arg(Arg::with_name("client-port")
            .long("client-port")
            .value_name("PORT")
            .help("overrides the client port of the identity")
            .takes_value(true))
        .arg(Arg::with_name("admin-port")
            .long("admin-port")
            .value_name("PORT")
            .help("overrides the admin port of the identity")
            .takes_value(true))
        .arg(Arg::with_name("log-level")
            .long("log-level")
            .value_name("LEVEL")
            .help("the most verbose level written to STDERR")
            .possible_values(&["error", "warn", "info", "debug", "trace"])
            .default_value(DEFAULT_LOG_LEVEL))
        .get_matches();

    let level = value_t!(matches, "log-level", Level).unwrap_or_else(|e| e.exit());
    subscriber_config(level);

    let identity = value_t!(matches, "IDENTITY", Identity).unwrap_or_default();
    let client_port = matches
        .value_of("client-port")
        .map(|_| value_t!(matches, "client-port", u16).unwrap_or_else(|e| e.exit()));
    let admin_port = matches
        .value_of("admin-port")
        .map(|_| value_t!(matches, "admin-port", u16).unwrap_or_else(|e| e.exit()));
    let host = matches.value_of("host").unwrap_or(DEFAULT_HOST);

    let opt = match Opt::build(identity, host, client_port, admin_port) {
        Ok(opt) => opt,
        Err(err) => {
            eprintln!("{:?}", err);
            exit(1);
        }
    };

    // start the server
    if let Err(e) = run(opt) {
        eprintln!("{:?}", e);
        exit(1);
    }
}

fn run(opt: Opt) -> Result<()> {
    info!("{}jks-server {} starting up as {}", opt.identity.tag(), env!("CARGO_PKG_VERSION"), opt.identity);

    let state = ServerState::new(opt.identity)?;
    let server = JksServer::bind(state, NaiveThreadPool::new(0)?, opt.client_addr, opt.admin_addr)?;
    server.run()
}

/// configures a tracing subscriber that will log to STDERR
fn subscriber_config(level: Level) {
    let subscriber = FmtSubscriber::builder()
        // all spans/events at `level` or above will be written
        .with_max_level(level)
        // log to stderr instead of stdout
        .with_writer(std::io::stderr)
        // completes the builder.
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("setting tracing default subscriber failed");
}
