use std::fmt;
use std::io::{BufReader, BufWriter};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;

use socket2::{Domain, Protocol, Socket, Type};
use tracing::{debug, error, info};

use crate::handler;
use crate::state::ServerState;
use crate::thread_pool::ThreadPool;
use crate::{JksError, Result};

/// the number of pending connections each listener queues up before refusing new ones
pub const BACKLOG: i32 = 6;

/// The two kinds of listener a server runs
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Listener {
    Client,
    Admin,
}

impl fmt::Display for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Listener::Client => write!(f, "client"),
            Listener::Admin => write!(f, "admin"),
        }
    }
}

/// A jks server: a client listener and an admin listener sharing one [`ServerState`].
///
/// Each listener runs its own accept loop. Every accepted connection is handed to the
/// [`ThreadPool`] as a job of its own, and the loop goes straight back to accepting.
///
/// # Example
/// Bind a primary server on all interfaces and run it on a thread per connection
/// ```rust,no_run
/// use jks::{Identity, JksServer, ServerState};
/// use jks::thread_pool::{NaiveThreadPool, ThreadPool};
/// # fn main() -> jks::Result<()> {
/// let identity = Identity::Primary;
/// let state = ServerState::new(identity)?;
/// let server = JksServer::bind(
///     state,
///     NaiveThreadPool::new(0)?,
///     ([0, 0, 0, 0], identity.client_port()).into(),
///     ([0, 0, 0, 0], identity.admin_port()).into(),
/// )?;
/// server.run()
/// # }
/// ```
pub struct JksServer<P: ThreadPool> {
    /// the state shared by every handler
    state: Arc<ServerState>,
    /// runs the handlers
    pool: P,
    clients: TcpListener,
    admin: TcpListener,
}

impl<P: ThreadPool> JksServer<P> {
    /// Creates a server over `state` and binds its client and admin listeners.
    ///
    /// # Errors
    /// returns [`JksError::Bind`] if either address cannot be listened on
    pub fn bind(
        state: ServerState,
        pool: P,
        client_addr: SocketAddr,
        admin_addr: SocketAddr,
    ) -> Result<Self> {
        let clients = listen(client_addr)?;
        let admin = listen(admin_addr)?;

        Ok(JksServer {
            state: Arc::new(state),
            pool,
            clients,
            admin,
        })
    }

    /// the address client requests are accepted on
    pub fn client_addr(&self) -> Result<SocketAddr> {
        Ok(self.clients.local_addr()?)
    }

    /// the address admin requests are accepted on
    pub fn admin_addr(&self) -> Result<SocketAddr> {
        Ok(self.admin.local_addr()?)
    }

    /// a handle to the state shared by the handlers
    pub fn state(&self) -> Arc<ServerState> {
        Arc::clone(&self.state)
    }

    /// Runs both accept loops. This only returns if one of the loops panics.
    pub fn run(&self) -> Result<()> {
        info!("{}Listening for clients at {}", self.state.tag(), self.client_addr()?);
        info!("{}Listening for admin at {}", self.state.tag(), self.admin_addr()?);

        crossbeam::scope(|s| {
            s.spawn(|_| self.accept(&self.admin, Listener::Admin));
            self.accept(&self.clients, Listener::Client);
        })
        .map_err(|_| JksError::AcceptLoopPanicked)
    }

    fn accept(&self, listener: &TcpListener, kind: Listener) {
        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    let state = Arc::clone(&self.state);
                    self.pool.spawn(move || {
                        if let Err(e) = serve(&state, stream, kind) {
                            error!("{}Error on serving {} connection: {}", state.tag(), kind, e);
                        }
                    });
                }
                Err(e) => error!("{} connection failed: {}", kind, e),
            }
        }
    }
}

/// runs the handler for `kind` over `tcp`. The connection is closed once `tcp` is dropped.
fn serve(state: &ServerState, tcp: TcpStream, kind: Listener) -> Result<()> {
    let peer_addr = tcp.peer_addr()?;
    debug!("Accepted {} connection from {}", kind, peer_addr);

    let mut writer = BufWriter::new(&tcp);
    match kind {
        Listener::Client => {
            let mut reader = BufReader::new(&tcp);
            handler::serve_client(state, &mut reader, &mut writer)?;
        }
        Listener::Admin => {
            handler::serve_admin(state, &mut writer)?;
        }
    }
    Ok(())
}

/// binds a TCP listener on `addr` with a backlog of [`BACKLOG`] pending connections
fn listen(addr: SocketAddr) -> Result<TcpListener> {
    let bind = || -> std::io::Result<TcpListener> {
        let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))?;
        socket.set_reuse_address(true)?;
        socket.bind(&addr.into())?;
        socket.listen(BACKLOG)?;
        Ok(socket.into())
    };
    bind().map_err(|source| JksError::Bind { addr, source })
}
