//! Client side of the jks protocols.
use std::io::{BufReader, BufWriter};
use std::net::{TcpStream, ToSocketAddrs};

use tracing::debug;

use crate::protocol::{self, Request};
use crate::Result;

/// `JksClient` contains the functionality for talking to a [`JksServer`](crate::JksServer).
///
/// Every request uses a connection of its own: the client connects, sends what the protocol
/// asks for and reads back at most three lines, stopping early when the server closes the
/// connection.
#[derive(Debug, Clone)]
pub struct JksClient {
    /// opaque token identifying this client to the server
    id: String,
    /// the name shown in served content
    name: String,
}

impl JksClient {
    /// creates a client called `name` with a freshly generated identifier
    pub fn new(name: impl Into<String>) -> Self {
        JksClient::with_id(uuid::Uuid::new_v4().to_string(), name)
    }

    /// creates a client called `name` that identifies itself with `id`
    pub fn with_id(id: impl Into<String>, name: impl Into<String>) -> Self {
        JksClient {
            id: id.into(),
            name: name.into(),
        }
    }

    /// this client's identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// this client's display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// requests the next joke or proverb from the client port at `addr`
    /// ## Returns
    /// the lines sent back by the server: the content line, followed by a cycle completion
    /// line if this request completed a cycle
    pub fn request<A: ToSocketAddrs>(&self, addr: A) -> Result<Vec<String>> {
        let tcp = TcpStream::connect(addr)?;
        let peer_addr = tcp.peer_addr()?;
        Request::new(self.id.as_str(), self.name.as_str()).write_to(&mut BufWriter::new(&tcp))?;

        let lines = protocol::read_response(&mut BufReader::new(&tcp))?;
        debug!(?lines, "response from {}", peer_addr);
        Ok(lines)
    }
}

/// switches the mode of the server whose admin port is at `addr`
/// ## Returns
/// the lines sent back by the server, normally a single line naming the new mode
pub fn toggle_mode<A: ToSocketAddrs>(addr: A) -> Result<Vec<String>> {
    let tcp = TcpStream::connect(addr)?;
    let peer_addr = tcp.peer_addr()?;
    let lines = protocol::read_response(&mut BufReader::new(&tcp))?;
    debug!(?lines, "admin response from {}", peer_addr);
    Ok(lines)
}
