use std::io;
use std::net::SocketAddr;
use thiserror::Error;

/// type alias for all operations on the jks server and clients that could fail with a [`JksError`]
pub type Result<T> = std::result::Result<T, JksError>;

/// The Error variants used throughout the jks crate.
#[derive(Error, Debug)]
pub enum JksError {
    /// variant for errors caused by socket or console IO
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// a listener could not be set up on `addr`
    #[error("could not listen on {addr}: {source}")]
    Bind {
        /// the address that was requested
        addr: SocketAddr,
        /// the underlying socket error
        source: io::Error,
    },

    /// one of the accept loops of a server panicked
    #[error("accept loop panicked")]
    AcceptLoopPanicked,

    /// the peer broke the line protocol, i.e. it closed the stream before identifying itself
    #[error("protocol error: {0}")]
    Protocol(String),

    /// a command line parameter or console input could not be parsed
    #[error("parsing error: {0}")]
    Parsing(String),

    /// a rotation was advanced for a client that was never initialized
    #[error("no rotation entry for client {0}")]
    UnknownClient(String),

    /// a content pool must hold at least one item
    #[error("content pool '{0}' has no items")]
    EmptyPool(String),

    /// an index outside of `0..len` was used to look up a content item
    #[error("index {index} is out of range for a pool of {len} items")]
    IndexOutOfRange {
        /// the requested index
        index: isize,
        /// the number of items in the pool
        len: usize,
    },

    /// a thread panicked while holding a lock on shared server state
    #[error("shared state poisoned: {0}")]
    StatePoisoned(String),
}
