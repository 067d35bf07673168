#![deny(missing_docs)]
//! A multithreaded joke and proverb server (jks), that hands every client the next item of
//! its own rotation through a shared pool of content.
//!
//! This crate provides the [`JksServer`] itself, a [`JksClient`], and three executables:
//! [`jks-server`], [`jks-client`] and [`jks-admin`].
//! Clients and admins talk to the server using synchronous networking over a simple, line
//! based protocol.
//!
//! ## Content and Rotations
//! A server holds two [`ContentPool`]s, one of jokes and one of proverbs. Each pool is an
//! ordered sequence of tagged items that can only be reshuffled as a whole.
//!
//! Every client has its own position (its "rotation index") in each pool, kept in that
//! pool's [`RotationTable`]:
//!
//! - a client that has not been served anything in the current cycle sits at `-1`
//! - every request moves the client one position forward and serves the item found there
//! - the request that reaches the last position completes the cycle: the item is served
//! along with a "CYCLE COMPLETED" line, the index goes back to `-1` and the pool is
//! reshuffled
//!
//! ## Modes
//! A server is either in JOKE mode or in PROVERB mode. The mode decides which pool client
//! requests are served from. Switching modes never resets a client's position in either
//! pool, so switching back resumes the rotation where it left off.
//!
//! ## Client / Server
//! A server runs two listeners. The client listener serves content, the admin listener
//! switches the mode. Each accepted connection is handled on a [`ThreadPool`], by default
//! the [`NaiveThreadPool`] which starts one thread per connection.
//!
//! ## Protocol
//! - client port: the client sends its identifier and its display name, each on a line of
//! its own. The server answers with the content line and, if the cycle completed, a second
//! line, then closes the connection.
//! - admin port: the admin only connects. The server switches mode, answers with one line
//! naming the new mode and closes the connection.
//!
//! Clients read at most three lines and stop early when the server closes the connection.
//!
//! ## Primary / Secondary
//! A server runs as one of two [`Identity`]s: the primary server listens on ports 4545
//! (clients) and 5050 (admin), the secondary on 4546 and 5051 and prefixes every line with
//! `<S2> `. The two never share any state.
//!
//! [`jks-server`]: ../jks_server/index.html
//! [`jks-client`]: ../jks_client/index.html
//! [`jks-admin`]: ../jks_admin/index.html

pub use client::JksClient;
pub use content::{Advance, ContentItem, ContentPool, Rotation, RotationTable};
pub use error::{JksError, Result};
pub use identity::Identity;
pub use server::JksServer;
pub use state::{Mode, ModeFlag, ServerState};
pub use thread_pool::{NaiveThreadPool, ThreadPool};

pub mod client;
pub mod console;
pub mod content;
mod error;
pub mod handler;
pub mod identity;
pub mod protocol;
mod server;
mod state;
pub mod thread_pool;
