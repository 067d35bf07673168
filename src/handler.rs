//! The per-connection units of work of a jks server.
//!
//! Both handlers work on any reader/writer pair, the listeners in [`server`](crate::server)
//! hand them the two halves of an accepted `TcpStream`.
use std::io::{BufRead, Write};

use tracing::{info, instrument};

use crate::protocol::{self, Request, Response};
use crate::state::{Mode, ServerState};
use crate::Result;

/// Serves one client request.
///
/// Reads the client's identity from `reader`, takes one snapshot of the server mode, serves
/// the next item of that mode's rotation to the client and writes the [`Response`] to
/// `writer`. Rotation state is only touched once the identity was read successfully.
///
/// # Errors
/// returns [`JksError::Protocol`](crate::JksError::Protocol) if the identity is incomplete,
/// in which case nothing is written
#[instrument(skip_all)]
pub fn serve_client<R: BufRead, W: Write>(
    state: &ServerState,
    reader: &mut R,
    writer: &mut W,
) -> Result<Response> {
    let request = Request::read_from(reader)?;
    let mode = state.mode();

    let step = state.rotation(mode).next_for(&request.id)?;
    let response = Response::new(state.tag(), mode, &request.name, &step);
    response.write_to(writer)?;

    info!("{}Sent {} {:?} {}", state.tag(), request.name, mode, step.item.tag);
    if step.cycle_completed {
        info!("{}{} CYCLE COMPLETED FOR {}", state.tag(), mode, request.name);
    }
    Ok(response)
}

/// Serves one admin request: flips the server mode and reports the new mode to `writer`
#[instrument(skip_all)]
pub fn serve_admin<W: Write>(state: &ServerState, writer: &mut W) -> Result<Mode> {
    let mode = state.toggle_mode();
    info!("{}Server has been switched into {} mode by admin.", state.tag(), mode);

    writeln!(writer, "{}", protocol::mode_switched(state.tag(), mode))?;
    writer.flush()?;
    Ok(mode)
}
