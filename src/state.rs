use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::info;

use crate::content::{self, ContentItem, ContentPool, Rotation};
use crate::{Identity, Result};

/// Which pool is served to client requests
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Mode {
    /// serve from the joke pool
    Joke,
    /// serve from the proverb pool
    Proverb,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Joke => write!(f, "JOKE"),
            Mode::Proverb => write!(f, "PROVERB"),
        }
    }
}

/// The server wide mode switch. Starts in [`Mode::Joke`].
///
/// Readers take a single snapshot with [`mode`](ModeFlag::mode). [`toggle`](ModeFlag::toggle)
/// flips the flag in one atomic operation, so concurrent toggles are never lost.
#[derive(Debug)]
pub struct ModeFlag {
    // true while in joke mode
    joke: AtomicBool,
}

impl ModeFlag {
    /// a new flag in joke mode
    pub fn new() -> Self {
        ModeFlag {
            joke: AtomicBool::new(true),
        }
    }

    /// the current mode
    pub fn mode(&self) -> Mode {
        if self.joke.load(Ordering::SeqCst) {
            Mode::Joke
        } else {
            Mode::Proverb
        }
    }

    /// switches to the other mode and returns the new mode
    pub fn toggle(&self) -> Mode {
        let was_joke = self.joke.fetch_xor(true, Ordering::SeqCst);
        if was_joke {
            Mode::Proverb
        } else {
            Mode::Joke
        }
    }
}

impl Default for ModeFlag {
    fn default() -> Self {
        ModeFlag::new()
    }
}

/// All the state shared by the handlers of one server instance: the line tag, the mode flag
/// and one [`Rotation`] per pool.
///
/// It is built once at startup and handed to every handler behind an `Arc`.
#[derive(Debug)]
pub struct ServerState {
    tag: String,
    mode: ModeFlag,
    jokes: Rotation,
    proverbs: Rotation,
}

impl ServerState {
    /// creates the state of a server running as `identity`, using the built-in catalogs
    pub fn new(identity: Identity) -> Result<Self> {
        ServerState::with_content(
            identity.tag(),
            content::default_jokes(),
            content::default_proverbs(),
        )
    }

    /// creates the state of a server that prefixes its lines with `tag` and serves the
    /// given `jokes` and `proverbs`
    ///
    /// # Errors
    /// returns [`JksError::EmptyPool`](crate::JksError::EmptyPool) if either catalog is empty
    pub fn with_content(
        tag: impl Into<String>,
        jokes: Vec<ContentItem>,
        proverbs: Vec<ContentItem>,
    ) -> Result<Self> {
        let jokes = Rotation::new(ContentPool::new("joke", jokes)?);
        let proverbs = Rotation::new(ContentPool::new("proverb", proverbs)?);
        info!(
            jokes = jokes.pool().len(),
            proverbs = proverbs.pool().len(),
            "content pools loaded"
        );

        Ok(ServerState {
            tag: tag.into(),
            mode: ModeFlag::new(),
            jokes,
            proverbs,
        })
    }

    /// the prefix written in front of every line
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// the current mode
    pub fn mode(&self) -> Mode {
        self.mode.mode()
    }

    /// switches to the other mode and returns the new mode
    pub fn toggle_mode(&self) -> Mode {
        self.mode.toggle()
    }

    /// the rotation serving requests made in `mode`
    pub fn rotation(&self, mode: Mode) -> &Rotation {
        match mode {
            Mode::Joke => &self.jokes,
            Mode::Proverb => &self.proverbs,
        }
    }
}
