//! This module holds the content served by jks: the [`ContentPool`]s of jokes and proverbs,
//! the per-client [`RotationTable`]s, and the [`Rotation`] type that ties one pool to its
//! table.
//!
//! Every client walks through a pool in the pool's current order. When a client reaches the
//! last position its cycle completes, its index goes back to `-1` and the pool is reshuffled.
use std::fmt;

use crate::Result;

mod pool;
mod rotation;

pub use self::pool::ContentPool;
pub use self::rotation::{Advance, RotationTable, NOT_STARTED};

/// An immutable piece of content: a short tag (e.g. "JA") and the text itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentItem {
    /// short tag identifying the item within its pool
    pub tag: String,
    /// the joke or proverb
    pub body: String,
}

impl ContentItem {
    /// builds a new item from a `tag` and `body`
    pub fn new(tag: impl Into<String>, body: impl Into<String>) -> Self {
        ContentItem {
            tag: tag.into(),
            body: body.into(),
        }
    }
}

impl fmt::Display for ContentItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.tag, self.body)
    }
}

/// A [`ContentPool`] together with the [`RotationTable`] of the clients walking through it
#[derive(Debug)]
pub struct Rotation {
    pool: ContentPool,
    table: RotationTable,
}

impl Rotation {
    /// creates a rotation over `pool` with no clients yet
    pub fn new(pool: ContentPool) -> Self {
        Rotation {
            pool,
            table: RotationTable::new(),
        }
    }

    /// the content pool of this rotation
    pub fn pool(&self) -> &ContentPool {
        &self.pool
    }

    /// the client table of this rotation
    pub fn table(&self) -> &RotationTable {
        &self.table
    }

    /// serves the next item of the pool to client `id`, registering the client at `-1`
    /// first if it has not been seen in this rotation before
    pub fn next_for(&self, id: &str) -> Result<Advance> {
        if !self.table.has(id) {
            self.table.initialize(id);
        }
        self.table.advance(id, &self.pool)
    }
}

/// the built-in joke catalog, tagged `JA` through `JD`
pub fn default_jokes() -> Vec<ContentItem> {
    vec![
        ContentItem::new("JA", "I told my computer I needed a break, and it said no problem, it would go to sleep."),
        ContentItem::new("JB", "Why do programmers prefer dark mode? Because light attracts bugs."),
        ContentItem::new("JC", "I would tell you a UDP joke, but you might not get it."),
        ContentItem::new("JD", "There are 10 kinds of people: those who understand binary and those who don't."),
    ]
}

/// the built-in proverb catalog, tagged `PA` through `PD`
pub fn default_proverbs() -> Vec<ContentItem> {
    vec![
        ContentItem::new("PA", "A journey of a thousand miles begins with a single step."),
        ContentItem::new("PB", "Still waters run deep."),
        ContentItem::new("PC", "The early bird catches the worm."),
        ContentItem::new("PD", "When in Rome, do as the Romans do."),
    ]
}
