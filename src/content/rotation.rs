use dashmap::DashMap;
use tracing::debug;

use super::{ContentItem, ContentPool};
use crate::error::{JksError, Result};

/// the index stored for a client that has not been served anything in the current cycle
pub const NOT_STARTED: isize = -1;

/// The result of advancing a client's rotation by one step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advance {
    /// the (pre-reset) index the client advanced to
    pub index: isize,
    /// `true` if `index` was the last position of the pool, i.e. the cycle is complete
    pub cycle_completed: bool,
    /// the item found at `index` before any reshuffle took place
    pub item: ContentItem,
}

/// Maps client identifiers to the index of the last item they were served from one pool.
///
/// Entries are created lazily and live as long as the table does. Every entry holds a value
/// in `-1..N-1`, where `-1` means "nothing served yet in the current cycle".
///
/// The read-modify-write of an entry in [`advance`](RotationTable::advance) happens while
/// holding the entry's shard lock, so concurrent requests for the same client never lose an
/// update.
#[derive(Debug, Default)]
pub struct RotationTable {
    entries: DashMap<String, isize>,
}

impl RotationTable {
    /// creates an empty table
    pub fn new() -> Self {
        RotationTable {
            entries: DashMap::new(),
        }
    }

    /// `true` if an entry exists for `id`
    pub fn has(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// creates an entry for `id` at index `-1`. Does nothing if the entry already exists.
    pub fn initialize(&self, id: &str) {
        self.entries.entry(id.to_string()).or_insert(NOT_STARTED);
    }

    /// the index currently stored for `id`, if any
    pub fn index(&self, id: &str) -> Option<isize> {
        self.entries.get(id).map(|entry| *entry)
    }

    /// the number of clients tracked by this table
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if no client has been tracked yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// advances the rotation of `id` through `pool` by one step.
    ///
    /// The stored index is incremented and the item at the new index is read from `pool`.
    /// If the new index is the last position of the pool, the stored index is reset to `-1`
    /// and `pool` is reshuffled; the returned [`Advance`] still carries the last item and
    /// reports `cycle_completed`.
    ///
    /// # Errors
    /// returns [`JksError::UnknownClient`] if `id` was never initialized
    pub fn advance(&self, id: &str, pool: &ContentPool) -> Result<Advance> {
        let mut entry = self
            .entries
            .get_mut(id)
            .ok_or_else(|| JksError::UnknownClient(id.to_string()))?;

        let index = *entry + 1;
        let item = pool.current(index)?;
        let cycle_completed = index == pool.len() as isize - 1;

        if cycle_completed {
            *entry = NOT_STARTED;
            pool.reshuffle()?;
            debug!(client = id, pool = pool.name(), "cycle completed, rotation reset");
        } else {
            *entry = index;
        }

        Ok(Advance {
            index,
            cycle_completed,
            item,
        })
    }
}
