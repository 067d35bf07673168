use std::sync::{Mutex, MutexGuard};

use rand::seq::SliceRandom;
use rand::thread_rng;
use tracing::debug;

use super::ContentItem;
use crate::error::{JksError, Result};

/// An ordered, shuffleable sequence of [`ContentItem`]s.
///
/// The number of items is fixed when the pool is built. The only mutation a pool supports
/// is a whole-sequence reshuffle, which replaces the current ordering with a new random
/// permutation of the same items.
#[derive(Debug)]
pub struct ContentPool {
    // name used in log messages, i.e. "joke" or "proverb"
    name: String,
    // the current permutation of the items
    items: Mutex<Vec<ContentItem>>,
}

impl ContentPool {
    /// creates a new pool named `name` holding `items`. The items are shuffled once before
    /// the pool is returned.
    ///
    /// # Errors
    /// returns [`JksError::EmptyPool`] if `items` is empty
    pub fn new(name: impl Into<String>, mut items: Vec<ContentItem>) -> Result<Self> {
        let name = name.into();
        if items.is_empty() {
            return Err(JksError::EmptyPool(name));
        }
        items.shuffle(&mut thread_rng());

        Ok(ContentPool {
            name,
            items: Mutex::new(items),
        })
    }

    /// the name of this pool
    pub fn name(&self) -> &str {
        &self.name
    }

    /// the number of items in this pool, N
    pub fn len(&self) -> usize {
        // the length never changes after construction, so a poisoned lock still has the
        // right answer
        match self.items.lock() {
            Ok(items) => items.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    /// `true` if the pool holds no items. Pools are never built empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// returns the item at `index` within the current permutation
    ///
    /// # Errors
    /// returns [`JksError::IndexOutOfRange`] if `index` is not within `0..N`
    pub fn current(&self, index: isize) -> Result<ContentItem> {
        let items = self.lock()?;
        usize::try_from(index)
            .ok()
            .and_then(|i| items.get(i))
            .cloned()
            .ok_or(JksError::IndexOutOfRange {
                index,
                len: items.len(),
            })
    }

    /// replaces the ordering of the items with a uniformly random permutation
    pub fn reshuffle(&self) -> Result<()> {
        let mut items = self.lock()?;
        items.shuffle(&mut thread_rng());
        debug!(pool = %self.name, "reshuffled");
        Ok(())
    }

    /// the tags of the items, in their current order
    pub fn tags(&self) -> Result<Vec<String>> {
        Ok(self.lock()?.iter().map(|item| item.tag.clone()).collect())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<ContentItem>>> {
        self.items
            .lock()
            .map_err(|e| JksError::StatePoisoned(format!("{} pool: {}", self.name, e)))
    }
}
