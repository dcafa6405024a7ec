//! Monotonic tab id allocation.

use super::TabId;

/// Hands out tab ids: strictly increasing, starting at 1, never reused.
///
/// An id handed out for a creation that later fails is simply skipped; it is
/// never offered again.
#[derive(Debug)]
pub struct TabIdAllocator {
    next: TabId,
}

impl TabIdAllocator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Allocate the next id
    pub fn next_id(&mut self) -> TabId {
        let id = self.next;
        self.next = match self.next.checked_add(1) {
            Some(next) => next,
            None => {
                log::error!("Tab id space exhausted at {}", id);
                id
            }
        };
        id
    }

    /// The id the next call to [`next_id`](Self::next_id) will return
    pub fn peek(&self) -> TabId {
        self.next
    }
}

impl Default for TabIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
