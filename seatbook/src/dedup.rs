//! Short-lived suppression of duplicate confirmation notices.
//!
//! After a batch confirmation has notified for a set of reservations, a
//! single confirmation of one of them shortly afterwards should not notify
//! again. The window is advisory and in-memory only: it is consulted after
//! commit, never blocks a transaction, and a missed suppression merely sends
//! a duplicate notice.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use crate::reservation::ReservationId;

/// Default time a batch-confirmed id stays in the window.
pub const DEFAULT_DEDUP_TTL: Duration = Duration::from_millis(10_000);

/// A time-indexed set of recently batch-notified reservation ids.
///
/// Entries expire individually. Expired entries are swept lazily whenever
/// the window is touched, or explicitly through [`DedupWindow::sweep`].
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use seatbook::{DedupWindow, ReservationId};
///
/// let window = DedupWindow::new();
/// let id = ReservationId::new(1);
/// window.mark_batch(&[id], Duration::from_secs(10));
/// assert!(window.contains(id));
/// assert!(!window.contains(ReservationId::new(2)));
/// ```
#[derive(Debug, Default)]
pub struct DedupWindow {
    entries: Mutex<HashMap<ReservationId, Instant>>,
}

impl DedupWindow {
    /// Creates an empty window.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds each id with an expiry of now + `ttl`.
    ///
    /// Re-marking an id extends its expiry.
    pub fn mark_batch(&self, ids: &[ReservationId], ttl: Duration) {
        self.mark_batch_at(ids, ttl, Instant::now());
    }

    /// Whether `id` is in the window and not yet expired.
    #[must_use]
    pub fn contains(&self, id: ReservationId) -> bool {
        self.contains_at(id, Instant::now())
    }

    /// Removes every expired entry and returns how many were removed.
    pub fn sweep(&self) -> usize {
        self.sweep_at(Instant::now())
    }

    /// Number of entries, including any not yet swept.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the window holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn mark_batch_at(&self, ids: &[ReservationId], ttl: Duration, now: Instant) {
        let expiry = now + ttl;
        let mut entries = self.lock();
        Self::sweep_locked(&mut entries, now);
        for id in ids {
            entries.insert(*id, expiry);
        }
    }

    fn contains_at(&self, id: ReservationId, now: Instant) -> bool {
        let mut entries = self.lock();
        match entries.get(&id) {
            Some(expiry) if *expiry > now => true,
            Some(_) => {
                entries.remove(&id);
                false
            }
            None => false,
        }
    }

    fn sweep_at(&self, now: Instant) -> usize {
        Self::sweep_locked(&mut self.lock(), now)
    }

    fn sweep_locked(entries: &mut HashMap<ReservationId, Instant>, now: Instant) -> usize {
        let before = entries.len();
        entries.retain(|_, expiry| *expiry > now);
        before - entries.len()
    }

    // A panic while holding the lock cannot leave the map half-updated, so a
    // poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, HashMap<ReservationId, Instant>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
