//! Process-wide booking state shared by every worker.

use std::sync::Arc;
use std::time::Duration;

use crate::dedup::{DedupWindow, DEFAULT_DEDUP_TTL};
use crate::notify::{Notification, Notifier, Outbox};
use crate::pricing::PricingRules;

/// Tunable business rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingRules {
    /// Discount, surcharge and VIP threshold.
    pub pricing: PricingRules,
    /// How long a batch-confirmed id suppresses single confirmation notices.
    pub dedup_ttl: Duration,
    /// Whether Create checks the passenger identifier's structure.
    pub require_valid_identifier: bool,
}

impl Default for BookingRules {
    fn default() -> Self {
        Self {
            pricing: PricingRules::default(),
            dedup_ttl: DEFAULT_DEDUP_TTL,
            require_valid_identifier: false,
        }
    }
}

/// Shared handles every [`super::LifecycleManager`] works with.
///
/// Cloning is cheap; clones share one dedup window and one outbox, so a
/// context built once per process can be handed to each worker.
#[derive(Debug, Clone)]
pub struct BookingContext {
    rules: BookingRules,
    dedup: Arc<DedupWindow>,
    outbox: Arc<Outbox>,
}

impl BookingContext {
    /// Creates a context delivering through `notifier`.
    #[must_use]
    pub fn new(rules: BookingRules, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            rules,
            dedup: Arc::new(DedupWindow::new()),
            outbox: Arc::new(Outbox::spawn(notifier)),
        }
    }

    /// The configured rules.
    #[must_use]
    pub const fn rules(&self) -> &BookingRules {
        &self.rules
    }

    /// The shared dedup window.
    #[must_use]
    pub fn dedup(&self) -> &DedupWindow {
        &self.dedup
    }

    pub(crate) fn notify(&self, notification: Notification) {
        self.outbox.dispatch(notification);
    }

    /// Waits until every notification dispatched so far has been handled.
    pub fn flush(&self) {
        self.outbox.flush();
    }
}
