//! Post-commit notifications.
//!
//! Lifecycle operations hand a [`Notification`] to an [`Outbox`] once their
//! transaction has committed. The outbox delivers on a worker thread through
//! a [`Notifier`]; delivery failures are logged and never reach the caller.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::JoinHandle;

use serde::Serialize;

use crate::error::Result;
use crate::money::Money;
use crate::reservation::Reservation;
use crate::seat::Seat;

/// File name of the JSON-lines outbox inside the data directory.
pub const OUTBOX_FILE_NAME: &str = "outbox.jsonl";

/// Who a notification is addressed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recipient {
    /// Destination address.
    pub email: String,
    /// Name used in the greeting.
    pub display_name: String,
}

/// A reservation together with its seat, as of commit time.
///
/// The reservation carries its full modification history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReservationSnapshot {
    /// The reservation.
    pub reservation: Reservation,
    /// The seat it references.
    pub seat: Seat,
}

/// A message for the external notification collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notification {
    /// A new account was registered.
    UserRegistered {
        /// The new user.
        recipient: Recipient,
    },
    /// A single reservation was confirmed.
    Confirmation {
        /// The reservation owner.
        recipient: Recipient,
        /// The confirmed reservation.
        snapshot: ReservationSnapshot,
    },
    /// A reservation moved to another seat.
    Modification {
        /// The reservation owner.
        recipient: Recipient,
        /// The reservation after the move.
        snapshot: ReservationSnapshot,
    },
    /// A reservation was cancelled.
    Cancellation {
        /// The reservation owner.
        recipient: Recipient,
        /// The cancelled reservation.
        snapshot: ReservationSnapshot,
    },
    /// Several reservations were confirmed together.
    BatchConfirmation {
        /// Owner of the first reservation in the batch.
        recipient: Recipient,
        /// Every confirmed reservation, in request order.
        snapshots: Vec<ReservationSnapshot>,
        /// Sum of the reservations' totals.
        combined_total: Money,
    },
}

impl Notification {
    /// The addressee.
    #[must_use]
    pub const fn recipient(&self) -> &Recipient {
        match self {
            Self::UserRegistered { recipient }
            | Self::Confirmation { recipient, .. }
            | Self::Modification { recipient, .. }
            | Self::Cancellation { recipient, .. }
            | Self::BatchConfirmation { recipient, .. } => recipient,
        }
    }

    /// Short name of the notification kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::UserRegistered { .. } => "user_registered",
            Self::Confirmation { .. } => "confirmation",
            Self::Modification { .. } => "modification",
            Self::Cancellation { .. } => "cancellation",
            Self::BatchConfirmation { .. } => "batch_confirmation",
        }
    }
}

/// Delivers notifications to the outside world.
pub trait Notifier: Send + Sync {
    /// Delivers one notification.
    ///
    /// # Errors
    ///
    /// Returns an error if delivery fails. The outbox logs it and moves on.
    fn deliver(&self, notification: &Notification) -> Result<()>;
}

/// Writes each notification to the log at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn deliver(&self, notification: &Notification) -> Result<()> {
        log::info!(
            "notify {} <{}>: {}",
            notification.recipient().display_name,
            notification.recipient().email,
            notification.kind()
        );
        Ok(())
    }
}

/// Appends each notification as one JSON line to a file.
#[derive(Debug)]
pub struct JsonlNotifier {
    path: PathBuf,
    file: Mutex<()>,
}

impl JsonlNotifier {
    /// Creates a notifier appending to `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: Mutex::new(()),
        }
    }

    /// Creates a notifier appending to the outbox file in `data_dir`.
    #[must_use]
    pub fn in_data_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(OUTBOX_FILE_NAME))
    }

    /// The file being appended to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Notifier for JsonlNotifier {
    fn deliver(&self, notification: &Notification) -> Result<()> {
        let mut line = serde_json::to_string(notification).map_err(std::io::Error::other)?;
        line.push('\n');

        let _guard = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }
}

enum Message {
    Deliver(Notification),
    Flush(Sender<()>),
}

/// Fire-and-forget delivery on a background worker.
///
/// Notifications are delivered one at a time in dispatch order. Dropping the
/// outbox drains whatever is queued before the worker exits.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use seatbook::notify::{LogNotifier, Notification, Outbox, Recipient};
///
/// let outbox = Outbox::spawn(Arc::new(LogNotifier));
/// outbox.dispatch(Notification::UserRegistered {
///     recipient: Recipient {
///         email: "ana@example.com".into(),
///         display_name: "Ana".into(),
///     },
/// });
/// outbox.flush();
/// ```
pub struct Outbox {
    sender: Mutex<Option<Sender<Message>>>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl Outbox {
    /// Starts the worker thread.
    #[must_use]
    pub fn spawn(notifier: Arc<dyn Notifier>) -> Self {
        let (sender, receiver) = mpsc::channel::<Message>();
        let worker = std::thread::spawn(move || {
            for message in receiver {
                match message {
                    Message::Deliver(notification) => {
                        if let Err(e) = notifier.deliver(&notification) {
                            log::warn!(
                                "failed to deliver {} notification to {}: {e}",
                                notification.kind(),
                                notification.recipient().email
                            );
                        }
                    }
                    Message::Flush(done) => {
                        let _ = done.send(());
                    }
                }
            }
        });

        Self {
            sender: Mutex::new(Some(sender)),
            worker: Mutex::new(Some(worker)),
        }
    }

    /// Queues a notification and returns immediately.
    pub fn dispatch(&self, notification: Notification) {
        let sender = self.sender.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(sender) = sender.as_ref() else {
            log::warn!("outbox is shut down; dropping {} notification", notification.kind());
            return;
        };
        if sender.send(Message::Deliver(notification)).is_err() {
            log::warn!("outbox worker has stopped; notification dropped");
        }
    }

    /// Blocks until everything dispatched so far has been handled.
    pub fn flush(&self) {
        let (done, wait) = mpsc::channel();
        {
            let sender = self.sender.lock().unwrap_or_else(PoisonError::into_inner);
            let Some(sender) = sender.as_ref() else {
                return;
            };
            if sender.send(Message::Flush(done)).is_err() {
                return;
            }
        }
        let _ = wait.recv();
    }

    /// Stops accepting notifications, drains the queue and joins the worker.
    pub fn shutdown(&self) {
        self.sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        let worker = self
            .worker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(worker) = worker {
            if worker.join().is_err() {
                log::warn!("notification worker panicked");
            }
        }
    }
}

impl std::fmt::Debug for Outbox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Outbox").finish_non_exhaustive()
    }
}

impl Drop for Outbox {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::tempdir;

    #[derive(Default)]
    struct Recording(Mutex<Vec<Notification>>);

    impl Notifier for Recording {
        fn deliver(&self, notification: &Notification) -> Result<()> {
            self.0.lock().unwrap().push(notification.clone());
            Ok(())
        }
    }

    struct Failing;

    impl Notifier for Failing {
        fn deliver(&self, _: &Notification) -> Result<()> {
            Err(Error::Io(std::io::Error::other("smtp down")))
        }
    }

    fn welcome(email: &str) -> Notification {
        Notification::UserRegistered {
            recipient: Recipient {
                email: email.into(),
                display_name: "Ana".into(),
            },
        }
    }

    #[test]
    fn test_outbox_delivers_in_order() {
        let recording = Arc::new(Recording::default());
        let outbox = Outbox::spawn(recording.clone());
        outbox.dispatch(welcome("a@x.com"));
        outbox.dispatch(welcome("b@x.com"));
        outbox.flush();

        let seen: Vec<_> = recording
            .0
            .lock()
            .unwrap()
            .iter()
            .map(|n| n.recipient().email.clone())
            .collect();
        assert_eq!(seen, vec!["a@x.com", "b@x.com"]);
    }

    #[test]
    fn test_failures_do_not_stop_worker() {
        let outbox = Outbox::spawn(Arc::new(Failing));
        outbox.dispatch(welcome("a@x.com"));
        outbox.dispatch(welcome("b@x.com"));
        outbox.flush();
    }

    #[test]
    fn test_shutdown_drains_queue() {
        let recording = Arc::new(Recording::default());
        let outbox = Outbox::spawn(recording.clone());
        outbox.dispatch(welcome("a@x.com"));
        outbox.shutdown();
        assert_eq!(recording.0.lock().unwrap().len(), 1);

        // Dispatch after shutdown is dropped, not a panic.
        outbox.dispatch(welcome("b@x.com"));
        outbox.flush();
        assert_eq!(recording.0.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_jsonl_notifier_appends_lines() {
        let dir = tempdir().unwrap();
        let notifier = JsonlNotifier::in_data_dir(dir.path());
        notifier.deliver(&welcome("a@x.com")).unwrap();
        notifier.deliver(&welcome("b@x.com")).unwrap();

        let content = std::fs::read_to_string(notifier.path()).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["kind"], "user_registered");
        assert_eq!(first["recipient"]["email"], "a@x.com");
    }
}
