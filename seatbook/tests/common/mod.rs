//! Shared fixtures for seatbook integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use seatbook::notify::{Notification, Notifier};
use seatbook::operations::{BookingContext, BookingRules, LifecycleManager};
use seatbook::{
    CabinClass, Database, DatabaseConfig, Error, Money, NewReservation, Passenger, Result, Seat,
    SeatId, User,
};
use tempfile::TempDir;

/// Passenger identifier used by [`passenger`], with separators.
pub const PASSENGER_ID: &str = "1234 56789 0101";

/// A database file in a temporary directory.
pub struct TestStore {
    _dir: TempDir,
    path: PathBuf,
}

impl TestStore {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("seatbook.db");
        Self { _dir: dir, path }
    }

    /// Opens a fresh connection to the store.
    pub fn open(&self) -> Database {
        Database::open(DatabaseConfig::new(&self.path)).unwrap()
    }
}

/// Remembers every delivered notification.
#[derive(Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn notifications(&self) -> Vec<Notification> {
        self.seen.lock().unwrap().clone()
    }

    pub fn kinds(&self) -> Vec<&'static str> {
        self.seen.lock().unwrap().iter().map(Notification::kind).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn deliver(&self, notification: &Notification) -> Result<()> {
        self.seen.lock().unwrap().push(notification.clone());
        Ok(())
    }
}

/// Fails every delivery.
pub struct FailingNotifier;

impl Notifier for FailingNotifier {
    fn deliver(&self, _: &Notification) -> Result<()> {
        Err(Error::Io(std::io::Error::other("mail relay unreachable")))
    }
}

/// A context with default rules recording notifications.
pub fn recording_context() -> (BookingContext, Arc<RecordingNotifier>) {
    recording_context_with(BookingRules::default())
}

pub fn recording_context_with(rules: BookingRules) -> (BookingContext, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::default());
    (BookingContext::new(rules, notifier.clone()), notifier)
}

pub fn passenger() -> Passenger {
    Passenger::new("Ana Lopez", PASSENGER_ID, true).unwrap()
}

pub fn request(seat: &str, email: &str, base_cents: i64) -> NewReservation {
    NewReservation::builder(
        SeatId::new(seat).unwrap(),
        email,
        passenger(),
        Money::from_cents(base_cents),
    )
    .build()
    .unwrap()
}

/// Adds seats and users through the lifecycle manager.
pub fn provision(
    db: &mut Database,
    ctx: &BookingContext,
    seats: &[(&str, CabinClass)],
    users: &[(&str, &str)],
) {
    let mut manager = LifecycleManager::new(db, ctx);
    for (id, class) in seats {
        manager
            .add_seat(Seat::new(SeatId::new(id).unwrap(), *id, *class))
            .unwrap();
    }
    for (email, name) in users {
        manager.register_user(User::new(email, name).unwrap()).unwrap();
    }
}

pub fn seat(db: &Database, id: &str) -> Seat {
    Database::get_seat(db.connection(), &SeatId::new(id).unwrap())
        .unwrap()
        .unwrap()
}

pub fn user(db: &Database, email: &str) -> User {
    Database::get_user(db.connection(), email).unwrap().unwrap()
}
