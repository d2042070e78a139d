//! Concurrent workers racing for the same seats.
//!
//! Every worker owns its own connection to the same database file, the way
//! separate processes would.

mod common;

use std::sync::{Arc, Barrier};
use std::thread;

use common::{provision, recording_context, request, seat, user, TestStore, PASSENGER_ID};
use seatbook::operations::LifecycleManager;
use seatbook::{report, CabinClass, Error, ModifyOptions, SeatId, SeatState};

const WORKERS: usize = 8;

#[test]
fn test_one_winner_per_seat() {
    let store = Arc::new(TestStore::new());
    let (ctx, _) = recording_context();
    {
        let mut db = store.open();
        let users: Vec<String> = (0..WORKERS).map(|n| format!("user{n}@example.com")).collect();
        let user_refs: Vec<(&str, &str)> = users.iter().map(|e| (e.as_str(), "Passenger")).collect();
        provision(&mut db, &ctx, &[("A1", CabinClass::Economy)], &user_refs);
    }

    let barrier = Arc::new(Barrier::new(WORKERS));
    let handles: Vec<_> = (0..WORKERS)
        .map(|n| {
            let store = Arc::clone(&store);
            let barrier = Arc::clone(&barrier);
            let ctx = ctx.clone();
            thread::spawn(move || {
                let mut db = store.open();
                barrier.wait();
                LifecycleManager::new(&mut db, &ctx)
                    .create(request("A1", &format!("user{n}@example.com"), 10_000))
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let winners = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(winners, 1);
    for err in results.iter().filter_map(|r| r.as_ref().err()) {
        assert!(err.is_conflict(), "unexpected error: {err}");
    }

    let db = store.open();
    assert_eq!(seat(&db, "A1").state, SeatState::Occupied);
    assert!(report::audit(db.connection()).unwrap().is_empty());

    // Only the winner's counter moved.
    let counted: u32 = (0..WORKERS)
        .map(|n| user(&db, &format!("user{n}@example.com")).reservation_count)
        .sum();
    assert_eq!(counted, 1);
}

#[test]
fn test_disjoint_seats_all_succeed() {
    let store = Arc::new(TestStore::new());
    let (ctx, _) = recording_context();
    {
        let mut db = store.open();
        let seats: Vec<String> = (0..WORKERS).map(|n| format!("C{n}")).collect();
        let seat_refs: Vec<(&str, CabinClass)> = seats
            .iter()
            .map(|s| (s.as_str(), CabinClass::Economy))
            .collect();
        provision(&mut db, &ctx, &seat_refs, &[("ana@example.com", "Ana")]);
    }

    let handles: Vec<_> = (0..WORKERS)
        .map(|n| {
            let store = Arc::clone(&store);
            let ctx = ctx.clone();
            thread::spawn(move || {
                let mut db = store.open();
                LifecycleManager::new(&mut db, &ctx)
                    .create(request(&format!("C{n}"), "ana@example.com", 10_000))
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap().unwrap();
    }

    let db = store.open();
    assert_eq!(
        user(&db, "ana@example.com").reservation_count,
        u32::try_from(WORKERS).unwrap()
    );
    assert!(report::audit(db.connection()).unwrap().is_empty());
}

#[test]
fn test_racing_moves_to_one_target() {
    let store = Arc::new(TestStore::new());
    let (ctx, _) = recording_context();
    let ids = {
        let mut db = store.open();
        provision(
            &mut db,
            &ctx,
            &[
                ("A1", CabinClass::Economy),
                ("A2", CabinClass::Economy),
                ("A3", CabinClass::Economy),
            ],
            &[("ana@example.com", "Ana")],
        );
        let mut manager = LifecycleManager::new(&mut db, &ctx);
        vec![
            manager.create(request("A1", "ana@example.com", 100)).unwrap().id,
            manager.create(request("A2", "ana@example.com", 100)).unwrap().id,
        ]
    };

    let barrier = Arc::new(Barrier::new(ids.len()));
    let handles: Vec<_> = ids
        .into_iter()
        .map(|id| {
            let store = Arc::clone(&store);
            let barrier = Arc::clone(&barrier);
            let ctx = ctx.clone();
            thread::spawn(move || {
                let mut db = store.open();
                barrier.wait();
                LifecycleManager::new(&mut db, &ctx).modify(ModifyOptions::new(
                    id,
                    SeatId::new("A3").unwrap(),
                    PASSENGER_ID,
                ))
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    for err in results.iter().filter_map(|r| r.as_ref().err()) {
        assert!(
            matches!(err, Error::SeatUnavailable { .. }) || err.is_conflict(),
            "unexpected error: {err}"
        );
    }

    let db = store.open();
    assert!(report::audit(db.connection()).unwrap().is_empty());
}
