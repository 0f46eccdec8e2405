//! Integration tests for the booking flow
//!
//! Drives the stock cinema end to end: build, click, summarise, commit.

#![allow(clippy::unwrap_used, clippy::panic)]

use cinema_seating::{
    BookingError, BookingSession, Clock, Effect, Money, RowSegment, SeatColor, SeatId, SeatStatus,
    SeatingAction, TierKey, VenueConfig,
};
use cinema_seating_testing::fixtures::cinema_reducer;
use cinema_seating_testing::{
    ReducerTest, assertions, cinema_session, init_test_tracing, test_clock, test_environment,
};

fn toggle(id: &str) -> SeatingAction {
    SeatingAction::ToggleSeat {
        seat_id: SeatId::from(id),
    }
}

#[test]
fn test_initial_chart_marks_prebooked_seats() {
    init_test_tracing();
    let (session, _) = cinema_session(&["A1", "C4"]);
    let map = session.seat_map();

    assert_eq!(map.len(), 96);
    assert_eq!(map.row_count(), 8);
    assert_eq!(map.seats_per_row(), 12);
    assert_eq!(
        map.ids_with_status(SeatStatus::Booked),
        vec![SeatId::from("A1"), SeatId::from("C4")]
    );
    assert_eq!(map.count_by_status(SeatStatus::Available), 94);

    let a1 = map.seat(&SeatId::from("A1")).unwrap();
    assert_eq!(a1.tier, TierKey::from("regular"));
    assert_eq!(a1.price, Money::from_major(150));
    assert_eq!(a1.color, SeatColor::Blue);
    assert!(!a1.is_clickable());

    let h12 = map.seat(&SeatId::from("H12")).unwrap();
    assert_eq!(h12.tier, TierKey::from("vip"));
    assert_eq!(h12.color, SeatColor::Yellow);
}

#[test]
fn test_select_three_and_commit() {
    init_test_tracing();
    let (mut session, notifier) = cinema_session(&["A1", "C4"]);

    for id in ["A2", "A3", "D6"] {
        assert_eq!(session.toggle(&SeatId::from(id)), Some(SeatStatus::Selected));
    }

    let summary = session.summary();
    assert_eq!(summary.count, 3);
    assert_eq!(summary.total, Money::from_major(550));
    assert_eq!(summary.seat_list(), "A2, A3, D6");
    assert_eq!(summary.action_label("₹"), "Book 3 Seat(s) • ₹550");

    let result = session.commit().unwrap();
    assert_eq!(
        result.seat_ids,
        vec![SeatId::from("A2"), SeatId::from("A3"), SeatId::from("D6")]
    );
    assert_eq!(result.total_price, Money::from_major(550));
    assert_eq!(result.committed_at, test_clock().now());
    assert!(result.seats.iter().all(|seat| seat.status == SeatStatus::Booked));

    assert_eq!(notifier.results(), vec![result]);
    assert!(session.selection().is_empty());
    assert_eq!(session.seat_map().count_by_status(SeatStatus::Booked), 5);
    assert!(!session.summary().is_bookable());
    assert_eq!(session.summary().action_label("₹"), "Select seats");
}

#[test]
fn test_empty_commit_is_rejected_without_callback() {
    let (mut session, notifier) = cinema_session(&[]);
    let before = session.state().clone();

    let error = session.commit().unwrap_err();

    assert_eq!(error, BookingError::EmptySelection);
    assert_eq!(error.to_string(), "No seats selected");
    assert_eq!(notifier.count(), 0);
    assert_eq!(session.seat_map(), &before.seat_map);
    assert_eq!(session.selection(), &before.selection);
}

#[test]
fn test_second_commit_after_success_is_empty() {
    let (mut session, notifier) = cinema_session(&[]);
    session.toggle(&SeatId::from("E1"));
    session.commit().unwrap();

    assert_eq!(session.commit(), Err(BookingError::EmptySelection));
    assert_eq!(notifier.count(), 1);
}

#[test]
fn test_committed_seats_cannot_be_reselected() {
    let (mut session, _) = cinema_session(&[]);
    let id = SeatId::from("F8");
    session.toggle(&id);
    session.commit().unwrap();

    assert_eq!(session.toggle(&id), Some(SeatStatus::Booked));
    assert!(session.selection().is_empty());
}

#[test]
fn test_rebuild_drops_selection_and_applies_new_bookings() {
    let (mut session, _) = cinema_session(&["A1"]);
    session.toggle(&SeatId::from("B2"));

    session.rebuild(&[SeatId::from("B2"), SeatId::from("H12")]);

    assert!(session.selection().is_empty());
    let map = session.seat_map();
    assert_eq!(
        map.ids_with_status(SeatStatus::Booked),
        vec![SeatId::from("B2"), SeatId::from("H12")]
    );
    assert_eq!(map.seat(&SeatId::from("A1")).unwrap().status, SeatStatus::Available);
    assert!(session.state().is_consistent());
}

#[test]
fn test_booked_seats_survive_every_command() {
    let (mut session, notifier) = cinema_session(&["A1"]);
    let a1 = SeatId::from("A1");

    let effects = session.send(SeatingAction::ToggleSeat { seat_id: a1.clone() });
    assertions::assert_empty_effects(&effects);

    session.toggle(&SeatId::from("A2"));
    let effects = session.send(SeatingAction::CommitBooking);
    assertions::assert_booking_complete(&effects);

    for _ in 0..2 {
        assert_eq!(session.toggle(&a1), Some(SeatStatus::Booked));
        assert_eq!(session.toggle(&SeatId::from("A2")), Some(SeatStatus::Booked));
    }
    assert_eq!(session.commit(), Err(BookingError::EmptySelection));
    assert!(session.selection().is_empty());
    assert!(session.state().is_consistent());
    assert_eq!(notifier.count(), 1);
}

#[test]
fn test_fractional_prices_sum_exactly() {
    let json = r#"{
        "layout": { "rows": 2, "seats_per_row": 4 },
        "tiers": [
            { "key": "front", "name": "Front", "price": 149.5, "rows": [0] },
            { "key": "back", "name": "Back", "price": 99.99, "rows": [1] }
        ]
    }"#;
    let config = VenueConfig::from_json_str(json).unwrap();
    let (env, notifier) = test_environment();
    let mut session = BookingSession::new(config, &[], env).unwrap();

    for id in ["A1", "A2", "B1"] {
        session.toggle(&SeatId::from(id));
    }
    assert_eq!(session.summary().action_label("₹"), "Book 3 Seat(s) • ₹398.99");

    let result = session.commit().unwrap();
    assert_eq!(result.total_price, Money::from_minor(39_899));
    assert_eq!(notifier.results(), vec![result]);
}

#[test]
fn test_row_layout_splits_after_fifth_seat() {
    let (session, _) = cinema_session(&[]);
    let segments = session.row_layout(3).unwrap();

    match segments.as_slice() {
        [RowSegment::Seats(left), RowSegment::Gap, RowSegment::Seats(right)] => {
            assert_eq!(left.len(), 5);
            assert_eq!(right.len(), 7);
            assert_eq!(left[0].id, SeatId::from("D1"));
            assert_eq!(right[0].id, SeatId::from("D6"));
        }
        other => panic!("unexpected segments: {other:?}"),
    }
}

// ============================================================================
// Reducer-level tests
// ============================================================================

#[test]
fn test_toggle_available_seat() {
    let (reducer, state) = cinema_reducer(&[]);
    let (env, _) = test_environment();

    ReducerTest::new(reducer)
        .with_env(env)
        .given_state(state)
        .when_action(toggle("B3"))
        .then_state(|state| {
            assert_eq!(state.selection.ids(), &[SeatId::from("B3")]);
            assert_eq!(
                state.seat_map.seat(&SeatId::from("B3")).unwrap().status,
                SeatStatus::Selected
            );
        })
        .then_effects(assertions::assert_state_change_only)
        .run();
}

#[test]
fn test_toggle_selected_seat_releases_it() {
    let (reducer, state) = cinema_reducer(&[]);
    let (env, _) = test_environment();

    ReducerTest::new(reducer)
        .with_env(env)
        .given_state(state)
        .given_actions([toggle("B3"), toggle("B4")])
        .when_action(toggle("B3"))
        .then_state(|state| {
            assert_eq!(state.selection.ids(), &[SeatId::from("B4")]);
            assert_eq!(
                state.seat_map.seat(&SeatId::from("B3")).unwrap().status,
                SeatStatus::Available
            );
            assert!(state.is_consistent());
        })
        .run();
}

#[test]
fn test_booked_seat_click_is_ignored() {
    let (reducer, state) = cinema_reducer(&["C4"]);
    let (env, _) = test_environment();

    ReducerTest::new(reducer)
        .with_env(env)
        .given_state(state)
        .when_action(toggle("C4"))
        .then_state(|state| {
            assert!(state.selection.is_empty());
            assert_eq!(
                state.seat_map.seat(&SeatId::from("C4")).unwrap().status,
                SeatStatus::Booked
            );
        })
        .then_effects(assertions::assert_empty_effects)
        .run();
}

#[test]
fn test_unknown_seat_click_is_ignored() {
    let (reducer, state) = cinema_reducer(&[]);
    let (env, _) = test_environment();
    let before = state.clone();

    ReducerTest::new(reducer)
        .with_env(env)
        .given_state(state)
        .when_action(toggle("Z99"))
        .then_state(move |state| {
            assert_eq!(state, &before);
        })
        .then_effects(assertions::assert_empty_effects)
        .run();
}

#[test]
fn test_commit_produces_booking_complete() {
    let (reducer, state) = cinema_reducer(&["A1", "C4"]);
    let (env, notifier) = test_environment();

    ReducerTest::new(reducer)
        .with_env(env)
        .given_state(state)
        .given_actions([toggle("A2"), toggle("A3"), toggle("D6")])
        .when_action(SeatingAction::CommitBooking)
        .then_state(|state| {
            assert!(state.selection.is_empty());
            assert_eq!(state.seat_map.count_by_status(SeatStatus::Booked), 5);
            assert_eq!(state.last_error, None);
        })
        .then_effects(|effects| {
            let result = assertions::assert_booking_complete(effects);
            assert_eq!(result.total_price, Money::from_major(550));
            assert_eq!(result.seats.len(), 3);
        })
        .run();

    // The reducer only describes the callback; running it is the session's job.
    assert_eq!(notifier.count(), 0);
}

#[test]
fn test_commit_with_empty_selection_records_error() {
    let (reducer, state) = cinema_reducer(&[]);
    let (env, _) = test_environment();

    ReducerTest::new(reducer)
        .with_env(env)
        .given_state(state)
        .when_action(SeatingAction::CommitBooking)
        .then_state(|state| {
            assert_eq!(state.last_error, Some(BookingError::EmptySelection));
            assert_eq!(state.seat_map.count_by_status(SeatStatus::Available), 96);
        })
        .then_effects(|effects| {
            assert!(
                !effects
                    .iter()
                    .any(|effect| matches!(effect, Effect::BookingComplete(_)))
            );
        })
        .run();
}

#[test]
fn test_successful_toggle_clears_previous_error() {
    let (reducer, state) = cinema_reducer(&[]);
    let (env, _) = test_environment();

    ReducerTest::new(reducer)
        .with_env(env)
        .given_state(state)
        .given_actions([SeatingAction::CommitBooking])
        .when_action(toggle("A5"))
        .then_state(|state| {
            assert_eq!(state.last_error, None);
        })
        .run();
}
