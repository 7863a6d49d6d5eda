//! Guards applied before any slot is priced, mutated or deleted.

use chrono::{NaiveDate, NaiveTime};
use turfconnect_server::db::models::TurfSlot;
use uuid::Uuid;

fn slot_on(turf_id: Uuid, day_of_week: i16) -> TurfSlot {
    TurfSlot {
        id: Uuid::new_v4(),
        turf_id,
        day_of_week,
        start_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
        duration_minutes: 60,
        price: 400.0,
        is_available: true,
    }
}

#[test]
fn slot_from_another_turf_is_not_accepted() {
    // A caller may own the turf in the path yet pass a slot id that hangs
    // off someone else's turf; the pairing check must catch that.
    let my_turf = Uuid::new_v4();
    let foreign_slot = slot_on(Uuid::new_v4(), 1);
    assert!(!foreign_slot.belongs_to(my_turf));
}

#[test]
fn slot_on_its_own_turf_passes() {
    let turf = Uuid::new_v4();
    assert!(slot_on(turf, 1).belongs_to(turf));
}

#[test]
fn booking_date_must_fall_on_the_slots_weekday() {
    // 2026-08-24 is a Monday, 2026-08-28 a Friday, 2026-08-23 a Sunday.
    let monday = NaiveDate::from_ymd_opt(2026, 8, 24).unwrap();
    let friday = NaiveDate::from_ymd_opt(2026, 8, 28).unwrap();
    let sunday = NaiveDate::from_ymd_opt(2026, 8, 23).unwrap();

    let monday_slot = slot_on(Uuid::new_v4(), 1);
    assert!(monday_slot.occurs_on(monday));
    assert!(!monday_slot.occurs_on(friday));

    // Day 0 is Sunday in the slot encoding.
    let sunday_slot = slot_on(Uuid::new_v4(), 0);
    assert!(sunday_slot.occurs_on(sunday));
    assert!(!sunday_slot.occurs_on(monday));
}
