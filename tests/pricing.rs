//! Quote computation for both booking modes.

use turfconnect_server::pricing::{hourly_quote, parse_clock, quote, slot_quote, PricingInput};

#[test]
fn slot_mode_uses_fixed_price() {
    let q = slot_quote(60, 500.0);
    assert_eq!(q.hours, 1.0);
    assert_eq!(q.base_amount, 500.0);
    assert_eq!(q.premium_charges, 0.0);
    assert_eq!(q.total_amount, 500.0);
}

#[test]
fn slot_mode_fractional_hours() {
    let q = slot_quote(90, 750.0);
    assert_eq!(q.hours, 1.5);
    assert_eq!(q.total_amount, 750.0);
}

#[test]
fn hourly_mode_charges_rate_times_span() {
    let q = hourly_quote(200.0, "10:00", "12:00").expect("valid range");
    assert_eq!(q.hours, 2.0);
    assert_eq!(q.base_amount, 400.0);
    assert_eq!(q.premium_charges, 0.0);
    assert_eq!(q.total_amount, 400.0);
}

#[test]
fn hourly_mode_half_hour_granularity() {
    let q = hourly_quote(200.0, "18:00", "19:30").expect("valid range");
    assert_eq!(q.hours, 1.5);
    assert_eq!(q.total_amount, 300.0);
}

#[test]
fn inverted_range_yields_no_quote() {
    assert!(hourly_quote(200.0, "12:00", "10:00").is_none());
}

#[test]
fn zero_length_range_yields_no_quote() {
    assert!(hourly_quote(200.0, "10:00", "10:00").is_none());
}

#[test]
fn garbage_times_yield_no_quote() {
    assert!(hourly_quote(200.0, "soon", "later").is_none());
    assert!(hourly_quote(200.0, "25:99", "26:00").is_none());
}

#[test]
fn parse_clock_accepts_seconds_suffix() {
    assert_eq!(parse_clock("10:00"), parse_clock("10:00:00"));
    assert!(parse_clock("10am").is_none());
}

#[test]
fn unified_entry_point_dispatches_by_mode() {
    let slot = quote(PricingInput::Slot {
        duration_minutes: 60,
        price: 500.0,
    })
    .expect("slot quotes always exist");
    assert_eq!(slot.total_amount, 500.0);

    assert!(quote(PricingInput::Hourly {
        hourly_rate: 200.0,
        start: "12:00",
        end: "10:00",
    })
    .is_none());
}
