//! Booking price computation.
//!
//! Two modes: a predefined slot carries its own duration and fixed price; a
//! free-form request prices by the hour from the turf's rate. Premium
//! percentage columns exist on `turfs` but are not folded into the hourly
//! total yet (pending a confirmed formula), so `premium_charges` is always
//! zero for now.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Computed price breakdown for a booking request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub hours: f64,
    pub base_amount: f64,
    pub premium_charges: f64,
    pub total_amount: f64,
}

/// What the customer picked on the booking form.
#[derive(Debug, Clone)]
pub enum PricingInput<'a> {
    /// A predefined slot with a fixed duration and price.
    Slot { duration_minutes: i32, price: f64 },
    /// Free-form same-day start/end times, priced by the hour.
    Hourly {
        hourly_rate: f64,
        start: &'a str,
        end: &'a str,
    },
}

/// Accepts `HH:MM` or `HH:MM:SS`.
pub fn parse_clock(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .ok()
}

/// Fixed-slot pricing: the slot's price is the whole bill.
pub fn slot_quote(duration_minutes: i32, price: f64) -> Quote {
    let hours = f64::from(duration_minutes) / 60.0;
    Quote {
        hours,
        base_amount: price,
        premium_charges: 0.0,
        total_amount: price,
    }
}

/// Hourly pricing over a same-day `[start, end)` range. Returns `None` when
/// either time fails to parse or the range is empty/inverted; callers must
/// refuse to book without a quote.
pub fn hourly_quote(hourly_rate: f64, start: &str, end: &str) -> Option<Quote> {
    let start = parse_clock(start)?;
    let end = parse_clock(end)?;
    if end <= start {
        return None;
    }

    let hours = (end - start).num_minutes() as f64 / 60.0;
    let base_amount = hours * hourly_rate;
    let premium_charges = 0.0;
    Some(Quote {
        hours,
        base_amount,
        premium_charges,
        total_amount: base_amount + premium_charges,
    })
}

/// Single entry point used by the booking handler.
pub fn quote(input: PricingInput<'_>) -> Option<Quote> {
    match input {
        PricingInput::Slot {
            duration_minutes,
            price,
        } => Some(slot_quote(duration_minutes, price)),
        PricingInput::Hourly {
            hourly_rate,
            start,
            end,
        } => hourly_quote(hourly_rate, start, end),
    }
}
