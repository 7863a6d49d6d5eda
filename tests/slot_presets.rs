//! Preset fan-out: one insert per (day × preset row).

use chrono::NaiveTime;
use turfconnect_server::db::slot_repo::{expand_preset, PresetSlot};

fn hourly_preset(from_hour: u32, count: u32, price: f64) -> Vec<PresetSlot> {
    (0..count)
        .map(|i| PresetSlot {
            start_time: NaiveTime::from_hms_opt(from_hour + i, 0, 0).expect("valid hour"),
            duration_minutes: 60,
            price,
        })
        .collect()
}

#[test]
fn two_days_times_six_slots_is_twelve_inserts() {
    let preset = hourly_preset(16, 6, 400.0);
    let rows = expand_preset(&[5, 6], &preset);
    assert_eq!(rows.len(), 12);
}

#[test]
fn each_day_gets_every_preset_row() {
    let preset = hourly_preset(10, 3, 250.0);
    let rows = expand_preset(&[1, 3], &preset);

    for day in [1i16, 3] {
        let of_day: Vec<_> = rows.iter().filter(|s| s.day_of_week == day).collect();
        assert_eq!(of_day.len(), 3);
        assert!(of_day
            .iter()
            .any(|s| s.start_time == NaiveTime::from_hms_opt(10, 0, 0).unwrap()));
        assert!(of_day.iter().all(|s| s.price == 250.0));
    }
}

#[test]
fn empty_inputs_expand_to_nothing() {
    let preset = hourly_preset(10, 3, 250.0);
    assert!(expand_preset(&[], &preset).is_empty());
    assert!(expand_preset(&[2], &[]).is_empty());
}
