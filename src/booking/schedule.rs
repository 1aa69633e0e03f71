//! Grouping of a doctor's slots by date.

use chrono::{NaiveDate, NaiveTime};

use crate::models::TimeSlot;

pub(crate) fn parse_date(raw: &str) -> Option<NaiveDate> {
    raw.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

pub(crate) fn parse_time(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .or_else(|_| NaiveTime::parse_from_str(raw, "%I:%M %p"))
        .ok()
}

/// Sort key: parseable dates first in calendar order, then the rest by
/// text. The raw text breaks ties so the order is total.
fn date_key(raw: &str) -> (bool, Option<NaiveDate>, &str) {
    let date = parse_date(raw);
    (date.is_none(), date, raw)
}

fn time_key(raw: &str) -> (bool, Option<NaiveTime>, &str) {
    let time = parse_time(raw);
    (time.is_none(), time, raw)
}

/// Distinct slot dates, earliest first.
pub fn available_dates(slots: &[TimeSlot]) -> Vec<String> {
    let mut dates: Vec<String> = Vec::new();
    for slot in slots {
        if !dates.contains(&slot.date) {
            dates.push(slot.date.clone());
        }
    }
    dates.sort_by(|a, b| date_key(a).cmp(&date_key(b)));
    dates
}

/// Slots falling on `date`, ordered by start time.
pub fn slots_on<'a>(slots: &'a [TimeSlot], date: &str) -> Vec<&'a TimeSlot> {
    let mut matching: Vec<&TimeSlot> = slots.iter().filter(|s| s.date == date).collect();
    matching.sort_by(|a, b| time_key(&a.start_time).cmp(&time_key(&b.start_time)));
    matching
}

/// Index of the first slot that can still be booked.
pub fn first_free_index(slots: &[&TimeSlot]) -> Option<usize> {
    slots.iter().position(|s| !s.is_booked)
}
