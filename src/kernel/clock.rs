use chrono::{Local, NaiveDateTime, Timelike};

/// Source of the current local time.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// 12-hour clock, e.g. "05:05 PM".
pub fn format_time(at: NaiveDateTime) -> String {
    at.format("%I:%M %p").to_string()
}

/// e.g. "Monday, October 20, 2025".
pub fn format_date(at: NaiveDateTime) -> String {
    at.format("%A, %B %d, %Y").to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPart {
    Morning,
    Afternoon,
    Evening,
}

pub fn day_part(at: NaiveDateTime) -> DayPart {
    match at.hour() {
        0..=11 => DayPart::Morning,
        12..=17 => DayPart::Afternoon,
        _ => DayPart::Evening,
    }
}
