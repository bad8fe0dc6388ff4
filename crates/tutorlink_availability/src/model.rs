// --- File: crates/tutorlink_availability/src/model.rs ---
//! The recurring weekly availability pattern and its building blocks.
//!
//! Days and hours are closed, validated types rather than loose strings:
//! an invalid weekday or slot is rejected at construction, so the rest of
//! the crate never has to second-guess its keys.

use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One of the seven fixed days of the week, used as the recurrence key.
///
/// Ordered Monday..Sunday so maps keyed by `Weekday` iterate in calendar
/// order, and serialized in lowercase to match the persisted layout
/// (`"monday"`..`"sunday"`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All seven days, Monday first.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// The Monday-Friday business days targeted by the weekday template.
    pub const BUSINESS_DAYS: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    /// The day of the week of a concrete calendar date.
    pub fn from_date(date: NaiveDate) -> Self {
        date.weekday().into()
    }

    /// Days since Monday (0 for Monday, 6 for Sunday).
    pub fn num_from_monday(self) -> u32 {
        chrono::Weekday::from(self).num_days_from_monday()
    }

    fn as_str(self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }
}

impl From<Weekday> for chrono::Weekday {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Monday => chrono::Weekday::Mon,
            Weekday::Tuesday => chrono::Weekday::Tue,
            Weekday::Wednesday => chrono::Weekday::Wed,
            Weekday::Thursday => chrono::Weekday::Thu,
            Weekday::Friday => chrono::Weekday::Fri,
            Weekday::Saturday => chrono::Weekday::Sat,
            Weekday::Sunday => chrono::Weekday::Sun,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a weekday name is not one of the fixed seven.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown weekday '{0}'")]
pub struct UnknownWeekday(pub String);

impl FromStr for Weekday {
    type Err = UnknownWeekday;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Weekday::ALL
            .into_iter()
            .find(|day| day.as_str() == s)
            .ok_or_else(|| UnknownWeekday(s.to_string()))
    }
}

/// Error returned when a slot string is not a valid `"HH:00"` hour.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid time slot '{0}': expected \"HH:00\" with hour 00-23")]
pub struct InvalidTimeSlot(pub String);

/// An hour-granularity point in a day, the start of a one-hour
/// availability window. Wire form is `"HH:00"` (`"09:00"`, `"14:00"`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct TimeSlot(u8);

impl TimeSlot {
    /// Builds a slot from an hour of day, rejecting anything past 23.
    pub fn from_hour(hour: u8) -> Result<Self, InvalidTimeSlot> {
        if hour > 23 {
            return Err(InvalidTimeSlot(format!("{hour:02}:00")));
        }
        Ok(TimeSlot(hour))
    }

    pub fn hour(self) -> u8 {
        self.0
    }

    /// The start of the one-hour window as a time of day.
    pub fn start_time(self) -> NaiveTime {
        // Hour is validated at construction, so this cannot be out of range.
        NaiveTime::from_hms_opt(u32::from(self.0), 0, 0).unwrap_or(NaiveTime::MIN)
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:00", self.0)
    }
}

impl FromStr for TimeSlot {
    type Err = InvalidTimeSlot;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (hour_part, minute_part) = s
            .split_once(':')
            .ok_or_else(|| InvalidTimeSlot(s.to_string()))?;
        if hour_part.len() != 2 || minute_part != "00" {
            return Err(InvalidTimeSlot(s.to_string()));
        }
        let hour: u8 = hour_part
            .parse()
            .map_err(|_| InvalidTimeSlot(s.to_string()))?;
        TimeSlot::from_hour(hour).map_err(|_| InvalidTimeSlot(s.to_string()))
    }
}

impl TryFrom<String> for TimeSlot {
    type Error = InvalidTimeSlot;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeSlot> for String {
    fn from(slot: TimeSlot) -> Self {
        slot.to_string()
    }
}

/// The canonical weekly pattern of available slots, independent of any
/// specific calendar date.
///
/// Invariants:
/// - all seven weekdays are present as keys, even when empty;
/// - each day's slots are de-duplicated and read in ascending order
///   (both fall out of the `BTreeSet` representation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecurringAvailability {
    days: BTreeMap<Weekday, BTreeSet<TimeSlot>>,
}

impl RecurringAvailability {
    /// The canonical empty pattern: all seven weekdays, no slots.
    pub fn empty() -> Self {
        let mut days = BTreeMap::new();
        for day in Weekday::ALL {
            days.insert(day, BTreeSet::new());
        }
        RecurringAvailability { days }
    }

    /// Restores the all-seven-keys invariant after deserialization, which
    /// may have produced a pattern with missing weekdays.
    pub fn normalize(&mut self) {
        for day in Weekday::ALL {
            self.days.entry(day).or_default();
        }
    }

    /// The slots for a day, in ascending chronological order.
    pub fn slots(&self, day: Weekday) -> impl Iterator<Item = TimeSlot> + '_ {
        self.days.get(&day).into_iter().flatten().copied()
    }

    pub fn contains(&self, day: Weekday, slot: TimeSlot) -> bool {
        self.days.get(&day).is_some_and(|slots| slots.contains(&slot))
    }

    /// Adds a slot; returns false if it was already present.
    pub fn add(&mut self, day: Weekday, slot: TimeSlot) -> bool {
        self.days.entry(day).or_default().insert(slot)
    }

    /// Removes a slot; returns false if it was not present.
    pub fn remove(&mut self, day: Weekday, slot: TimeSlot) -> bool {
        self.days.entry(day).or_default().remove(&slot)
    }

    /// Flips a slot's presence and reports whether it is present afterwards.
    ///
    /// Selecting an already-available cell clears it; the same gesture both
    /// creates and clears availability (observed product behavior).
    pub fn toggle(&mut self, day: Weekday, slot: TimeSlot) -> bool {
        let slots = self.days.entry(day).or_default();
        if slots.contains(&slot) {
            slots.remove(&slot);
            false
        } else {
            slots.insert(slot);
            true
        }
    }

    /// Bulk-assigns `slots` to each day in `days`, clearing every day that
    /// is not listed.
    pub fn set_days(&mut self, slots: &[TimeSlot], days: &[Weekday]) {
        let assigned: BTreeSet<TimeSlot> = slots.iter().copied().collect();
        for day in Weekday::ALL {
            let day_slots = self.days.entry(day).or_default();
            if days.contains(&day) {
                *day_slots = assigned.clone();
            } else {
                day_slots.clear();
            }
        }
    }

    /// Empties every weekday.
    pub fn clear(&mut self) {
        for slots in self.days.values_mut() {
            slots.clear();
        }
    }

    pub fn is_empty(&self) -> bool {
        self.days.values().all(|slots| slots.is_empty())
    }

    // --- Derived statistics (pure, no side effects) ---

    /// Total slot count across all weekdays.
    pub fn total_slots(&self) -> usize {
        self.days.values().map(|slots| slots.len()).sum()
    }

    /// Number of weekdays with at least one slot.
    pub fn days_with_slots(&self) -> usize {
        self.days.values().filter(|slots| !slots.is_empty()).count()
    }

    /// Hours of availability per week. Each slot is one hour, so this
    /// equals the total slot count.
    pub fn hours_per_week(&self) -> usize {
        self.total_slots()
    }
}

impl Default for RecurringAvailability {
    fn default() -> Self {
        RecurringAvailability::empty()
    }
}
