// --- File: crates/tutorlink_availability/src/projector.rs ---
//! Two-way mapping between the recurring weekly pattern and dated
//! calendar events.
//!
//! Forward projection turns the date-independent pattern into concrete
//! events on the next occurrence of each weekday. Interaction mapping
//! turns calendar-widget gestures (range select, event click) back into
//! mutations on the pattern. The projector is a pure adapter: whatever
//! event/callback shape a concrete calendar widget uses is translated to
//! and from these types by a thin layer outside this crate.

use crate::model::{RecurringAvailability, TimeSlot, Weekday};
use crate::storage::ScheduleStorage;
use crate::store::AvailabilityStore;
use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};
use serde::Serialize;
use tracing::{debug, warn};

/// A concrete, dated occurrence derived from the recurring pattern.
///
/// Events are ephemeral: regenerated from the pattern on every render and
/// never themselves the source of truth. The id is the deterministic
/// `"{weekday}-{HH:00}"` correlation key used to resolve widget clicks
/// back to a pattern entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarEvent {
    pub id: String,
    pub weekday: Weekday,
    pub slot: TimeSlot,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl CalendarEvent {
    /// The correlation id shared between a pattern entry and its rendered
    /// event.
    pub fn event_id(weekday: Weekday, slot: TimeSlot) -> String {
        format!("{weekday}-{slot}")
    }
}

/// Derived pattern statistics for the dashboard summary row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScheduleStats {
    pub total_slots: usize,
    pub days_with_slots: usize,
    pub hours_per_week: usize,
}

/// The result of one interaction: everything the caller needs to
/// re-render, plus whether the change survived persistence.
///
/// `persisted == false` means the write failed; the in-memory pattern is
/// still authoritative for the session, but the change may not survive a
/// reload and the UI should show a non-blocking warning. No-op
/// interactions report `persisted == true` since no write was attempted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditOutcome {
    pub events: Vec<CalendarEvent>,
    pub stats: ScheduleStats,
    pub persisted: bool,
}

/// The next calendar date on/after `today` falling on `weekday`.
/// If `today` itself matches it is used, not skipped to next week.
pub fn next_occurrence(today: NaiveDate, weekday: Weekday) -> NaiveDate {
    let delta = (weekday.num_from_monday() + 7 - Weekday::from_date(today).num_from_monday()) % 7;
    today + Duration::days(i64::from(delta))
}

/// Derives dated calendar events from the recurring pattern and maps
/// calendar interactions back into pattern mutations.
///
/// Every mutating path runs to completion synchronously:
/// mutate in-memory pattern, persist through the store, re-project.
pub struct AvailabilityProjector<S: ScheduleStorage> {
    store: AvailabilityStore<S>,
    pattern: RecurringAvailability,
}

impl<S: ScheduleStorage> AvailabilityProjector<S> {
    /// Opens an editing session on whatever the store has persisted.
    pub fn new(store: AvailabilityStore<S>) -> Self {
        let pattern = store.load();
        AvailabilityProjector { store, pattern }
    }

    /// The current in-memory pattern.
    pub fn pattern(&self) -> &RecurringAvailability {
        &self.pattern
    }

    /// Forward projection: one event per (weekday, slot) pair, dated on
    /// the next occurrence of the weekday on/after `today`, one hour long.
    ///
    /// Events within a day are in ascending slot order; cross-day ordering
    /// follows Monday..Sunday (the calendar widget re-sorts by date).
    pub fn project(&self, today: NaiveDate) -> Vec<CalendarEvent> {
        let mut events = Vec::with_capacity(self.pattern.total_slots());
        for weekday in Weekday::ALL {
            let date = next_occurrence(today, weekday);
            for slot in self.pattern.slots(weekday) {
                let start = date.and_time(slot.start_time());
                events.push(CalendarEvent {
                    id: CalendarEvent::event_id(weekday, slot),
                    weekday,
                    slot,
                    start,
                    end: start + Duration::hours(1),
                });
            }
        }
        events
    }

    /// Range-select interaction: toggles the (weekday, slot) cell the
    /// selection starts in. Selecting an already-available cell clears it.
    pub fn select_range(&mut self, start: NaiveDateTime, today: NaiveDate) -> EditOutcome {
        let weekday = Weekday::from_date(start.date());
        let slot = match TimeSlot::from_hour(start.hour() as u8) {
            Ok(slot) => slot,
            Err(err) => {
                // Structurally impossible from a real datetime; treat as a
                // widget-integration bug and leave the pattern untouched.
                warn!("Ignoring selection with unresolvable hour: {err}");
                return self.no_op_outcome(today);
            }
        };
        let now_present = self.pattern.toggle(weekday, slot);
        debug!(
            "Selection toggled {weekday} {slot} {}",
            if now_present { "on" } else { "off" }
        );
        self.persist_and_project(today)
    }

    /// Event-click interaction: removes the clicked availability block.
    /// A click can only clear a slot (there is nothing to toggle back to).
    /// An id that resolves to no known slot is a no-op with no write.
    pub fn click_event(&mut self, event_id: &str, today: NaiveDate) -> EditOutcome {
        let Some((day_part, slot_part)) = event_id.split_once('-') else {
            debug!("Ignoring click on unrecognized event id '{event_id}'");
            return self.no_op_outcome(today);
        };
        let (Ok(weekday), Ok(slot)) = (
            day_part.parse::<Weekday>(),
            slot_part.parse::<TimeSlot>(),
        ) else {
            debug!("Ignoring click on unrecognized event id '{event_id}'");
            return self.no_op_outcome(today);
        };
        self.remove_event(weekday, slot, today)
    }

    /// Removes one (weekday, slot) pair, leaving every other entry
    /// untouched. No-op (and no write) if the pair is absent.
    pub fn remove_event(&mut self, weekday: Weekday, slot: TimeSlot, today: NaiveDate) -> EditOutcome {
        if !self.pattern.remove(weekday, slot) {
            debug!("Click on {weekday} {slot} resolved to no known slot; ignoring");
            return self.no_op_outcome(today);
        }
        self.persist_and_project(today)
    }

    /// "Standard business week" quick action: Monday-Friday get `slots`,
    /// Saturday/Sunday are cleared, regardless of prior state.
    pub fn apply_weekday_template(&mut self, slots: &[TimeSlot], today: NaiveDate) -> EditOutcome {
        self.pattern.set_days(slots, &Weekday::BUSINESS_DAYS);
        self.persist_and_project(today)
    }

    /// Empties every weekday.
    pub fn clear_all(&mut self, today: NaiveDate) -> EditOutcome {
        self.pattern.clear();
        self.persist_and_project(today)
    }

    pub fn stats(&self) -> ScheduleStats {
        ScheduleStats {
            total_slots: self.pattern.total_slots(),
            days_with_slots: self.pattern.days_with_slots(),
            hours_per_week: self.pattern.hours_per_week(),
        }
    }

    fn persist_and_project(&self, today: NaiveDate) -> EditOutcome {
        let persisted = match self.store.save(&self.pattern) {
            Ok(()) => true,
            Err(err) => {
                // In-memory pattern stays authoritative for the session.
                warn!("Schedule change not persisted: {err}");
                false
            }
        };
        EditOutcome {
            events: self.project(today),
            stats: self.stats(),
            persisted,
        }
    }

    fn no_op_outcome(&self, today: NaiveDate) -> EditOutcome {
        EditOutcome {
            events: self.project(today),
            stats: self.stats(),
            persisted: true,
        }
    }
}
