// --- File: crates/tutorlink_availability/src/store.rs ---
//! The canonical owner of the recurring weekly pattern and its persistence.

use crate::model::{InvalidTimeSlot, RecurringAvailability, TimeSlot, Weekday};
use crate::storage::{ScheduleStorage, StorageError};
use tracing::{debug, warn};
use tutorlink_common::TutorlinkError;

// --- Error Handling ---
use thiserror::Error;
#[derive(Error, Debug)]
pub enum AvailabilityError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Failed to encode schedule: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("Invalid time slot: {0}")]
    InvalidSlot(#[from] InvalidTimeSlot),
}

impl From<AvailabilityError> for TutorlinkError {
    fn from(err: AvailabilityError) -> Self {
        match err {
            AvailabilityError::Storage(e) => tutorlink_common::storage_error(e),
            AvailabilityError::Encode(e) => tutorlink_common::internal_error(e),
            AvailabilityError::InvalidSlot(e) => tutorlink_common::validation_error(e),
        }
    }
}

/// Parses configured template hours (`"HH:00"` strings) into validated
/// slots, rejecting the whole template on the first malformed entry.
pub fn parse_template_hours(raw: &[String]) -> Result<Vec<TimeSlot>, AvailabilityError> {
    raw.iter()
        .map(|hour| hour.parse::<TimeSlot>().map_err(AvailabilityError::from))
        .collect()
}

/// Holds the canonical [`RecurringAvailability`] persistence surface.
///
/// `load` never fails the caller: persistence corruption is recovered as
/// the canonical empty pattern with a warning, because a broken schedule
/// file must never crash the editing session. `save` failures are returned
/// so the caller can surface a non-blocking "may not survive a reload"
/// warning while keeping the in-memory pattern authoritative.
pub struct AvailabilityStore<S: ScheduleStorage> {
    storage: S,
}

impl<S: ScheduleStorage> AvailabilityStore<S> {
    pub fn new(storage: S) -> Self {
        AvailabilityStore { storage }
    }

    /// Reads the persisted pattern, falling back to the empty pattern on
    /// absence or any malformation (parse error, unknown weekday key,
    /// non-`HH:00` slot).
    pub fn load(&self) -> RecurringAvailability {
        let raw = match self.storage.read() {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No persisted schedule; starting from the empty pattern");
                return RecurringAvailability::empty();
            }
            Err(err) => {
                warn!("Failed to read persisted schedule, falling back to empty: {err}");
                return RecurringAvailability::empty();
            }
        };

        match serde_json::from_str::<RecurringAvailability>(&raw) {
            Ok(mut pattern) => {
                // A hand-edited file may omit empty weekdays.
                pattern.normalize();
                pattern
            }
            Err(err) => {
                warn!("Persisted schedule is malformed, falling back to empty: {err}");
                RecurringAvailability::empty()
            }
        }
    }

    /// Serializes the pattern in canonical form (all seven weekday keys,
    /// sorted de-duplicated slots) and persists it, overwriting any prior
    /// value.
    pub fn save(&self, pattern: &RecurringAvailability) -> Result<(), AvailabilityError> {
        let mut canonical = pattern.clone();
        canonical.normalize();
        let payload = serde_json::to_string(&canonical)?;
        self.storage.write(&payload)?;
        debug!(
            "Persisted schedule with {} slots across {} days",
            canonical.total_slots(),
            canonical.days_with_slots()
        );
        Ok(())
    }

    /// Persists and returns the canonical empty pattern.
    pub fn reset(&self) -> Result<RecurringAvailability, AvailabilityError> {
        let pattern = RecurringAvailability::empty();
        self.save(&pattern)?;
        Ok(pattern)
    }

    /// Bulk-assigns `slots` to each listed day, clears all other days,
    /// and persists the result.
    pub fn apply_template(
        &self,
        slots: &[TimeSlot],
        days: &[Weekday],
    ) -> Result<RecurringAvailability, AvailabilityError> {
        let mut pattern = RecurringAvailability::empty();
        pattern.set_days(slots, days);
        self.save(&pattern)?;
        Ok(pattern)
    }
}
