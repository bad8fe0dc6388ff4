// --- File: crates/tutorlink_availability/src/lib.rs ---
// Declare modules within this crate
pub mod model;
pub mod projector;
#[cfg(test)]
mod projector_proptest;
pub mod storage;
pub mod store;

// Re-export the types a host dashboard needs to drive the scheduler
pub use model::{RecurringAvailability, TimeSlot, Weekday};
pub use projector::{AvailabilityProjector, CalendarEvent, EditOutcome, ScheduleStats};
pub use storage::{InMemoryStorage, JsonFileStorage, ScheduleStorage};
pub use store::{AvailabilityError, AvailabilityStore};
