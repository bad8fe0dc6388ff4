// --- File: crates/tutorlink_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- Top-level application config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    /// Minimum log level for the tracing subscriber ("trace".."error").
    #[serde(default)]
    pub log_level: Option<String>,
    pub availability: AvailabilityConfig,
}

// --- Availability scheduler config ---
// Holds the durable-store location and the hours used by the
// "standard business week" quick action.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AvailabilityConfig {
    /// Path of the JSON file holding the tutor's weekly pattern.
    pub schedule_path: String,
    /// Hours assigned to Monday-Friday by the weekday template action,
    /// in "HH:00" form.
    #[serde(default = "default_template_hours")]
    pub default_template_hours: Vec<String>,
}

fn default_template_hours() -> Vec<String> {
    ["09:00", "10:00", "11:00", "14:00", "15:00", "16:00"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for AvailabilityConfig {
    fn default() -> Self {
        AvailabilityConfig {
            schedule_path: "data/tutor_availability.json".to_string(),
            default_template_hours: default_template_hours(),
        }
    }
}
