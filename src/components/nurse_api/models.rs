use crate::schedule::ScheduleRecord;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Logged-in nurse as reported by `GET /status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusInfo {
    pub nurse_id: String,
    pub nurse_name: String,
    #[serde(default)]
    pub is_admin: bool,
    /// Attendance state for today, e.g. "checked_in"
    #[serde(default)]
    pub status: String,
}

/// Body of `POST /chat`
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Reply of `POST /chat`
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub success: bool,
    pub response: String,
}

/// Reply of `GET /schedule/full`
#[derive(Debug, Clone, Deserialize)]
pub struct FullScheduleResponse {
    #[serde(default)]
    pub schedule: Vec<Map<String, Value>>,
    #[serde(default)]
    pub total_nurses: Option<usize>,
}

/// Error body the backend sends with non-2xx responses
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}

/// Message that asks the backend for the caller's own schedule
pub const MY_SCHEDULE_MESSAGE: &str = "my schedule";

/// Marker the backend uses when no schedule has been generated yet
pub const NO_SCHEDULE_MARKER: &str = "No schedule found";

/// Result of asking for the caller's own schedule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MyScheduleOutcome {
    /// No schedule has been generated yet; holds the backend's message
    Pending(String),
    Ready(ScheduleRecord),
}
