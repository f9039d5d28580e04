mod actor;
mod client;
mod handle;
pub mod models;

pub use client::ApiClient;
pub use handle::NurseApiHandle;
pub use models::{MyScheduleOutcome, StatusInfo};
