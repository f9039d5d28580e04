// Export components
pub mod nurse_api;

// Re-export the nurse API handle
pub use nurse_api::NurseApiHandle;
