pub mod components;
pub mod config;
pub mod error;
pub mod schedule;
pub mod startup;
