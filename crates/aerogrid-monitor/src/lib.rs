//! Zone-level PM2.5 monitoring for Aerogrid.
//!
//! Maintains the simulated 10x10 grid of readings, refreshes it on demand
//! (the app crate drives the 60-second cadence), derives threshold alerts,
//! and ranks persistent hotspots.

pub mod field;
pub mod service;

pub use service::{refresh_loop, PollutionMonitor};
