//! Application state shared across all route handlers.
//!
//! AppState holds references to the monitor and the assist engine. It is
//! passed to handlers via axum's State extractor.

use std::sync::Arc;
use std::time::Instant;

use aerogrid_core::config::AerogridConfig;
use aerogrid_assist::AssistEngine;
use aerogrid_monitor::PollutionMonitor;

/// Shared application state.
///
/// All fields use `Arc` for cheap cloning across handler tasks. The monitor
/// carries its own interior lock; the engine and config are read-only after
/// startup.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AerogridConfig>,
    /// Grid monitor shared with the refresh job.
    pub monitor: Arc<PollutionMonitor>,
    /// Query resolution engine.
    pub assist: Arc<AssistEngine>,
    /// Server start time for uptime calculation.
    pub start_time: Instant,
}

impl AppState {
    /// Create a new AppState with the given components.
    pub fn new(
        config: AerogridConfig,
        monitor: Arc<PollutionMonitor>,
        assist: Arc<AssistEngine>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            monitor,
            assist,
            start_time: Instant::now(),
        }
    }
}
