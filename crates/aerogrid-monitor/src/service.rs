//! The pollution monitor service: grid state, refresh cycle, alerts, and
//! hotspot ranking.
//!
//! One instance is shared between the background refresh job and the API
//! handlers via `Arc`. All mutable state sits behind a single `Mutex`;
//! readers receive cloned snapshots, so a refresh never blocks a response
//! for longer than the clone.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use chrono::{Local, Timelike, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};
use uuid::Uuid;

use aerogrid_core::config::MonitorConfig;
use aerogrid_core::error::{AerogridError, Result};
use aerogrid_core::types::{Alert, AlertSeverity, AqiCategory, GridZone};

use crate::field::{self, GRID_SIZE};

struct MonitorState {
    /// Current snapshot, ordered north-to-south then west-to-east to match
    /// the dashboard's visual layout.
    zones: Vec<GridZone>,
    /// Active alerts, newest first, bounded at `max_alerts`.
    alerts: VecDeque<Alert>,
    /// Consecutive refreshes each zone has spent above the alert threshold.
    persistence: HashMap<String, u32>,
    rng: StdRng,
}

/// Zone-level PM2.5 monitor over a fixed 10x10 grid.
pub struct PollutionMonitor {
    config: MonitorConfig,
    state: Mutex<MonitorState>,
}

impl PollutionMonitor {
    /// Create a monitor and run the initial refresh so the grid is populated
    /// before the first request arrives.
    pub fn new(config: MonitorConfig) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let monitor = Self {
            config,
            state: Mutex::new(MonitorState {
                zones: Vec::new(),
                alerts: VecDeque::new(),
                persistence: HashMap::new(),
                rng,
            }),
        };
        monitor
            .update_readings()
            .expect("initial refresh cannot observe a poisoned lock");
        monitor
    }

    /// Refresh every zone using the current local hour for the diurnal
    /// baseline.
    pub fn update_readings(&self) -> Result<()> {
        self.update_at_hour(Local::now().hour())
    }

    /// Refresh every zone with an explicit hour of day.
    pub fn update_at_hour(&self, hour: u32) -> Result<()> {
        let mut state = self
            .state
            .lock()
            .map_err(|e| AerogridError::Monitor(format!("state lock poisoned: {e}")))?;
        let state = &mut *state;

        let baseline = field::diurnal_baseline(hour);

        // Phase 1: raw per-zone estimates with spatial structure.
        let mut raw = [[0.0f64; GRID_SIZE]; GRID_SIZE];
        let mut wind_speeds = [[0.0f64; GRID_SIZE]; GRID_SIZE];
        let mut temperatures = [[0.0f64; GRID_SIZE]; GRID_SIZE];
        let mut traffic_indices = [[0.0f64; GRID_SIZE]; GRID_SIZE];
        let mut weather_influences = [[0.0f64; GRID_SIZE]; GRID_SIZE];

        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                let region = field::region_name(row, col);
                let emission = field::emission_factor(region);
                let modifier = field::hotspot_modifier(row, col, &mut state.rng);

                let wind_speed: f64 = 5.0 + state.rng.random_range(0.0..20.0);
                let wind_reduction = (wind_speed * 0.6).min(15.0f64);

                let mut estimated = baseline + emission + modifier - wind_reduction;
                estimated += (state.rng.random_range(0.0..1.0) - 0.5) * 8.0;

                raw[row][col] = estimated;
                wind_speeds[row][col] = wind_speed;
                temperatures[row][col] = 25.0 + state.rng.random_range(0.0..15.0);
                traffic_indices[row][col] = if modifier > 15.0 {
                    60.0 + state.rng.random_range(0.0..30.0)
                } else if modifier > 5.0 {
                    40.0 + state.rng.random_range(0.0..30.0)
                } else {
                    15.0 + state.rng.random_range(0.0..30.0)
                };
                weather_influences[row][col] = wind_reduction;
            }
        }

        // Phase 2: spatial smoothing with the safety clamp.
        let smoothed = field::smooth(&raw, self.config.pm_floor, self.config.pm_ceiling);

        // Previous readings for the gradual-change rule.
        let previous: HashMap<String, f64> = state
            .zones
            .iter()
            .map(|z| (z.id.clone(), z.pm25_value))
            .collect();

        // Phase 3: assemble zones north-to-south, derive categories,
        // persistence counters, and alerts.
        let mut updated = Vec::with_capacity(GRID_SIZE * GRID_SIZE);
        let mut alerts_raised = 0usize;
        for row in (0..GRID_SIZE).rev() {
            for col in 0..GRID_SIZE {
                let id = format!("G-{row}-{col}");
                let region = field::region_name(row, col);
                let name = format!("{region} Grid {}", row * GRID_SIZE + col);

                let mut pm = smoothed[row][col];

                // A zone may move at most max_delta_per_refresh per cycle.
                if let Some(&prev) = previous.get(&id) {
                    if prev > 0.1 {
                        let delta = pm - prev;
                        if delta.abs() > self.config.max_delta_per_refresh {
                            pm = prev + delta.signum() * self.config.max_delta_per_refresh;
                        }
                    }
                }

                let pm = field::round2(pm.clamp(self.config.pm_floor, self.config.pm_ceiling));
                let category = AqiCategory::classify(pm);

                let counter = state.persistence.entry(id.clone()).or_insert(0);
                if pm > self.config.alert_threshold {
                    *counter += 1;
                } else {
                    *counter = 0;
                }

                if pm > self.config.alert_threshold {
                    state.alerts.push_front(Alert {
                        id: Uuid::new_v4(),
                        grid_id: id.clone(),
                        grid_name: name.clone(),
                        pm25_value: pm,
                        timestamp: Utc::now(),
                        severity: AlertSeverity::HighPollution,
                    });
                    alerts_raised += 1;
                }

                updated.push(GridZone {
                    id,
                    name,
                    latitude: field::ORIGIN_LAT + row as f64 * field::CELL_STEP,
                    longitude: field::ORIGIN_LON + col as f64 * field::CELL_STEP,
                    pm25_value: pm,
                    category,
                    traffic_index: field::round1(traffic_indices[row][col]),
                    weather_influence: field::round1(weather_influences[row][col]),
                    wind_speed: field::round1(wind_speeds[row][col]),
                    temperature: field::round1(temperatures[row][col]),
                });
            }
        }

        state.alerts.truncate(self.config.max_alerts);
        state.zones = updated;

        debug!(hour, alerts_raised, "Grid readings updated");
        Ok(())
    }

    /// Snapshot of all zone readings.
    pub fn zones(&self) -> Result<Vec<GridZone>> {
        let state = self.lock_state()?;
        Ok(state.zones.clone())
    }

    /// Persistent hotspots: zones ranked by consecutive above-threshold
    /// refreshes, PM2.5 breaking ties, limited to `hotspot_limit`.
    pub fn hotspots(&self) -> Result<Vec<GridZone>> {
        let state = self.lock_state()?;
        let mut ranked = state.zones.clone();
        ranked.sort_by(|a, b| {
            let pa = state.persistence.get(&a.id).copied().unwrap_or(0);
            let pb = state.persistence.get(&b.id).copied().unwrap_or(0);
            pb.cmp(&pa).then(
                b.pm25_value
                    .partial_cmp(&a.pm25_value)
                    .unwrap_or(std::cmp::Ordering::Equal),
            )
        });
        ranked.truncate(self.config.hotspot_limit);
        Ok(ranked)
    }

    /// Active alerts, newest first.
    pub fn alerts(&self) -> Result<Vec<Alert>> {
        let state = self.lock_state()?;
        Ok(state.alerts.iter().cloned().collect())
    }

    /// Consecutive above-threshold refreshes for one zone (0 if unknown).
    pub fn persistence(&self, zone_id: &str) -> Result<u32> {
        let state = self.lock_state()?;
        Ok(state.persistence.get(zone_id).copied().unwrap_or(0))
    }

    fn lock_state(&self) -> Result<std::sync::MutexGuard<'_, MonitorState>> {
        self.state
            .lock()
            .map_err(|e| AerogridError::Monitor(format!("state lock poisoned: {e}")))
    }
}

/// Run the periodic refresh loop until the process exits.
///
/// Logs each cycle the way an operator expects to see it: one line going in,
/// one line coming out.
pub async fn refresh_loop(monitor: std::sync::Arc<PollutionMonitor>, interval_secs: u64) {
    info!(interval_secs, "Data refresh job started");
    let mut interval = tokio::time::interval(tokio::time::Duration::from_secs(interval_secs));
    // The first tick fires immediately; the monitor already refreshed at
    // construction, so skip it.
    interval.tick().await;
    loop {
        interval.tick().await;
        info!("Executing scheduled PM2.5 data refresh");
        match monitor.update_readings() {
            Ok(()) => info!("Data refresh complete"),
            Err(e) => tracing::error!(error = %e, "Data refresh failed"),
        }
    }
}
