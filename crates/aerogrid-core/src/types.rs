use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// Enums
// =============================================================================

/// Air-quality category derived from a PM2.5 concentration.
///
/// Band edges are inclusive on the upper bound: 30, 60, and 90 µg/m³.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AqiCategory {
    /// 0–30 µg/m³.
    Good,
    /// 31–60 µg/m³.
    Moderate,
    /// 61–90 µg/m³.
    Poor,
    /// Above 90 µg/m³.
    #[serde(rename = "Very Poor")]
    VeryPoor,
}

impl AqiCategory {
    /// Classify a PM2.5 concentration into its category.
    pub fn classify(pm25: f64) -> Self {
        if pm25 <= 30.0 {
            AqiCategory::Good
        } else if pm25 <= 60.0 {
            AqiCategory::Moderate
        } else if pm25 <= 90.0 {
            AqiCategory::Poor
        } else {
            AqiCategory::VeryPoor
        }
    }

    /// Display label as shown on the dashboard.
    pub fn label(&self) -> &'static str {
        match self {
            AqiCategory::Good => "Good",
            AqiCategory::Moderate => "Moderate",
            AqiCategory::Poor => "Poor",
            AqiCategory::VeryPoor => "Very Poor",
        }
    }

    /// Health advisory text for this category.
    pub fn health_advisory(&self) -> &'static str {
        match self {
            AqiCategory::Good => "Air quality is generally safe (Good)",
            AqiCategory::Moderate => {
                "Prolonged exposure may affect sensitive groups (Moderate)"
            }
            AqiCategory::Poor => "High risk for children and elderly (Poor)",
            AqiCategory::VeryPoor => "Danger: Hazardous air quality for all (Very Poor)",
        }
    }
}

impl std::fmt::Display for AqiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Severity level attached to an alert event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertSeverity {
    /// Zone exceeded the configured PM2.5 alert threshold.
    HighPollution,
}

impl AlertSeverity {
    /// Wire/report label, matching the serialized form.
    pub fn label(&self) -> &'static str {
        match self {
            AlertSeverity::HighPollution => "HIGH_POLLUTION",
        }
    }
}

// =============================================================================
// Records
// =============================================================================

/// Snapshot of one grid zone's current readings.
///
/// Field names serialize in camelCase — the wire contract consumed by the
/// dashboard's polling layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridZone {
    /// Zone identifier in `G-<row>-<col>` form.
    pub id: String,
    /// Human-readable zone name.
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// PM2.5 concentration in µg/m³, rounded to 2 decimals.
    pub pm25_value: f64,
    pub category: AqiCategory,
    /// Traffic density index, 0–100.
    pub traffic_index: f64,
    /// PM2.5 reduction attributed to wind dispersion.
    pub weather_influence: f64,
    /// Wind speed in km/h.
    pub wind_speed: f64,
    /// Temperature in °C.
    pub temperature: f64,
}

/// An alert raised when a zone crosses the PM2.5 alert threshold.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: Uuid,
    pub grid_id: String,
    pub grid_name: String,
    pub pm25_value: f64,
    pub timestamp: DateTime<Utc>,
    pub severity: AlertSeverity,
}
