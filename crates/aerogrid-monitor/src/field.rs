//! Pollution field model: the pure math behind each refresh cycle.
//!
//! Zone estimates combine a city-wide diurnal baseline, a per-region
//! emission factor, spatial hotspot modifiers calibrated against observed
//! Hyderabad pollution patterns, and wind dispersion, followed by a 3x3
//! neighbour smoothing pass.

use rand::Rng;

/// Grid dimension (square).
pub const GRID_SIZE: usize = 10;

/// Southwest anchor of the grid.
pub const ORIGIN_LAT: f64 = 17.300;
pub const ORIGIN_LON: f64 = 78.400;

/// Grid cell step in degrees (~500 m).
pub const CELL_STEP: f64 = 0.005;

/// Region names cycled across the grid by `(row + col) % len`.
pub const REGIONS: [&str; 10] = [
    "Gachibowli",
    "Hitech City",
    "Banjara Hills",
    "Jubilee Hills",
    "Secunderabad",
    "Mehdipatnam",
    "Uppal",
    "LB Nagar",
    "Kukatpally",
    "Miyapur",
];

/// Region name for a grid cell.
pub fn region_name(row: usize, col: usize) -> &'static str {
    REGIONS[(row + col) % REGIONS.len()]
}

/// City-wide baseline PM2.5 by hour of day (diurnal cycle).
///
/// Peaks during commuting hours, drops late at night. Reference 50 µg/m³.
pub fn diurnal_baseline(hour: u32) -> f64 {
    if (8..=10).contains(&hour) {
        65.0 // morning rush hour
    } else if (18..=21).contains(&hour) {
        70.0 // evening rush hour
    } else if hour >= 23 || hour <= 4 {
        35.0 // late night / early morning
    } else {
        50.0 // standard daytime activity
    }
}

/// Base emission factor by region type (µg/m³ offset).
pub fn emission_factor(region: &str) -> f64 {
    match region {
        "Gachibowli" | "Miyapur" => -15.0,
        "Hitech City" | "Banjara Hills" | "Jubilee Hills" => -5.0,
        "Mehdipatnam" | "Kukatpally" => 5.0,
        "Secunderabad" | "Uppal" | "LB Nagar" => 15.0,
        _ => 0.0,
    }
}

/// Spatial hotspot modifier for a grid cell.
///
/// Row 0 is the southern edge, row 9 the northern; col 0 west, col 9 east.
/// Rectangles and junction cells reflect the real pollution geography:
/// industrial clusters in the northwest, dense traffic in the central north,
/// cleaner upscale areas south of the centre.
pub fn hotspot_modifier<R: Rng + ?Sized>(row: usize, col: usize, rng: &mut R) -> f64 {
    if (6..=8).contains(&row) && (1..=3).contains(&col) {
        // Sanathnagar industrial belt: the city's worst readings
        25.0 + rng.random_range(0.0..15.0)
    } else if (7..=9).contains(&row) && col <= 2 {
        // Jeedimetla/Balanagar industrial area
        20.0 + rng.random_range(0.0..10.0)
    } else if row >= 8 && col == 0 {
        // Patancheru industrial corridor
        18.0 + rng.random_range(0.0..12.0)
    } else if (5..=7).contains(&row) && (4..=6).contains(&col) {
        // Secunderabad / old city: heavy traffic, dense population
        10.0 + rng.random_range(0.0..10.0)
    } else if (row == 7 && col == 2) || (row == 6 && col == 1) || (row == 5 && col == 3) {
        // Major traffic junctions
        15.0 + rng.random_range(0.0..15.0)
    } else if (1..=3).contains(&row) && col <= 2 {
        // Gachibowli: IT hub with moderate load
        5.0 + rng.random_range(0.0..10.0)
    } else if (3..=5).contains(&row) && (5..=7).contains(&col) {
        // Jubilee/Banjara Hills: cleaner upscale areas
        -10.0 + rng.random_range(0.0..5.0)
    } else if (2..=4).contains(&row) && (2..=4).contains(&col) {
        // Hitech City
        rng.random_range(0.0..8.0)
    } else {
        0.0
    }
}

/// 3x3 neighbour smoothing: 70% own value, 30% neighbour average, then
/// clamp to `[floor, ceiling]`. Light smoothing preserves hotspots.
pub fn smooth(
    raw: &[[f64; GRID_SIZE]; GRID_SIZE],
    floor: f64,
    ceiling: f64,
) -> [[f64; GRID_SIZE]; GRID_SIZE] {
    let mut smoothed = [[0.0; GRID_SIZE]; GRID_SIZE];
    for row in 0..GRID_SIZE {
        for col in 0..GRID_SIZE {
            let mut sum = 0.0;
            let mut count = 0u32;
            for dr in -1i64..=1 {
                for dc in -1i64..=1 {
                    if dr == 0 && dc == 0 {
                        continue;
                    }
                    let nr = row as i64 + dr;
                    let nc = col as i64 + dc;
                    if (0..GRID_SIZE as i64).contains(&nr) && (0..GRID_SIZE as i64).contains(&nc)
                    {
                        sum += raw[nr as usize][nc as usize];
                        count += 1;
                    }
                }
            }
            let avg_neighbors = if count > 0 {
                sum / count as f64
            } else {
                raw[row][col]
            };
            smoothed[row][col] = (raw[row][col] * 0.7 + avg_neighbors * 0.3).clamp(floor, ceiling);
        }
    }
    smoothed
}

/// Round to 2 decimal places (PM2.5 readings).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to 1 decimal place (ancillary readings).
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
