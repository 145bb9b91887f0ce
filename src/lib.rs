//! High Stakes - match scoring for a robotics field simulation
//!
//! Core modules:
//! - `field`: Field model and the scoring engine (rings, holders, corners, snapshot)
//! - `settings`: Data-driven field units and scoring windows
//! - `demo`: Seeded headless match used by the native binary
//! - `platform`: Browser bindings (scoreboard overlay)

pub mod demo;
pub mod error;
pub mod field;
pub mod platform;
pub mod settings;

pub use error::ScoreError;
pub use field::{MatchState, ScoreValue, Scoreboard, ScoringEngine};
pub use settings::Settings;

/// Field and scoring constants
pub mod consts {
    /// Canvas units per field inch
    pub const PIXELS_PER_INCH: f32 = 5.0;
    /// Field side length in inches (square field)
    pub const FIELD_INCHES: f32 = 144.0;
    /// Field side length in canvas units
    pub const FIELD_SIZE: f32 = FIELD_INCHES * PIXELS_PER_INCH;

    /// Leg length of each corner triangle, in inches
    pub const CORNER_LEG_INCHES: f32 = 24.0;

    /// Rings a single holder can carry
    pub const RING_STACK_CAPACITY: usize = 6;
    /// Points for a ring below the top of a stack
    pub const RING_POINTS: i32 = 1;
    /// Points for the top ring of a stack
    pub const TOP_RING_POINTS: i32 = 3;

    /// Multiplier inside a bottom (reward) corner
    pub const POSITIVE_CORNER_MULTIPLIER: i32 = 2;
    /// Multiplier inside a top (penalty) corner
    pub const NEGATIVE_CORNER_MULTIPLIER: i32 = -2;

    /// Countdown second at which the corner snapshot is taken
    pub const LATE_PHASE_SECS: u32 = 30;
    /// Default match length in seconds
    pub const MATCH_DURATION_SECS: u32 = 60;
    /// Max per-axis distance for two goal positions to count as the same goal
    pub const SNAPSHOT_EPSILON: f32 = 1.0;
}

/// Convert field inches to canvas units
#[inline]
pub fn inches(value: f32) -> f32 {
    value * consts::PIXELS_PER_INCH
}
