//! Data-driven game balance
//!
//! Defaults reproduce the classic feel. A JSON file may override any subset
//! of fields; missing fields fall back to the defaults.

use serde::{Deserialize, Serialize};

/// Which cars the road check looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RowFilter {
    /// Only cars within half a row of the player
    #[default]
    Proximity,
    /// Every intact car, regardless of row
    AllCars,
}

/// Errors from loading or validating a tuning file
#[derive(Debug, thiserror::Error)]
pub enum TuningError {
    #[error("tuning parse failed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Game balance constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player spring ===
    /// Pull toward the target cell per frame unit
    pub tension: f32,
    /// Velocity damping per frame unit
    pub friction: f32,
    /// Displacement below which the player stops moving
    pub precision: f32,

    // === Timers (ms) ===
    pub freeze_ms: f32,
    pub timeout_ms: f32,
    /// Frames longer than this are clamped
    pub max_frame_ms: f32,

    // === Progress ===
    pub start_lives: u8,

    // === Turtles ===
    pub float_cycle_start: f32,
    /// Float cycle advance per ms
    pub float_rate: f32,

    // === Lanes (speeds in units per ms) ===
    pub car_speeds: [f32; 5],
    pub car_counts: [u8; 5],
    pub log_speed: f32,
    pub log_counts: [u8; 5],
    pub turtle_speed: f32,
    pub turtle_counts: [u8; 2],

    // === Collision ===
    pub row_filter: RowFilter,

    // === Blast ability ===
    pub blast_cooldown_ms: f32,
    pub blast_radius: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            tension: 0.1,
            friction: 0.625,
            precision: 0.001,

            freeze_ms: 1000.0,
            timeout_ms: 1500.0,
            max_frame_ms: 100.0,

            start_lives: 3,

            float_cycle_start: 75.0,
            float_rate: 0.06,

            car_speeds: [0.0015, 0.003, 0.009, 0.0045, 0.0015],
            car_counts: [4, 3, 1, 2, 3],
            log_speed: 0.0021,
            log_counts: [2, 3, 2, 1, 2],
            turtle_speed: 0.001707,
            turtle_counts: [3, 3],

            row_filter: RowFilter::Proximity,

            // 500 frames at 60 Hz
            blast_cooldown_ms: 500.0 / 0.06,
            blast_radius: 3.0,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Parse a tuning document, falling back to defaults on any error
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => {
                log::info!("Loaded tuning overrides");
                tuning
            }
            Err(e) => {
                log::warn!("{e}; using default tuning");
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        if !(self.tension > 0.0 && self.tension <= 1.0) {
            return Err(invalid("tension", "must be in (0, 1]"));
        }
        if !(0.0..1.0).contains(&self.friction) {
            return Err(invalid("friction", "must be in [0, 1)"));
        }
        if !(self.precision.is_finite() && self.precision > 0.0) {
            return Err(invalid("precision", "must be positive"));
        }
        if !(self.max_frame_ms.is_finite() && self.max_frame_ms > 0.0) {
            return Err(invalid("max_frame_ms", "must be positive"));
        }
        if self.start_lives == 0 {
            return Err(invalid("start_lives", "must be at least 1"));
        }

        let non_negative = [
            ("freeze_ms", self.freeze_ms),
            ("timeout_ms", self.timeout_ms),
            ("float_cycle_start", self.float_cycle_start),
            ("float_rate", self.float_rate),
            ("log_speed", self.log_speed),
            ("turtle_speed", self.turtle_speed),
            ("blast_cooldown_ms", self.blast_cooldown_ms),
            ("blast_radius", self.blast_radius),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(invalid(field, format!("{value} is not a finite non-negative number")));
            }
        }
        if let Some(speed) = self.car_speeds.iter().find(|s| !(s.is_finite() && **s >= 0.0)) {
            return Err(invalid(
                "car_speeds",
                format!("{speed} is not a finite non-negative number"),
            ));
        }

        let populations: [(&'static str, &[u8]); 3] = [
            ("car_counts", &self.car_counts),
            ("log_counts", &self.log_counts),
            ("turtle_counts", &self.turtle_counts),
        ];
        for (field, counts) in populations {
            if counts.contains(&0) {
                return Err(invalid(field, "every lane needs at least one obstacle"));
            }
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> TuningError {
    TuningError::Invalid {
        field,
        reason: reason.into(),
    }
}
