//! Per-agent tuning parameters.
//!
//! Every agent carries its own [`TuningParameters`]. They are set when the
//! agent spawns and only change through an explicit reconfigure, which
//! validates them first.
//!
//! # Example
//!
//! ```ignore
//! use flocksteer::prelude::*;
//!
//! let tuning = TuningParameters::default()
//!     .with_flight_speed(300.0)
//!     .with_separation(BehaviorParams::new(80.0, 1.5))
//!     .with_avoidance(BehaviorParams::new(250.0, 3.0).with_falloff(Falloff::Smooth));
//!
//! tuning.validate()?;
//! tuning.save("boid.json")?;
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised at the configuration boundary.
///
/// The steering math itself never fails; only loading or validating a
/// parameter set can.
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("{field} must be non-negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("{field} must be finite")]
    NonFinite { field: &'static str },

    #[error("failed to read or write tuning file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed tuning json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Distance falloff for behavior weights.
///
/// Every variant evaluates to a weight in `[0, 1]`: full weight at zero
/// distance, nothing beyond the behavior's range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Falloff {
    /// Full weight anywhere inside the range.
    Constant,

    /// Weight decreases linearly to zero at the range: `1 - d / r`.
    #[default]
    Linear,

    /// Smoothstep easing from full weight to zero.
    Smooth,
}

impl Falloff {
    /// Weight for a neighbor at `distance` given the behavior `range`.
    ///
    /// A zero range produces zero weight for every distance.
    pub fn weight(self, distance: f32, range: f32) -> f32 {
        if range <= 0.0 || !range.is_finite() || distance > range {
            return 0.0;
        }

        let t = (distance / range).clamp(0.0, 1.0);
        match self {
            Falloff::Constant => 1.0,
            Falloff::Linear => 1.0 - t,
            Falloff::Smooth => 1.0 - t * t * (3.0 - 2.0 * t),
        }
    }
}

/// How the avoidance force finds the closest point on the agent's heading.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AvoidanceProjection {
    /// Project the obstacle's offset from the agent onto the heading.
    #[default]
    Relative,

    /// Project the obstacle's absolute position onto the heading.
    ///
    /// Only yields a consistent escape direction for agents near the world
    /// origin. Kept for hosts tuned against that behavior.
    Absolute,
}

/// Range and strength of one steering behavior.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorParams {
    /// Neighbors farther than this contribute nothing.
    pub distance: f32,
    /// Magnitude of the behavior's force whenever it is non-zero.
    pub strength: f32,
    /// Weighting of neighbors inside `distance`. Cohesion takes a plain
    /// mean and ignores it.
    pub falloff: Falloff,
}

impl BehaviorParams {
    pub const fn new(distance: f32, strength: f32) -> Self {
        Self {
            distance,
            strength,
            falloff: Falloff::Linear,
        }
    }

    pub fn with_falloff(mut self, falloff: Falloff) -> Self {
        self.falloff = falloff;
        self
    }

    /// Weight of a neighbor at `distance` under this behavior.
    #[inline]
    pub fn weight(&self, distance: f32) -> f32 {
        self.falloff.weight(distance, self.distance)
    }

    fn validate(&self, distance_field: &'static str, strength_field: &'static str) -> Result<(), TuningError> {
        check_non_negative(distance_field, self.distance)?;
        check_non_negative(strength_field, self.strength)
    }
}

impl Default for BehaviorParams {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Editable steering configuration for one agent.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuningParameters {
    /// Rotation interpolation rate, as a fraction of the way per second.
    pub turn_speed: f32,
    /// Upper bound on the agent's scalar speed.
    pub flight_speed: f32,
    /// Speed gained per second until `flight_speed` is reached.
    pub acceleration: f32,
    pub separation: BehaviorParams,
    pub alignment: BehaviorParams,
    pub cohesion: BehaviorParams,
    pub avoidance: BehaviorParams,
    pub avoidance_projection: AvoidanceProjection,
}

impl Default for TuningParameters {
    fn default() -> Self {
        Self {
            turn_speed: 2.0,
            flight_speed: 500.0,
            acceleration: 250.0,
            separation: BehaviorParams::new(100.0, 1.0),
            alignment: BehaviorParams::new(300.0, 1.0),
            cohesion: BehaviorParams::new(400.0, 1.0),
            avoidance: BehaviorParams::new(300.0, 2.0),
            avoidance_projection: AvoidanceProjection::Relative,
        }
    }
}

impl TuningParameters {
    pub fn with_turn_speed(mut self, turn_speed: f32) -> Self {
        self.turn_speed = turn_speed;
        self
    }

    pub fn with_flight_speed(mut self, flight_speed: f32) -> Self {
        self.flight_speed = flight_speed;
        self
    }

    pub fn with_acceleration(mut self, acceleration: f32) -> Self {
        self.acceleration = acceleration;
        self
    }

    pub fn with_separation(mut self, params: BehaviorParams) -> Self {
        self.separation = params;
        self
    }

    pub fn with_alignment(mut self, params: BehaviorParams) -> Self {
        self.alignment = params;
        self
    }

    pub fn with_cohesion(mut self, params: BehaviorParams) -> Self {
        self.cohesion = params;
        self
    }

    pub fn with_avoidance(mut self, params: BehaviorParams) -> Self {
        self.avoidance = params;
        self
    }

    pub fn with_avoidance_projection(mut self, projection: AvoidanceProjection) -> Self {
        self.avoidance_projection = projection;
        self
    }

    /// Check that every rate, distance and strength is finite and non-negative.
    pub fn validate(&self) -> Result<(), TuningError> {
        check_non_negative("turn_speed", self.turn_speed)?;
        check_non_negative("flight_speed", self.flight_speed)?;
        check_non_negative("acceleration", self.acceleration)?;
        self.separation
            .validate("separation.distance", "separation.strength")?;
        self.alignment
            .validate("alignment.distance", "alignment.strength")?;
        self.cohesion.validate("cohesion.distance", "cohesion.strength")?;
        self.avoidance
            .validate("avoidance.distance", "avoidance.strength")
    }

    /// Parse and validate parameters from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load parameters from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Write parameters to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), TuningError> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)?;
        log::info!("saved tuning to {}", path.display());
        Ok(())
    }
}

fn check_non_negative(field: &'static str, value: f32) -> Result<(), TuningError> {
    if !value.is_finite() {
        return Err(TuningError::NonFinite { field });
    }
    if value < 0.0 {
        return Err(TuningError::Negative { field, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_falloff() {
        let f = Falloff::Linear;
        assert_eq!(f.weight(0.0, 10.0), 1.0);
        assert!((f.weight(5.0, 10.0) - 0.5).abs() < 1.0e-6);
        assert_eq!(f.weight(10.0, 10.0), 0.0);
        assert_eq!(f.weight(25.0, 10.0), 0.0);
    }

    #[test]
    fn test_falloff_zero_range() {
        for falloff in [Falloff::Constant, Falloff::Linear, Falloff::Smooth] {
            assert_eq!(falloff.weight(0.0, 0.0), 0.0);
            assert_eq!(falloff.weight(1.0, 0.0), 0.0);
        }
    }

    #[test]
    fn test_falloff_stays_in_unit_range() {
        for falloff in [Falloff::Constant, Falloff::Linear, Falloff::Smooth] {
            for i in 0..=40 {
                let w = falloff.weight(i as f32 * 0.5, 10.0);
                assert!((0.0..=1.0).contains(&w), "{falloff:?} gave {w}");
            }
        }
    }

    #[test]
    fn test_smooth_falloff_midpoint() {
        assert!((Falloff::Smooth.weight(5.0, 10.0) - 0.5).abs() < 1.0e-6);
        assert!(Falloff::Smooth.weight(2.0, 10.0) > Falloff::Linear.weight(2.0, 10.0));
    }

    #[test]
    fn test_default_is_valid() {
        assert!(TuningParameters::default().validate().is_ok());
    }

    #[test]
    fn test_negative_strength_rejected() {
        let tuning = TuningParameters::default().with_cohesion(BehaviorParams::new(10.0, -1.0));
        match tuning.validate() {
            Err(TuningError::Negative { field, value }) => {
                assert_eq!(field, "cohesion.strength");
                assert_eq!(value, -1.0);
            }
            other => panic!("expected Negative error, got {other:?}"),
        }
    }

    #[test]
    fn test_non_finite_rejected() {
        let tuning = TuningParameters::default().with_flight_speed(f32::INFINITY);
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::NonFinite { field: "flight_speed" })
        ));
    }

    #[test]
    fn test_json_partial_fills_defaults() {
        let tuning = TuningParameters::from_json(r#"{ "turn_speed": 4.0 }"#).unwrap();
        assert_eq!(tuning.turn_speed, 4.0);
        assert_eq!(tuning.flight_speed, TuningParameters::default().flight_speed);
        assert_eq!(tuning.separation.falloff, Falloff::Linear);
    }

    #[test]
    fn test_json_rejects_invalid_values() {
        let json = r#"{ "avoidance": { "distance": -5.0, "strength": 1.0 } }"#;
        assert!(matches!(
            TuningParameters::from_json(json),
            Err(TuningError::Negative { field: "avoidance.distance", .. })
        ));
        assert!(matches!(
            TuningParameters::from_json("{ not json"),
            Err(TuningError::Json(_))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("flocksteer-tuning-{}.json", std::process::id()));
        let tuning = TuningParameters::default()
            .with_turn_speed(0.75)
            .with_alignment(BehaviorParams::new(42.0, 3.0).with_falloff(Falloff::Smooth))
            .with_avoidance_projection(AvoidanceProjection::Absolute);

        tuning.save(&path).unwrap();
        let loaded = TuningParameters::load(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(loaded, tuning);
    }

    #[test]
    fn test_load_missing_file() {
        let result = TuningParameters::load("/definitely/not/here/tuning.json");
        assert!(matches!(result, Err(TuningError::Io(_))));
    }
}
