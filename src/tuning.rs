//! Data-driven game balance
//!
//! Timings and speeds a host may want to adjust without a rebuild. Point
//! values and maze geometry stay compile-time constants in `consts`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors from loading a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Balance values for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Run length in seconds
    pub time_limit_secs: f32,
    /// How long pursuers stay frightened after a power-up
    pub power_up_secs: f32,
    /// Grace period after losing a life
    pub invincibility_secs: f32,
    /// Player speed (tiles per second)
    pub player_speed: f32,
    /// Pursuer speed before progress scaling (tiles per second)
    pub pursuer_base_speed: f32,
    pub starting_lives: u8,
    /// Length of each chase or scatter phase
    pub mode_half_period_secs: f32,
    /// Visual distance (tiles) that counts as a touch
    pub contact_radius: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            time_limit_secs: TIME_LIMIT_SECS,
            power_up_secs: POWER_UP_SECS,
            invincibility_secs: INVINCIBILITY_SECS,
            player_speed: PLAYER_SPEED,
            pursuer_base_speed: PURSUER_BASE_SPEED,
            starting_lives: STARTING_LIVES,
            mode_half_period_secs: MODE_HALF_PERIOD_SECS,
            contact_radius: CONTACT_RADIUS,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document. Missing fields keep their
    /// defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        log::info!("Loaded tuning: {:?}", tuning);
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that every duration/speed is a positive finite number and
    /// that the player starts with at least one life
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("time_limit_secs", self.time_limit_secs),
            ("power_up_secs", self.power_up_secs),
            ("invincibility_secs", self.invincibility_secs),
            ("player_speed", self.player_speed),
            ("pursuer_base_speed", self.pursuer_base_speed),
            ("mode_half_period_secs", self.mode_half_period_secs),
            ("contact_radius", self.contact_radius),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(TuningError::Invalid {
                    field,
                    reason: format!("expected a positive number, got {value}"),
                });
            }
        }
        if self.starting_lives == 0 {
            return Err(TuningError::Invalid {
                field: "starting_lives",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
