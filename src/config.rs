//! Tunable parameters for the character.
//!
//! Every field has a default matching the shipped widget, so a host page can
//! pass a partial JSON object (or nothing at all) and override only what it
//! cares about:
//!
//! ```json
//! { "gravity": 900, "bounce_fraction": 0.5, "screen_wrap": false }
//! ```

use serde::Deserialize;
use tracing::{info, warn};

use crate::error::{Result, WidgetError};
use crate::character::Pose;

/// Inclusive millisecond range a random duration is drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct DurationRange {
    pub min_ms: f64,
    pub max_ms: f64,
}

impl DurationRange {
    pub const fn new(min_ms: f64, max_ms: f64) -> Self {
        Self { min_ms, max_ms }
    }

    fn validate(&self, name: &str) -> Result<()> {
        if !(self.min_ms.is_finite() && self.max_ms.is_finite()) || self.min_ms < 0.0 {
            return Err(WidgetError::InvalidConfig(format!(
                "{name}: durations must be finite and non-negative"
            )));
        }
        if self.min_ms > self.max_ms {
            return Err(WidgetError::InvalidConfig(format!(
                "{name}: min_ms {} exceeds max_ms {}",
                self.min_ms, self.max_ms
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    // --- Assets / presentation ---
    /// Directory the four pose animations are served from (trailing slash optional).
    pub asset_base: String,
    pub idle_asset: String,
    pub walk_asset: String,
    pub sit_asset: String,
    pub dangle_asset: String,
    pub base_scale: f64,
    pub z_index: i32,

    // --- Behaviour timing ---
    pub idle_wait: DurationRange,
    pub sit_duration: DurationRange,
    /// Probability that an idle decision picks sitting over walking.
    pub sit_chance: f64,
    /// Probability the widget starts out sitting instead of idling.
    pub initial_sit_chance: f64,
    /// Delay before a left-facing idle character turns back to the right.
    pub flip_back_ms: f64,

    // --- Walking ---
    /// Walk speed in sprite widths per second.
    pub walk_speed: f64,
    pub walk_min_distance: f64,
    pub walk_target_attempts: u32,

    // --- Physics (px, seconds) ---
    /// Downward acceleration magnitude.
    pub gravity: f64,
    /// Rebound height as a fraction of the fall's peak height.
    pub bounce_fraction: f64,
    /// Coulomb friction deceleration while sliding.
    pub slide_friction: f64,
    /// Release speeds below this are a plain drop.
    pub drop_speed_threshold: f64,
    pub max_throw_speed: f64,
    /// Horizontal speed under which the character counts as stopped.
    pub rest_speed: f64,
    pub max_frame_dt: f64,

    // --- Input ---
    /// Trailing window of pointer samples used for the release velocity.
    pub sample_window_ms: f64,

    // --- Modes ---
    pub screen_wrap: bool,
    /// `None` follows the `prefers-reduced-motion` media query.
    pub reduced_motion: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            asset_base: "/tinychancy/".into(),
            idle_asset: "tinychancy_idle.gif".into(),
            walk_asset: "tinychancy_walk.gif".into(),
            sit_asset: "tinychancy_sit.gif".into(),
            dangle_asset: "tinychancy_dangle.gif".into(),
            base_scale: 0.36,
            z_index: 9999,
            idle_wait: DurationRange::new(5_000.0, 10_000.0),
            sit_duration: DurationRange::new(10_000.0, 60_000.0),
            sit_chance: 0.1,
            initial_sit_chance: 0.2,
            flip_back_ms: 1_000.0,
            walk_speed: 1.0,
            walk_min_distance: 100.0,
            walk_target_attempts: 100,
            gravity: 300.0,
            bounce_fraction: 0.25,
            slide_friction: 500.0,
            drop_speed_threshold: 40.0,
            max_throw_speed: 1_500.0,
            rest_speed: 1.0,
            max_frame_dt: 0.05,
            sample_window_ms: 50.0,
            screen_wrap: true,
            reduced_motion: None,
        }
    }
}

impl Config {
    /// Parse a (possibly partial) JSON object and validate the result.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`Config::from_json`] but never fails: a bad document is logged
    /// and the defaults are used instead.
    pub fn from_json_or_default(json: Option<&str>) -> Self {
        let Some(json) = json.filter(|s| !s.trim().is_empty()) else {
            info!("no config supplied, using defaults");
            return Self::default();
        };
        match Self::from_json(json) {
            Ok(config) => {
                info!(
                    asset_base = %config.asset_base,
                    screen_wrap = config.screen_wrap,
                    "loaded tinychancy config"
                );
                config
            }
            Err(e) => {
                warn!(error = %e, "failed to load config, using defaults");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.idle_wait.validate("idle_wait")?;
        self.sit_duration.validate("sit_duration")?;

        let positive = [
            ("gravity", self.gravity),
            ("walk_speed", self.walk_speed),
            ("max_throw_speed", self.max_throw_speed),
            ("max_frame_dt", self.max_frame_dt),
            ("sample_window_ms", self.sample_window_ms),
            ("base_scale", self.base_scale),
        ];
        for (name, v) in positive {
            if !(v.is_finite() && v > 0.0) {
                return Err(WidgetError::InvalidConfig(format!("{name} must be > 0, got {v}")));
            }
        }

        let non_negative = [
            ("slide_friction", self.slide_friction),
            ("drop_speed_threshold", self.drop_speed_threshold),
            ("rest_speed", self.rest_speed),
            ("walk_min_distance", self.walk_min_distance),
            ("flip_back_ms", self.flip_back_ms),
        ];
        for (name, v) in non_negative {
            if !(v.is_finite() && v >= 0.0) {
                return Err(WidgetError::InvalidConfig(format!("{name} must be >= 0, got {v}")));
            }
        }

        let unit = [
            ("bounce_fraction", self.bounce_fraction),
            ("sit_chance", self.sit_chance),
            ("initial_sit_chance", self.initial_sit_chance),
        ];
        for (name, v) in unit {
            if !(0.0..=1.0).contains(&v) {
                return Err(WidgetError::InvalidConfig(format!(
                    "{name} must be within [0, 1], got {v}"
                )));
            }
        }
        Ok(())
    }

    /// Sprite scale for a viewport width; narrow screens get a smaller character.
    pub fn scale_for_viewport(&self, viewport_width: f64) -> f64 {
        if viewport_width < 400.0 {
            self.base_scale * 0.6
        } else if viewport_width < 700.0 {
            self.base_scale * 0.8
        } else {
            self.base_scale
        }
    }

    pub fn asset_url(&self, pose: Pose) -> String {
        let file = match pose {
            Pose::Idle => &self.idle_asset,
            Pose::Walk => &self.walk_asset,
            Pose::Sit => &self.sit_asset,
            Pose::Dangle => &self.dangle_asset,
        };
        if self.asset_base.is_empty() || self.asset_base.ends_with('/') {
            format!("{}{}", self.asset_base, file)
        } else {
            format!("{}/{}", self.asset_base, file)
        }
    }
}
