//! Planner configuration.
//!
//! Tolerances and strategy knobs that shape a plan without being part of the
//! drone profile. Serializable to JSON (and TOML with the `toml` feature).
use serde::de::Error;
use serde::{Deserialize, Serialize};

/// Objective minimized when choosing the sweep direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrientationStrategy {
    /// Minimum-area enclosing rectangle
    #[default]
    MinArea,
    /// Minimum-perimeter enclosing rectangle
    MinPerimeter,
}

/// Planner configuration
///
/// # Example
///
/// ```rust
/// use aerosweep::{OrientationStrategy, PlannerConfig};
///
/// let config = PlannerConfig::default();
/// assert_eq!(config.orientation, OrientationStrategy::MinArea);
///
/// let json = r#"{
///     "orientation": "min_perimeter",
///     "sweep_angle": 45.0
/// }"#;
/// let config = PlannerConfig::from_json(json).unwrap();
/// assert_eq!(config.sweep_angle, Some(45.0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlannerConfig {
    #[serde(default)]
    pub orientation: OrientationStrategy,

    /// Fixed sweep direction in degrees counter-clockwise from east.
    /// Skips orientation selection when set.
    #[serde(default)]
    pub sweep_angle: Option<f64>,

    /// Distance in meters below which clipped intervals are dropped and
    /// touching intervals are merged
    #[serde(default = "PlannerConfig::default_clip_tolerance")]
    pub clip_tolerance: f64,

    /// Relative tolerance for treating two candidate orientations as equal
    #[serde(default = "PlannerConfig::default_tie_tolerance")]
    pub tie_tolerance: f64,

    /// Reject polygons whose boundary crosses itself
    #[serde(default)]
    pub reject_self_intersections: bool,
}

impl PlannerConfig {
    const fn default_clip_tolerance() -> f64 {
        1e-6
    }

    const fn default_tie_tolerance() -> f64 {
        1e-9
    }

    pub fn with_orientation(mut self, strategy: OrientationStrategy) -> Self {
        self.orientation = strategy;
        self
    }

    pub fn with_sweep_angle(mut self, degrees: f64) -> Self {
        self.sweep_angle = Some(degrees);
        self
    }

    pub fn with_clip_tolerance(mut self, meters: f64) -> Self {
        self.clip_tolerance = meters;
        self
    }

    pub fn with_tie_tolerance(mut self, tolerance: f64) -> Self {
        self.tie_tolerance = tolerance;
        self
    }

    pub fn with_self_intersection_check(mut self, enabled: bool) -> Self {
        self.reject_self_intersections = enabled;
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if let Some(angle) = self.sweep_angle
            && !angle.is_finite()
        {
            return Err("Sweep angle must be finite".to_string());
        }

        if !self.clip_tolerance.is_finite() || self.clip_tolerance < 0.0 {
            return Err("Clip tolerance must be finite and non-negative".to_string());
        }

        if !self.tie_tolerance.is_finite() || self.tie_tolerance < 0.0 {
            return Err("Tie tolerance must be finite and non-negative".to_string());
        }

        Ok(())
    }

    /// Load configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: PlannerConfig = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load configuration from TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let config: PlannerConfig = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            orientation: OrientationStrategy::default(),
            sweep_angle: None,
            clip_tolerance: Self::default_clip_tolerance(),
            tie_tolerance: Self::default_tie_tolerance(),
            reject_self_intersections: false,
        }
    }
}
