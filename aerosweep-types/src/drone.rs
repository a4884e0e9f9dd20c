use serde::{Deserialize, Serialize};

/// Camera and flight parameters of the drone flying a survey.
///
/// The profile is a fixed-shape value: unknown fields are rejected when it is
/// deserialized so stray attributes never reach the geometry code. The short
/// names `fov` and `overlap` are accepted as aliases.
///
/// # Examples
///
/// ```
/// use aerosweep_types::drone::DroneProfile;
///
/// let json = r#"{
///     "model": "M30T",
///     "fieldOfView": 60.0,
///     "altitude": 100.0,
///     "overlapFraction": 50.0,
///     "speed": 10.0
/// }"#;
/// let drone: DroneProfile = serde_json::from_str(json).unwrap();
/// assert_eq!(drone.field_of_view, 60.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DroneProfile {
    /// Free-form model label
    #[serde(default)]
    pub model: String,
    /// Camera field of view in degrees, (0, 180)
    #[serde(alias = "fov")]
    pub field_of_view: f64,
    /// Flight altitude above ground in meters
    pub altitude: f64,
    /// Overlap between adjacent passes in percent, [0, 100)
    #[serde(alias = "overlap")]
    pub overlap_fraction: f64,
    /// Ground speed in meters per second
    pub speed: f64,
}

impl DroneProfile {
    pub fn new(
        model: impl Into<String>,
        field_of_view: f64,
        altitude: f64,
        overlap_fraction: f64,
        speed: f64,
    ) -> Self {
        Self {
            model: model.into(),
            field_of_view,
            altitude,
            overlap_fraction,
            speed,
        }
    }

    /// Same profile flown at a different ground speed.
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    /// Same profile with a different overlap percentage.
    pub fn with_overlap(mut self, overlap_fraction: f64) -> Self {
        self.overlap_fraction = overlap_fraction;
        self
    }
}
