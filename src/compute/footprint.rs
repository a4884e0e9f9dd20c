//! Camera ground footprint and pass spacing.

use crate::error::{PlanError, Result};

/// Side length in meters of the square ground footprint seen by a camera
/// with the given field of view at the given altitude.
///
/// Pinhole model: `2 * altitude * tan(fov / 2)`. A single field-of-view
/// value is applied to both camera axes.
///
/// # Examples
///
/// ```
/// use aerosweep::compute::footprint::compute_footprint;
///
/// let footprint = compute_footprint(60.0, 100.0).unwrap();
/// assert!((footprint - 115.47).abs() < 0.01);
///
/// assert!(compute_footprint(180.0, 100.0).is_err());
/// ```
pub fn compute_footprint(field_of_view_degrees: f64, altitude_meters: f64) -> Result<f64> {
    if !field_of_view_degrees.is_finite()
        || field_of_view_degrees <= 0.0
        || field_of_view_degrees >= 180.0
    {
        return Err(PlanError::InvalidParameter(format!(
            "Field of view must be in (0, 180) degrees, got: {}",
            field_of_view_degrees
        )));
    }

    if !altitude_meters.is_finite() || altitude_meters <= 0.0 {
        return Err(PlanError::InvalidParameter(format!(
            "Altitude must be a positive number of meters, got: {}",
            altitude_meters
        )));
    }

    let half_angle = field_of_view_degrees.to_radians() / 2.0;
    Ok(2.0 * altitude_meters * half_angle.tan())
}

/// Distance in meters between adjacent scan lines so that consecutive
/// footprints overlap by `overlap_percent`.
///
/// # Examples
///
/// ```
/// use aerosweep::compute::footprint::compute_line_spacing;
///
/// assert_eq!(compute_line_spacing(100.0, 25.0).unwrap(), 75.0);
/// assert!(compute_line_spacing(100.0, 100.0).is_err());
/// ```
pub fn compute_line_spacing(footprint_meters: f64, overlap_percent: f64) -> Result<f64> {
    if !footprint_meters.is_finite() || footprint_meters <= 0.0 {
        return Err(PlanError::InvalidParameter(format!(
            "Footprint must be a positive number of meters, got: {}",
            footprint_meters
        )));
    }

    // At 100% every pass would sit on top of the previous one.
    if !overlap_percent.is_finite() || !(0.0..100.0).contains(&overlap_percent) {
        return Err(PlanError::InvalidParameter(format!(
            "Overlap must be in [0, 100) percent, got: {}",
            overlap_percent
        )));
    }

    Ok(footprint_meters * (1.0 - overlap_percent / 100.0))
}
