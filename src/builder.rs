//! Planner builder for fluent configuration
//!
//! Collects orientation, tolerance and validation settings and checks them
//! once when the planner is built.

use crate::config::{OrientationStrategy, PlannerConfig};
use crate::error::{PlanError, Result};
use crate::planner::Planner;

/// Builder for a [`Planner`] with custom strategy and tolerances.
///
/// # Examples
///
/// ```
/// use aerosweep::{OrientationStrategy, PlannerBuilder};
///
/// let planner = PlannerBuilder::new()
///     .orientation(OrientationStrategy::MinPerimeter)
///     .reject_self_intersections(true)
///     .build()?;
/// assert!(planner.config().reject_self_intersections);
/// # Ok::<(), aerosweep::PlanError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct PlannerBuilder {
    config: PlannerConfig,
}

impl PlannerBuilder {
    /// Create a new builder with the default configuration.
    pub fn new() -> Self {
        Self {
            config: PlannerConfig::default(),
        }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: PlannerConfig) -> Self {
        self.config = config;
        self
    }

    /// Objective used to pick the sweep direction.
    pub fn orientation(mut self, strategy: OrientationStrategy) -> Self {
        self.config = self.config.with_orientation(strategy);
        self
    }

    /// Fly every pass at this angle (degrees counter-clockwise from east)
    /// instead of choosing one.
    pub fn sweep_angle(mut self, degrees: f64) -> Self {
        self.config = self.config.with_sweep_angle(degrees);
        self
    }

    pub fn clip_tolerance(mut self, meters: f64) -> Self {
        self.config = self.config.with_clip_tolerance(meters);
        self
    }

    pub fn tie_tolerance(mut self, tolerance: f64) -> Self {
        self.config = self.config.with_tie_tolerance(tolerance);
        self
    }

    /// Fail planning on polygons whose boundary crosses itself.
    pub fn reject_self_intersections(mut self, enabled: bool) -> Self {
        self.config = self.config.with_self_intersection_check(enabled);
        self
    }

    /// Validate the configuration and build the planner.
    pub fn build(self) -> Result<Planner> {
        self.config
            .validate()
            .map_err(|e| PlanError::InvalidParameter(format!("Invalid planner config: {}", e)))?;
        Ok(Planner::new(self.config))
    }
}
