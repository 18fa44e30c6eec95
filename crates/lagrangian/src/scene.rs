//! Plain data for drawing the unit circle problem.
//!
//! A [`Scene`] holds the objective surface over a square grid, the feasible
//! set lifted onto that surface, and a marker for every candidate whose
//! search succeeded. It carries no rendering details beyond which extremum
//! each marker represents.

use std::f64::consts::TAU;

use thiserror::Error;

use crate::{
    Extremum, ShapeMismatch,
    instance::{Extrema, UnitCircleLagrangian},
};

/// Sampling settings for a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneConfig {
    bounds: [f64; 2],
    spacing: f64,
    curve_samples: usize,
}

/// Errors that can occur when configuring or building a scene.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum SceneError {
    #[error("bounds must be finite with lower < upper, got [{0}, {1}]")]
    Bounds(f64, f64),

    #[error("spacing must be finite, positive, and no wider than the bounds, got {0}")]
    Spacing(f64),

    #[error("the feasible curve needs at least two samples, got {0}")]
    CurveSamples(usize),

    #[error("only two decision variables can be drawn, got {0}")]
    Dimension(usize),

    #[error("the problem has no constraint to draw")]
    NoConstraint,

    #[error(transparent)]
    Shape(#[from] ShapeMismatch),
}

impl Default for SceneConfig {
    fn default() -> Self {
        // Known-good values, unwrap is safe
        Self::new([-1.5, 1.5], 0.3, 50).unwrap()
    }
}

impl SceneConfig {
    /// Creates a scene config.
    ///
    /// The surface is sampled on the same `bounds` for both axes at roughly
    /// `spacing` apart, and the feasible curve at `curve_samples` angles.
    ///
    /// # Errors
    ///
    /// Returns an error if the bounds are empty or not finite, the spacing is
    /// not usable, or fewer than two curve samples are requested.
    pub fn new(bounds: [f64; 2], spacing: f64, curve_samples: usize) -> Result<Self, SceneError> {
        let [lo, hi] = bounds;
        if !lo.is_finite() || !hi.is_finite() || lo >= hi {
            return Err(SceneError::Bounds(lo, hi));
        }
        if !spacing.is_finite() || spacing <= 0.0 || spacing > hi - lo {
            return Err(SceneError::Spacing(spacing));
        }
        if curve_samples < 2 {
            return Err(SceneError::CurveSamples(curve_samples));
        }
        Ok(Self {
            bounds,
            spacing,
            curve_samples,
        })
    }

    #[must_use]
    pub fn bounds(&self) -> [f64; 2] {
        self.bounds
    }

    #[must_use]
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    #[must_use]
    pub fn curve_samples(&self) -> usize {
        self.curve_samples
    }

    /// Grid coordinates along one axis.
    ///
    /// Both bounds are included; the count is `round(width / spacing) + 1`,
    /// so the actual spacing may differ slightly from the requested one.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    pub fn axis(&self) -> Vec<f64> {
        let [lo, hi] = self.bounds;
        let intervals = ((hi - lo) / self.spacing).round().max(1.0) as usize;

        (0..=intervals)
            .map(|i| lo + (hi - lo) * i as f64 / intervals as f64)
            .collect()
    }
}

/// Objective heights over a rectangular grid.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceGrid {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,

    /// `heights[j][i]` is the objective at `(xs[i], ys[j])`.
    pub heights: Vec<Vec<f64>>,
}

impl SurfaceGrid {
    /// Points along each grid row (constant `y`).
    pub fn rows(&self) -> impl Iterator<Item = Vec<[f64; 3]>> + '_ {
        self.ys.iter().zip(&self.heights).map(|(&y, row)| {
            self.xs
                .iter()
                .zip(row)
                .map(|(&x, &z)| [x, y, z])
                .collect()
        })
    }

    /// Points along each grid column (constant `x`).
    pub fn columns(&self) -> impl Iterator<Item = Vec<[f64; 3]>> + '_ {
        self.xs.iter().enumerate().map(|(i, &x)| {
            self.ys
                .iter()
                .zip(&self.heights)
                .map(|(&y, row)| [x, y, row[i]])
                .collect()
        })
    }
}

/// A candidate to draw at `(x, y, objective)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub extremum: Extremum,
    pub position: [f64; 3],
}

/// Everything needed to draw the problem and its solutions.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub surface: SurfaceGrid,

    /// The feasible set lifted onto the objective surface; closed, so the
    /// first and last points coincide.
    pub feasible_curve: Vec<[f64; 3]>,

    /// Markers for successful searches, maximum first.
    pub markers: Vec<Marker>,

    /// Extrema whose search failed. They have no marker.
    pub rejected: Vec<Extremum>,
}

impl Scene {
    /// Samples the objective and feasible set and collects the candidates.
    ///
    /// # Errors
    ///
    /// Returns an error if the problem does not have exactly two decision
    /// variables or has no constraint.
    pub fn build(
        lagrangian: &UnitCircleLagrangian,
        extrema: &Extrema,
        config: &SceneConfig,
    ) -> Result<Self, SceneError> {
        if lagrangian.num_vars() != 2 {
            return Err(SceneError::Dimension(lagrangian.num_vars()));
        }
        let radius = lagrangian
            .constraints()
            .first()
            .ok_or(SceneError::NoConstraint)?
            .radius();

        let axis = config.axis();
        let heights = axis
            .iter()
            .map(|&y| {
                axis.iter()
                    .map(|&x| lagrangian.objective_value(&[x, y]))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        let surface = SurfaceGrid {
            xs: axis.clone(),
            ys: axis,
            heights,
        };

        let last = config.curve_samples - 1;
        #[allow(clippy::cast_precision_loss)]
        let feasible_curve = (0..config.curve_samples)
            .map(|i| {
                let angle = TAU * i as f64 / last as f64;
                let (x, y) = (radius * angle.cos(), radius * angle.sin());
                Ok([x, y, lagrangian.objective_value(&[x, y])?])
            })
            .collect::<Result<Vec<_>, ShapeMismatch>>()?;

        let mut markers = Vec::new();
        let mut rejected = Vec::new();
        for (extremum, result) in [Extremum::Maximum, Extremum::Minimum]
            .into_iter()
            .zip(extrema.iter())
        {
            match result {
                Ok(candidate) => {
                    let [x, y] = [candidate.state[0], candidate.state[1]];
                    markers.push(Marker {
                        extremum: candidate.extremum,
                        position: [x, y, candidate.value],
                    });
                }
                Err(_) => rejected.push(extremum),
            }
        }

        Ok(Self {
            surface,
            feasible_curve,
            markers,
            rejected,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::{
        instance::{lagrangian, solve_extrema},
        stationary::{self, Config},
    };

    #[test]
    fn default_config_samples_eleven_points_per_axis() {
        let axis = SceneConfig::default().axis();
        assert_eq!(axis.len(), 11);
        assert_relative_eq!(axis[0], -1.5);
        assert_relative_eq!(axis[5], 0.0, epsilon = 1e-15);
        assert_relative_eq!(axis[10], 1.5);
        for pair in axis.windows(2) {
            assert_relative_eq!(pair[1] - pair[0], 0.3, epsilon = 1e-12);
        }
    }

    #[test]
    fn rejects_bad_config() {
        assert_eq!(
            SceneConfig::new([1.0, -1.0], 0.3, 50),
            Err(SceneError::Bounds(1.0, -1.0))
        );
        assert_eq!(
            SceneConfig::new([-1.0, 1.0], 0.0, 50),
            Err(SceneError::Spacing(0.0))
        );
        assert_eq!(
            SceneConfig::new([-1.0, 1.0], 3.0, 50),
            Err(SceneError::Spacing(3.0))
        );
        assert_eq!(
            SceneConfig::new([-1.0, 1.0], 0.5, 1),
            Err(SceneError::CurveSamples(1))
        );
    }

    #[test]
    fn builds_scene_for_unit_circle() {
        let lagrangian = lagrangian();
        let extrema = solve_extrema(&lagrangian, &Config::default());
        let scene = Scene::build(&lagrangian, &extrema, &SceneConfig::default()).unwrap();

        assert_eq!(scene.surface.heights.len(), 11);
        assert!(scene.surface.heights.iter().all(|row| row.len() == 11));
        for (j, row) in scene.surface.heights.iter().enumerate() {
            for (i, z) in row.iter().enumerate() {
                assert_relative_eq!(*z, scene.surface.xs[i] + scene.surface.ys[j]);
            }
        }
        assert_eq!(scene.surface.rows().count(), 11);
        assert_eq!(scene.surface.columns().count(), 11);

        assert_eq!(scene.feasible_curve.len(), 50);
        for [x, y, z] in &scene.feasible_curve {
            assert_relative_eq!(x * x + y * y, 1.0, epsilon = 1e-12);
            assert_relative_eq!(*z, x + y, epsilon = 1e-12);
        }
        let first = scene.feasible_curve[0];
        let last = scene.feasible_curve[49];
        for (a, b) in first.iter().zip(last) {
            assert_relative_eq!(*a, b, epsilon = 1e-12);
        }

        let extremums: Vec<_> = scene.markers.iter().map(|m| m.extremum).collect();
        assert_eq!(extremums, [Extremum::Maximum, Extremum::Minimum]);
        assert_relative_eq!(scene.markers[0].position[2], 2.0_f64.sqrt(), epsilon = 1e-6);
        assert_relative_eq!(scene.markers[1].position[2], -(2.0_f64.sqrt()), epsilon = 1e-6);
        assert!(scene.rejected.is_empty());
    }

    #[test]
    fn failed_searches_are_rejected_not_drawn() {
        let lagrangian = lagrangian();
        let config = Config {
            solver: lagrange_solvers::equation::hybrid::Config {
                max_iters: 1,
                ..Default::default()
            },
            ..Config::default()
        };
        let extrema = solve_extrema(&lagrangian, &config);
        assert!(matches!(extrema.maximum, Err(stationary::Error::NotConverged { .. })));

        let scene = Scene::build(&lagrangian, &extrema, &SceneConfig::default()).unwrap();
        assert!(scene.markers.is_empty());
        assert_eq!(scene.rejected, [Extremum::Maximum, Extremum::Minimum]);
    }
}
