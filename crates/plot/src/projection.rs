use lagrange_multipliers::{Extremum, scene::Scene};
use thiserror::Error;

/// Orthographic view of 3D points, looking toward the origin.
///
/// The camera sits in the direction given by `azimuth` (angle in the `x`–`y`
/// plane from the `x` axis) and `elevation` (angle above that plane), both in
/// degrees. Screen `u` runs right and screen `v` runs up; `z` always projects
/// upward when the elevation is below 90°.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    azimuth: f64,
    elevation: f64,
}

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ProjectionError {
    #[error("azimuth must be finite, got {0}")]
    Azimuth(f64),

    #[error("elevation must be in [-90, 90] degrees, got {0}")]
    Elevation(f64),
}

impl Default for Projection {
    /// The familiar 3D axes view: azimuth −60°, elevation 30°.
    fn default() -> Self {
        Self {
            azimuth: -60.0,
            elevation: 30.0,
        }
    }
}

impl Projection {
    /// Creates a projection from angles in degrees.
    ///
    /// # Errors
    ///
    /// Returns an error if the azimuth is not finite or the elevation is
    /// outside `[-90, 90]`.
    pub fn new(azimuth: f64, elevation: f64) -> Result<Self, ProjectionError> {
        if !azimuth.is_finite() {
            return Err(ProjectionError::Azimuth(azimuth));
        }
        if !(-90.0..=90.0).contains(&elevation) {
            return Err(ProjectionError::Elevation(elevation));
        }
        Ok(Self { azimuth, elevation })
    }

    #[must_use]
    pub fn azimuth(&self) -> f64 {
        self.azimuth
    }

    #[must_use]
    pub fn elevation(&self) -> f64 {
        self.elevation
    }

    /// Projects a point onto the screen plane.
    #[must_use]
    pub fn project(&self, [x, y, z]: [f64; 3]) -> [f64; 2] {
        let (sin_az, cos_az) = self.azimuth.to_radians().sin_cos();
        let (sin_el, cos_el) = self.elevation.to_radians().sin_cos();

        let u = -x * sin_az + y * cos_az;
        let v = -(x * cos_az + y * sin_az) * sin_el + z * cos_el;
        [u, v]
    }

    fn project_all(&self, points: &[[f64; 3]]) -> Vec<[f64; 2]> {
        points.iter().map(|&p| self.project(p)).collect()
    }

    /// Projects every element of a scene.
    #[must_use]
    pub fn project_scene(&self, scene: &Scene) -> Projected {
        let wireframe = scene
            .surface
            .rows()
            .chain(scene.surface.columns())
            .map(|line| self.project_all(&line))
            .collect();

        Projected {
            wireframe,
            feasible_curve: self.project_all(&scene.feasible_curve),
            markers: scene
                .markers
                .iter()
                .map(|m| (m.extremum, self.project(m.position)))
                .collect(),
        }
    }
}

/// A scene flattened to screen coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Projected {
    /// Surface grid rows followed by columns.
    pub wireframe: Vec<Vec<[f64; 2]>>,
    pub feasible_curve: Vec<[f64; 2]>,
    pub markers: Vec<(Extremum, [f64; 2])>,
}
