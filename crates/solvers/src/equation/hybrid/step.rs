use nalgebra::{DMatrix, DVector};

/// How a trust region step was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// Full Gauss–Newton step, inside the trust region.
    Newton,

    /// Full Cauchy step; used when the Jacobian is singular.
    Cauchy,

    /// Steepest descent scaled to the trust region boundary.
    ScaledGradient,

    /// Interpolation between the Cauchy and Newton points on the boundary.
    DogLeg,
}

/// A proposed step and the linear model's prediction for it.
#[derive(Debug, Clone, Copy)]
pub(super) struct Trial<const N: usize> {
    pub(super) step: [f64; N],
    pub(super) kind: StepKind,
    pub(super) norm: f64,
    /// Predicted `‖F + J·p‖²`.
    pub(super) predicted_sq: f64,
}

/// Linearization of the system at the current iterate.
pub(super) struct Linearization {
    jacobian: DMatrix<f64>,
    residuals: DVector<f64>,
    /// `Jᵀ·F`, the gradient of `½‖F‖²`.
    gradient: DVector<f64>,
    newton: Option<DVector<f64>>,
}

impl Linearization {
    pub(super) fn new<const N: usize>(
        jacobian: &[[f64; N]; N],
        residuals: &[f64; N],
        singular_tol: f64,
    ) -> Self {
        let jacobian = DMatrix::from_fn(N, N, |r, c| jacobian[r][c]);
        let residuals = DVector::from_column_slice(residuals);
        let gradient = jacobian.tr_mul(&residuals);
        let newton = gauss_newton(&jacobian, &residuals, singular_tol);

        Self {
            jacobian,
            residuals,
            gradient,
            newton,
        }
    }

    /// Returns true if the Gauss–Newton step was unavailable.
    pub(super) fn is_singular(&self) -> bool {
        self.newton.is_none()
    }

    /// Chooses a dog-leg step within `radius`.
    ///
    /// Returns `None` when there is no descent direction for `‖F‖²`.
    pub(super) fn dog_leg<const N: usize>(&self, radius: f64) -> Option<Trial<N>> {
        let g_norm = self.gradient.norm();
        let jg_sq = (&self.jacobian * &self.gradient).norm_squared();
        if g_norm == 0.0 || jg_sq == 0.0 {
            return None;
        }

        let cauchy = self.gradient.scale(-g_norm * g_norm / jg_sq);
        let cauchy_norm = cauchy.norm();

        let (step, kind) = match &self.newton {
            Some(newton) if newton.norm() <= radius => (newton.clone(), StepKind::Newton),
            _ if cauchy_norm >= radius => (
                self.gradient.scale(-radius / g_norm),
                StepKind::ScaledGradient,
            ),
            None => (cauchy, StepKind::Cauchy),
            Some(newton) => (boundary_point(&cauchy, newton, radius), StepKind::DogLeg),
        };

        let predicted_sq = (&self.residuals + &self.jacobian * &step).norm_squared();

        Some(Trial {
            step: std::array::from_fn(|i| step[i]),
            kind,
            norm: step.norm(),
            predicted_sq,
        })
    }
}

/// Solves `J·p = −F`, or returns `None` if `J` is numerically singular.
fn gauss_newton(
    jacobian: &DMatrix<f64>,
    residuals: &DVector<f64>,
    singular_tol: f64,
) -> Option<DVector<f64>> {
    let lu = jacobian.clone().lu();

    let pivots = lu.u().diagonal();
    if pivots.iter().any(|p| !p.is_finite()) {
        return None;
    }
    let largest = pivots.amax();
    let smallest = pivots.iter().fold(f64::INFINITY, |acc, p| acc.min(p.abs()));
    if largest == 0.0 || smallest <= singular_tol * largest {
        return None;
    }

    lu.solve(&-residuals)
}

/// Point where the segment from `cauchy` to `newton` crosses the trust radius.
///
/// Requires `‖cauchy‖ < radius < ‖newton‖`, so exactly one crossing exists.
fn boundary_point(cauchy: &DVector<f64>, newton: &DVector<f64>, radius: f64) -> DVector<f64> {
    let d = newton - cauchy;
    let a = d.norm_squared();
    let b = 2.0 * cauchy.dot(&d);
    let c = cauchy.norm_squared() - radius * radius;
    let beta = (-b + (b * b - 4.0 * a * c).sqrt()) / (2.0 * a);

    cauchy + d.scale(beta)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn takes_newton_step_inside_radius() {
        // J = 2I, F = (1, -1) → p = (-0.5, 0.5)
        let lin = Linearization::new(&[[2.0, 0.0], [0.0, 2.0]], &[1.0, -1.0], 1e-8);

        let trial = lin.dog_leg::<2>(10.0).expect("descent direction");

        assert_eq!(trial.kind, StepKind::Newton);
        assert_relative_eq!(trial.step[0], -0.5);
        assert_relative_eq!(trial.step[1], 0.5);
        assert_relative_eq!(trial.predicted_sq, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn scales_gradient_when_cauchy_leaves_radius() {
        let lin = Linearization::new(&[[1.0, 0.0], [0.0, 1.0]], &[3.0, 4.0], 1e-8);

        let trial = lin.dog_leg::<2>(1.0).expect("descent direction");

        assert_eq!(trial.kind, StepKind::ScaledGradient);
        assert_relative_eq!(trial.norm, 1.0, epsilon = 1e-12);
        assert_relative_eq!(trial.step[0], -0.6, epsilon = 1e-12);
        assert_relative_eq!(trial.step[1], -0.8, epsilon = 1e-12);
    }

    #[test]
    fn dog_leg_lands_on_boundary() {
        // Anisotropic J puts the Cauchy point inside and Newton point outside.
        let lin = Linearization::new(&[[1.0, 0.0], [0.0, 10.0]], &[2.0, 2.0], 1e-8);

        let trial = lin.dog_leg::<2>(1.0).expect("descent direction");

        assert_eq!(trial.kind, StepKind::DogLeg);
        assert_relative_eq!(trial.norm, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn falls_back_to_cauchy_when_singular() {
        // Rank-deficient J: both rows are identical.
        let lin = Linearization::new(&[[1.0, 1.0], [1.0, 1.0]], &[1.0, 1.0], 1e-8);
        assert!(lin.is_singular());

        let trial = lin.dog_leg::<2>(10.0).expect("descent direction");

        // g = (2, 2), J·g = (4, 4), α = 8 / 32 → p = (-0.5, -0.5)
        assert_eq!(trial.kind, StepKind::Cauchy);
        assert_relative_eq!(trial.step[0], -0.5, epsilon = 1e-12);
        assert_relative_eq!(trial.step[1], -0.5, epsilon = 1e-12);
    }

    #[test]
    fn no_step_without_descent_direction() {
        // F is orthogonal to the range of J, so Jᵀ·F = 0.
        let lin = Linearization::new(&[[1.0, 0.0], [0.0, 0.0]], &[0.0, 1.0], 1e-8);

        assert!(lin.dog_leg::<2>(1.0).is_none());
    }
}
