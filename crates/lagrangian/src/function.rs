/// A scalar function of the decision variables.
///
/// Used for both objectives and equality constraints. Implementations are
/// pure: the same `x` always yields the same value.
pub trait ScalarFunction {
    /// Number of decision variables the function takes.
    fn arity(&self) -> usize;

    /// Evaluates the function.
    ///
    /// Callers guarantee `x.len() == self.arity()`.
    fn value(&self, x: &[f64]) -> f64;
}

/// Linear function `Σ cᵢ·xᵢ`.
#[derive(Debug, Clone, PartialEq)]
pub struct Linear {
    coefficients: Vec<f64>,
}

impl Linear {
    /// Creates a linear function with one coefficient per variable.
    #[must_use]
    pub fn new(coefficients: Vec<f64>) -> Self {
        Self { coefficients }
    }

    #[must_use]
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }
}

impl ScalarFunction for Linear {
    fn arity(&self) -> usize {
        self.coefficients.len()
    }

    fn value(&self, x: &[f64]) -> f64 {
        self.coefficients.iter().zip(x).map(|(c, v)| c * v).sum()
    }
}

/// Sphere constraint `Σ xᵢ² − r²`, zero on the sphere of radius `r`.
///
/// In two variables this is the circle `x² + y² = r²`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    dim: usize,
    radius: f64,
}

impl Sphere {
    /// Creates a sphere constraint centered at the origin.
    #[must_use]
    pub fn new(dim: usize, radius: f64) -> Self {
        Self { dim, radius }
    }

    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl ScalarFunction for Sphere {
    fn arity(&self) -> usize {
        self.dim
    }

    fn value(&self, x: &[f64]) -> f64 {
        x.iter().map(|v| v * v).sum::<f64>() - self.radius * self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn linear_is_a_dot_product() {
        let f = Linear::new(vec![1.0, 1.0]);
        assert_eq!(f.arity(), 2);
        assert_relative_eq!(f.value(&[0.25, -2.0]), -1.75);

        let g = Linear::new(vec![2.0, -3.0, 0.5]);
        assert_relative_eq!(g.value(&[1.0, 1.0, 4.0]), 1.0);
    }

    #[test]
    fn sphere_vanishes_on_its_surface() {
        let circle = Sphere::new(2, 1.0);
        assert_eq!(circle.arity(), 2);

        let angle = 0.7_f64;
        assert_relative_eq!(circle.value(&[angle.cos(), angle.sin()]), 0.0, epsilon = 1e-15);
        assert_relative_eq!(circle.value(&[0.0, 0.0]), -1.0);
        assert_relative_eq!(circle.value(&[2.0, 0.0]), 3.0);
    }
}
