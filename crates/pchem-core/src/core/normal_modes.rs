use super::error::EvaluationError;
use nalgebra::{DMatrix, DVector, Matrix2, SymmetricEigen};
use serde::Serialize;
use tracing::trace;

const SYMMETRY_TOLERANCE: f64 = 1e-9;
const SIGN_TOLERANCE: f64 = 1e-12;

/// Eigenpairs of a symmetric Hessian, sorted by ascending eigenvalue.
///
/// Each eigenvector has unit length and its first non-negligible component is
/// positive, so results are reproducible regardless of the solver's phase.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalModes {
    pub eigenvalues: Vec<f64>,
    pub eigenvectors: Vec<Vec<f64>>,
}

impl NormalModes {
    pub fn from_hessian(hessian: DMatrix<f64>) -> Result<Self, EvaluationError> {
        if hessian.is_empty() || !hessian.is_square() {
            return Err(EvaluationError::InvalidInput(format!(
                "Hessian must be a non-empty square matrix, got {}x{}",
                hessian.nrows(),
                hessian.ncols()
            )));
        }
        if hessian.iter().any(|v| !v.is_finite()) {
            return Err(EvaluationError::InvalidInput(
                "Hessian contains non-finite entries".to_string(),
            ));
        }
        let asymmetry = (&hessian - hessian.transpose()).amax();
        if asymmetry > SYMMETRY_TOLERANCE * hessian.amax().max(1.0) {
            return Err(EvaluationError::InvalidInput(format!(
                "Hessian is not symmetric (max |H - H^T| = {:e})",
                asymmetry
            )));
        }

        let eigen = SymmetricEigen::new(hessian);

        let mut order: Vec<usize> = (0..eigen.eigenvalues.len()).collect();
        order.sort_by(|&a, &b| eigen.eigenvalues[a].total_cmp(&eigen.eigenvalues[b]));

        let eigenvalues = order.iter().map(|&i| eigen.eigenvalues[i]).collect();
        let eigenvectors = order
            .iter()
            .map(|&i| canonical_phase(eigen.eigenvectors.column(i).into_owned()))
            .collect();

        trace!(?order, "Sorted symmetric eigenpairs.");
        Ok(Self {
            eigenvalues,
            eigenvectors,
        })
    }

    /// Angular frequencies `sqrt(lambda / m)` for a uniform mass.
    ///
    /// A negative eigenvalue marks an unstable mode and is reported as a
    /// negative (imaginary) frequency.
    pub fn frequencies(&self, mass: f64) -> Result<Vec<f64>, EvaluationError> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(EvaluationError::InvalidInput(format!(
                "mass must be positive and finite, got {}",
                mass
            )));
        }
        Ok(self
            .eigenvalues
            .iter()
            .map(|&lambda| lambda.signum() * (lambda.abs() / mass).sqrt())
            .collect())
    }

    pub fn len(&self) -> usize {
        self.eigenvalues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.eigenvalues.is_empty()
    }
}

/// `[[k1 + k2, -k3], [-k3, k2 + k3]]` for three non-negative spring constants.
pub fn stiffness_matrix(k1: f64, k2: f64, k3: f64) -> Result<Matrix2<f64>, EvaluationError> {
    for (name, k) in [("k1", k1), ("k2", k2), ("k3", k3)] {
        if !k.is_finite() || k < 0.0 {
            return Err(EvaluationError::InvalidInput(format!(
                "spring constant {} must be non-negative and finite, got {}",
                name, k
            )));
        }
    }
    Ok(Matrix2::new(k1 + k2, -k3, -k3, k2 + k3))
}

pub fn solve_normal_modes(k1: f64, k2: f64, k3: f64) -> Result<NormalModes, EvaluationError> {
    let stiffness = stiffness_matrix(k1, k2, k3)?;
    NormalModes::from_hessian(DMatrix::from_iterator(2, 2, stiffness.iter().copied()))
}

fn canonical_phase(vector: DVector<f64>) -> Vec<f64> {
    let flip = vector
        .iter()
        .find(|v| v.abs() > SIGN_TOLERANCE)
        .is_some_and(|v| *v < 0.0);
    let mut unit = vector.normalize();
    if flip {
        unit.neg_mut();
    }
    unit.iter().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    fn dot(a: &[f64], b: &[f64]) -> f64 {
        a.iter().zip(b).map(|(x, y)| x * y).sum()
    }

    #[test]
    fn stiffness_matrix_has_expected_layout() {
        let m = stiffness_matrix(1.0, 2.0, 3.0).unwrap();
        assert!(f64_approx_equal(m[(0, 0)], 3.0));
        assert!(f64_approx_equal(m[(0, 1)], -3.0));
        assert!(f64_approx_equal(m[(1, 0)], -3.0));
        assert!(f64_approx_equal(m[(1, 1)], 5.0));
    }

    #[test]
    fn unit_springs_give_eigenvalues_one_and_three() {
        let modes = solve_normal_modes(1.0, 1.0, 1.0).unwrap();
        assert_eq!(modes.len(), 2);
        assert!(f64_approx_equal(modes.eigenvalues[0], 1.0));
        assert!(f64_approx_equal(modes.eigenvalues[1], 3.0));
    }

    #[test]
    fn unit_springs_give_orthonormal_eigenvectors() {
        let modes = solve_normal_modes(1.0, 1.0, 1.0).unwrap();
        let v0 = &modes.eigenvectors[0];
        let v1 = &modes.eigenvectors[1];
        assert!(f64_approx_equal(dot(v0, v1), 0.0));
        assert!(f64_approx_equal(dot(v0, v0), 1.0));
        assert!(f64_approx_equal(dot(v1, v1), 1.0));

        let s = 0.5f64.sqrt();
        assert!(f64_approx_equal(v0[0], s) && f64_approx_equal(v0[1], s));
        assert!(f64_approx_equal(v1[0], s) && f64_approx_equal(v1[1], -s));
    }

    #[test]
    fn eigenpairs_satisfy_eigen_equation_for_asymmetric_springs() {
        let (k1, k2, k3) = (0.7, 2.3, 1.4);
        let h = stiffness_matrix(k1, k2, k3).unwrap();
        let modes = solve_normal_modes(k1, k2, k3).unwrap();
        assert!(modes.eigenvalues[0] <= modes.eigenvalues[1]);
        for (lambda, v) in modes.eigenvalues.iter().zip(&modes.eigenvectors) {
            let hv0 = h[(0, 0)] * v[0] + h[(0, 1)] * v[1];
            let hv1 = h[(1, 0)] * v[0] + h[(1, 1)] * v[1];
            assert!(f64_approx_equal(hv0, lambda * v[0]));
            assert!(f64_approx_equal(hv1, lambda * v[1]));
        }
    }

    #[test]
    fn negative_spring_constant_is_rejected() {
        let result = solve_normal_modes(-1.0, 1.0, 1.0);
        assert!(matches!(result, Err(EvaluationError::InvalidInput(_))));
    }

    #[test]
    fn zero_coupling_decouples_modes() {
        let modes = solve_normal_modes(2.0, 1.0, 0.0).unwrap();
        assert!(f64_approx_equal(modes.eigenvalues[0], 1.0));
        assert!(f64_approx_equal(modes.eigenvalues[1], 3.0));
        assert!(f64_approx_equal(modes.eigenvectors[0][0].abs(), 0.0));
        assert!(f64_approx_equal(modes.eigenvectors[0][1], 1.0));
    }

    #[test]
    fn from_hessian_rejects_asymmetric_matrix() {
        let h = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 0.0, 1.0]);
        let result = NormalModes::from_hessian(h);
        assert!(matches!(result, Err(EvaluationError::InvalidInput(_))));
    }

    #[test]
    fn from_hessian_rejects_non_square_matrix() {
        let h = DMatrix::from_row_slice(2, 3, &[1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
        let result = NormalModes::from_hessian(h);
        assert!(matches!(result, Err(EvaluationError::InvalidInput(_))));
    }

    #[test]
    fn from_hessian_handles_larger_chains() {
        let h = DMatrix::from_row_slice(
            3,
            3,
            &[2.0, -1.0, 0.0, -1.0, 2.0, -1.0, 0.0, -1.0, 2.0],
        );
        let modes = NormalModes::from_hessian(h).unwrap();
        let sqrt2 = 2f64.sqrt();
        assert!(f64_approx_equal(modes.eigenvalues[0], 2.0 - sqrt2));
        assert!(f64_approx_equal(modes.eigenvalues[1], 2.0));
        assert!(f64_approx_equal(modes.eigenvalues[2], 2.0 + sqrt2));
    }

    #[test]
    fn frequencies_take_square_root_over_mass() {
        let modes = solve_normal_modes(1.0, 1.0, 1.0).unwrap();
        let freqs = modes.frequencies(4.0).unwrap();
        assert!(f64_approx_equal(freqs[0], 0.5));
        assert!(f64_approx_equal(freqs[1], 3f64.sqrt() / 2.0));
    }

    #[test]
    fn frequencies_report_unstable_modes_as_negative() {
        let h = DMatrix::from_row_slice(2, 2, &[-4.0, 0.0, 0.0, 1.0]);
        let modes = NormalModes::from_hessian(h).unwrap();
        let freqs = modes.frequencies(1.0).unwrap();
        assert!(f64_approx_equal(freqs[0], -2.0));
        assert!(f64_approx_equal(freqs[1], 1.0));
    }

    #[test]
    fn frequencies_reject_non_positive_mass() {
        let modes = solve_normal_modes(1.0, 1.0, 1.0).unwrap();
        assert!(matches!(
            modes.frequencies(0.0),
            Err(EvaluationError::InvalidInput(_))
        ));
    }
}
