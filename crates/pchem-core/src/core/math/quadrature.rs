use crate::core::error::EvaluationError;

/// Checks that `positions` is strictly increasing and finite.
pub fn validate_positions(positions: &[f64]) -> Result<(), EvaluationError> {
    if let Some(bad) = positions.iter().position(|x| !x.is_finite()) {
        return Err(EvaluationError::InvalidInput(format!(
            "position at index {} is not finite ({})",
            bad, positions[bad]
        )));
    }
    for (i, pair) in positions.windows(2).enumerate() {
        if pair[1] <= pair[0] {
            return Err(EvaluationError::InvalidGrid {
                index: i + 1,
                previous: pair[0],
                current: pair[1],
            });
        }
    }
    Ok(())
}

/// Composite Simpson's rule over samples `y` at (possibly non-uniform) `x`.
///
/// With an even number of samples the last interval cannot be covered by a
/// Simpson panel, so the result averages "Simpson + trailing trapezoid" and
/// "leading trapezoid + Simpson". Two samples reduce to the trapezoid rule.
pub fn simpson(x: &[f64], y: &[f64]) -> Result<f64, EvaluationError> {
    if x.len() != y.len() {
        return Err(EvaluationError::GridMismatch(format!(
            "{} positions but {} samples",
            x.len(),
            y.len()
        )));
    }
    validate_positions(x)?;

    let n = x.len();
    let integral = match n {
        0 | 1 => 0.0,
        2 => trapezoid_panel(x, y, 0),
        _ if n % 2 == 1 => simpson_panels(x, y),
        _ => {
            let head = simpson_panels(&x[..n - 1], &y[..n - 1]) + trapezoid_panel(x, y, n - 2);
            let tail = trapezoid_panel(x, y, 0) + simpson_panels(&x[1..], &y[1..]);
            0.5 * (head + tail)
        }
    };
    Ok(integral)
}

/// `∫ bra(x) · operator(x) · ket(x) dx` over the grid.
pub fn matrix_element<F>(
    positions: &[f64],
    bra: &[f64],
    ket: &[f64],
    operator: F,
) -> Result<f64, EvaluationError>
where
    F: Fn(f64) -> f64,
{
    if bra.len() != ket.len() || bra.len() != positions.len() {
        return Err(EvaluationError::GridMismatch(format!(
            "bra has {} samples, ket has {}, grid has {} positions",
            bra.len(),
            ket.len(),
            positions.len()
        )));
    }
    let integrand: Vec<f64> = positions
        .iter()
        .zip(bra.iter().zip(ket))
        .map(|(&x, (&b, &k))| b * operator(x) * k)
        .collect();
    simpson(positions, &integrand)
}

#[inline]
fn trapezoid_panel(x: &[f64], y: &[f64], i: usize) -> f64 {
    0.5 * (x[i + 1] - x[i]) * (y[i] + y[i + 1])
}

// Requires an odd number of points (an even number of intervals).
fn simpson_panels(x: &[f64], y: &[f64]) -> f64 {
    let mut total = 0.0;
    for i in (0..x.len() - 2).step_by(2) {
        let h0 = x[i + 1] - x[i];
        let h1 = x[i + 2] - x[i + 1];
        let hsum = h0 + h1;
        let hprod = h0 * h1;
        let h0_over_h1 = h0 / h1;
        total += hsum / 6.0
            * (y[i] * (2.0 - 1.0 / h0_over_h1)
                + y[i + 1] * (hsum * hsum / hprod)
                + y[i + 2] * (2.0 - h0_over_h1));
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    fn uniform(start: f64, stop: f64, n: usize) -> Vec<f64> {
        let step = (stop - start) / (n - 1) as f64;
        (0..n).map(|i| start + step * i as f64).collect()
    }

    #[test]
    fn simpson_integrates_cubic_exactly_with_odd_sample_count() {
        let x = uniform(0.0, 2.0, 11);
        let y: Vec<f64> = x.iter().map(|v| v.powi(3) - v).collect();
        assert!(f64_approx_equal(simpson(&x, &y).unwrap(), 4.0 - 2.0));
    }

    #[test]
    fn simpson_integrates_quadratic_exactly_on_non_uniform_grid() {
        let x = vec![0.0, 0.1, 0.4, 0.5, 1.0, 1.2, 2.0];
        let y: Vec<f64> = x.iter().map(|v| 3.0 * v * v).collect();
        assert!(f64_approx_equal(simpson(&x, &y).unwrap(), 8.0));
    }

    #[test]
    fn simpson_with_even_sample_count_is_accurate_for_smooth_integrand() {
        let x = uniform(0.0, std::f64::consts::PI, 200);
        let y: Vec<f64> = x.iter().map(|v| v.sin()).collect();
        let result = simpson(&x, &y).unwrap();
        assert!((result - 2.0).abs() < 1e-6);
    }

    #[test]
    fn simpson_with_two_samples_is_trapezoid() {
        let result = simpson(&[1.0, 3.0], &[2.0, 4.0]).unwrap();
        assert!(f64_approx_equal(result, 6.0));
    }

    #[test]
    fn simpson_with_fewer_than_two_samples_is_zero() {
        assert!(f64_approx_equal(simpson(&[], &[]).unwrap(), 0.0));
        assert!(f64_approx_equal(simpson(&[1.0], &[5.0]).unwrap(), 0.0));
    }

    #[test]
    fn simpson_rejects_length_mismatch() {
        let result = simpson(&[0.0, 1.0, 2.0], &[1.0, 1.0]);
        assert!(matches!(result, Err(EvaluationError::GridMismatch(_))));
    }

    #[test]
    fn simpson_rejects_non_increasing_grid() {
        let result = simpson(&[0.0, 1.0, 1.0], &[1.0, 1.0, 1.0]);
        assert!(matches!(
            result,
            Err(EvaluationError::InvalidGrid { index: 2, .. })
        ));
    }

    #[test]
    fn validate_positions_rejects_nan() {
        let result = validate_positions(&[0.0, f64::NAN, 1.0]);
        assert!(matches!(result, Err(EvaluationError::InvalidInput(_))));
    }

    #[test]
    fn matrix_element_applies_operator_between_bra_and_ket() {
        let x = uniform(-1.0, 1.0, 101);
        let ones = vec![1.0; x.len()];
        let result = matrix_element(&x, &ones, &ones, |v| v * v).unwrap();
        assert!(f64_approx_equal(result, 2.0 / 3.0));
    }

    #[test]
    fn matrix_element_rejects_mismatched_lengths() {
        let result = matrix_element(&[0.0, 1.0], &[1.0, 1.0], &[1.0], |v| v);
        assert!(matches!(result, Err(EvaluationError::GridMismatch(_))));
    }
}
