use super::error::EvaluationError;
use super::grid::Grid;
use super::math::quadrature;
use super::math::special::{factorial_f64, hermite};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Physical constants of a one-dimensional harmonic oscillator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OscillatorParams {
    pub hbar: f64,
    pub force_constant: f64,
    pub mass: f64,
}

impl Default for OscillatorParams {
    fn default() -> Self {
        Self {
            hbar: 1.0,
            force_constant: 1.0,
            mass: 1.0,
        }
    }
}

impl OscillatorParams {
    pub fn new(hbar: f64, force_constant: f64, mass: f64) -> Result<Self, EvaluationError> {
        let params = Self {
            hbar,
            force_constant,
            mass,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), EvaluationError> {
        for (name, value) in [
            ("hbar", self.hbar),
            ("force_constant", self.force_constant),
            ("mass", self.mass),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(EvaluationError::InvalidDomain(format!(
                    "{} must be positive and finite, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// Scale parameter `sqrt(k·m)/hbar` of the Gaussian envelope.
    pub fn alpha(&self) -> f64 {
        (self.force_constant * self.mass).sqrt() / self.hbar
    }

    pub fn angular_frequency(&self) -> f64 {
        (self.force_constant / self.mass).sqrt()
    }

    /// `E_n = hbar·omega·(n + 1/2)`.
    pub fn energy(&self, n: u32) -> f64 {
        self.hbar * self.angular_frequency() * (f64::from(n) + 0.5)
    }
}

/// Amplitudes of `psi_n` on a fixed set of positions.
#[derive(Debug, Clone, PartialEq)]
pub struct WavefunctionSample {
    pub n: u32,
    pub alpha: f64,
    pub positions: Vec<f64>,
    pub amplitudes: Vec<f64>,
}

impl WavefunctionSample {
    /// `<self| x |other>`, requiring both samples to share the same grid.
    pub fn transition_integral(&self, other: &WavefunctionSample) -> Result<f64, EvaluationError> {
        self.check_same_grid(other)?;
        overlap_integral(&self.amplitudes, &other.amplitudes, &self.positions)
    }

    /// `<self|other>` without the position weight.
    pub fn inner_product(&self, other: &WavefunctionSample) -> Result<f64, EvaluationError> {
        self.check_same_grid(other)?;
        quadrature::matrix_element(&self.positions, &self.amplitudes, &other.amplitudes, |_| 1.0)
    }

    pub fn norm_squared(&self) -> Result<f64, EvaluationError> {
        self.inner_product(self)
    }

    fn check_same_grid(&self, other: &WavefunctionSample) -> Result<(), EvaluationError> {
        if self.positions.len() != other.positions.len() {
            return Err(EvaluationError::GridMismatch(format!(
                "psi_{} has {} points but psi_{} has {}",
                self.n,
                self.positions.len(),
                other.n,
                other.positions.len()
            )));
        }
        if let Some(i) = self
            .positions
            .iter()
            .zip(&other.positions)
            .position(|(a, b)| a != b)
        {
            return Err(EvaluationError::GridMismatch(format!(
                "grids differ at index {}: {} vs {}",
                i, self.positions[i], other.positions[i]
            )));
        }
        Ok(())
    }
}

/// `(1 / sqrt(2^n · n!)) · (alpha/pi)^(1/4)`.
pub fn normalization_constant(n: u32, alpha: f64) -> f64 {
    let n_i32 = i32::try_from(n).unwrap_or(i32::MAX);
    1.0 / (2f64.powi(n_i32) * factorial_f64(n)).sqrt() * (alpha / PI).powf(0.25)
}

/// Closed-form `psi_n(x)` straight from the Hermite polynomial.
///
/// Loses precision once `2^n · n!` leaves the `f64` range; prefer
/// [`evaluate_wavefunction`] for anything beyond small `n`.
pub fn wavefunction_closed_form(n: u32, alpha: f64, x: f64) -> f64 {
    let sign = if n % 2 == 0 { 1.0 } else { -1.0 };
    sign * normalization_constant(n, alpha)
        * hermite(n, alpha.sqrt() * x)
        * (-alpha * x * x / 2.0).exp()
}

/// Normalized harmonic-oscillator eigenfunction `psi_n` at each position.
///
/// Uses the phase convention `(-1)^n · N_n · H_n(sqrt(alpha)·x) · exp(-alpha·x²/2)`.
/// Values come from the normalized three-term recurrence, which agrees with the
/// closed form but never builds `2^n · n!` explicitly.
pub fn evaluate_wavefunction(
    n: i32,
    alpha: f64,
    positions: &[f64],
) -> Result<Vec<f64>, EvaluationError> {
    let n = checked_quantum_number(n)?;
    check_alpha(alpha)?;
    Ok(positions
        .iter()
        .map(|&x| wavefunction_value(n, alpha, x))
        .collect())
}

pub fn sample_wavefunction(
    n: i32,
    alpha: f64,
    grid: &Grid,
) -> Result<WavefunctionSample, EvaluationError> {
    let amplitudes = evaluate_wavefunction(n, alpha, grid.points())?;
    Ok(WavefunctionSample {
        n: checked_quantum_number(n)?,
        alpha,
        positions: grid.points().to_vec(),
        amplitudes,
    })
}

/// `∫ psi_a(x) · x · psi_b(x) dx` by composite Simpson's rule over `positions`.
pub fn overlap_integral(
    psi_a: &[f64],
    psi_b: &[f64],
    positions: &[f64],
) -> Result<f64, EvaluationError> {
    quadrature::matrix_element(positions, psi_a, psi_b, |x| x)
}

/// Exact `<n| x |m>` for the phase convention used by [`evaluate_wavefunction`].
///
/// Non-zero only for `|n - m| = 1`, where it equals `-sqrt(max(n, m) / (2·alpha))`.
pub fn analytic_transition_dipole(n: u32, m: u32, alpha: f64) -> Result<f64, EvaluationError> {
    check_alpha(alpha)?;
    if n.abs_diff(m) != 1 {
        return Ok(0.0);
    }
    Ok(-(f64::from(n.max(m)) / (2.0 * alpha)).sqrt())
}

fn checked_quantum_number(n: i32) -> Result<u32, EvaluationError> {
    u32::try_from(n).map_err(|_| {
        EvaluationError::InvalidDomain(format!("quantum number must be >= 0, got {}", n))
    })
}

fn check_alpha(alpha: f64) -> Result<(), EvaluationError> {
    if !(alpha.is_finite() && alpha > 0.0) {
        return Err(EvaluationError::InvalidDomain(format!(
            "alpha must be positive and finite, got {}",
            alpha
        )));
    }
    Ok(())
}

fn wavefunction_value(n: u32, alpha: f64, x: f64) -> f64 {
    let xi = alpha.sqrt() * x;
    let ground = (alpha / PI).powf(0.25) * (-xi * xi / 2.0).exp();

    // phi_{k+1} = sqrt(2/(k+1))·xi·phi_k - sqrt(k/(k+1))·phi_{k-1}
    let mut phi_prev = 0.0;
    let mut phi_curr = ground;
    for k in 0..n {
        let kf = f64::from(k);
        let phi_next =
            (2.0 / (kf + 1.0)).sqrt() * xi * phi_curr - (kf / (kf + 1.0)).sqrt() * phi_prev;
        phi_prev = phi_curr;
        phi_curr = phi_next;
    }

    if n % 2 == 0 { phi_curr } else { -phi_curr }
}
