use super::error::EvaluationError;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// A particle confined to `0 <= x <= length` by infinite walls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleInBox {
    pub length: f64,
    pub mass: f64,
    pub hbar: f64,
}

impl ParticleInBox {
    pub fn new(length: f64, mass: f64, hbar: f64) -> Result<Self, EvaluationError> {
        for (name, value) in [("length", length), ("mass", mass), ("hbar", hbar)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(EvaluationError::InvalidDomain(format!(
                    "{} must be positive and finite, got {}",
                    name, value
                )));
            }
        }
        Ok(Self {
            length,
            mass,
            hbar,
        })
    }

    /// `E_n = h²n² / (8·m·a²)` with `h = 2π·hbar`.
    pub fn energy(&self, n: u32) -> Result<f64, EvaluationError> {
        let n = check_level(n)?;
        let h = 2.0 * PI * self.hbar;
        Ok(h * h * n * n / (8.0 * self.mass * self.length * self.length))
    }

    /// `sqrt(2/a)·sin(nπx/a)` inside the box, zero outside.
    pub fn wavefunction(&self, n: u32, positions: &[f64]) -> Result<Vec<f64>, EvaluationError> {
        let n = check_level(n)?;
        let amplitude = (2.0 / self.length).sqrt();
        Ok(positions
            .iter()
            .map(|&x| {
                if (0.0..=self.length).contains(&x) {
                    amplitude * (n * PI * x / self.length).sin()
                } else {
                    0.0
                }
            })
            .collect())
    }

    /// Probability of finding the particle between `x1` and `x2`.
    ///
    /// The interval is clipped to the box before integrating `|psi_n|²`.
    pub fn probability(&self, n: u32, x1: f64, x2: f64) -> Result<f64, EvaluationError> {
        let n = check_level(n)?;
        if !(x1.is_finite() && x2.is_finite()) || x1 > x2 {
            return Err(EvaluationError::InvalidInput(format!(
                "expected finite bounds with x1 <= x2, got [{}, {}]",
                x1, x2
            )));
        }
        let lo = x1.clamp(0.0, self.length);
        let hi = x2.clamp(0.0, self.length);
        let a = self.length;
        // Antiderivative of sin²(nπx/a): x/2 - a·sin(2nπx/a)/(4nπ)
        let antiderivative = |x: f64| x / 2.0 - a * (2.0 * n * PI * x / a).sin() / (4.0 * n * PI);
        Ok(2.0 / a * (antiderivative(hi) - antiderivative(lo)))
    }

    pub fn mean_position(&self, n: u32) -> Result<f64, EvaluationError> {
        check_level(n)?;
        Ok(self.length / 2.0)
    }
}

fn check_level(n: u32) -> Result<f64, EvaluationError> {
    if n == 0 {
        return Err(EvaluationError::InvalidDomain(
            "particle-in-a-box levels start at n = 1".to_string(),
        ));
    }
    Ok(f64::from(n))
}
