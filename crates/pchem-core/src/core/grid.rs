use super::error::EvaluationError;
use super::math::quadrature::validate_positions;

/// Largest number of points a generated grid may hold.
pub const MAX_GRID_POINTS: usize = 100_000_000;

/// An ordered, strictly increasing set of sample positions.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    points: Vec<f64>,
}

impl Grid {
    pub fn new(points: Vec<f64>) -> Result<Self, EvaluationError> {
        validate_positions(&points)?;
        Ok(Self { points })
    }

    /// Points `start, start + step, ...` strictly below `stop`.
    pub fn arange(start: f64, stop: f64, step: f64) -> Result<Self, EvaluationError> {
        if !(start.is_finite() && stop.is_finite() && step.is_finite()) {
            return Err(EvaluationError::InvalidInput(
                "grid bounds and step must be finite".to_string(),
            ));
        }
        if step <= 0.0 {
            return Err(EvaluationError::InvalidInput(format!(
                "grid step must be positive, got {}",
                step
            )));
        }
        if stop <= start {
            return Err(EvaluationError::InvalidInput(format!(
                "grid stop ({}) must exceed start ({})",
                stop, start
            )));
        }
        let count = ((stop - start) / step).ceil();
        if !count.is_finite() || count > MAX_GRID_POINTS as f64 {
            return Err(EvaluationError::InvalidInput(format!(
                "grid [{}, {}) with step {} needs {:e} points, more than the limit of {}",
                start, stop, step, count, MAX_GRID_POINTS
            )));
        }
        let points = (0..count as usize).map(|i| start + step * i as f64).collect();
        Self::new(points)
    }

    /// `count` evenly spaced points from `start` to `stop`, both included.
    pub fn linspace(start: f64, stop: f64, count: usize) -> Result<Self, EvaluationError> {
        if count < 2 {
            return Err(EvaluationError::InvalidInput(format!(
                "linspace needs at least 2 points, got {}",
                count
            )));
        }
        let step = (stop - start) / (count - 1) as f64;
        let points = (0..count)
            .map(|i| if i + 1 == count { stop } else { start + step * i as f64 })
            .collect();
        Self::new(points)
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

}
