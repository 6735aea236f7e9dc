use crate::core::error::EvaluationError;
use crate::core::grid::Grid;
use crate::core::oscillator::OscillatorParams;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
}

/// Sampling grid `start, start + step, ...` below `stop`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridSpec {
    pub start: f64,
    pub stop: f64,
    pub step: f64,
}

impl GridSpec {
    pub fn build(&self) -> Result<Grid, EvaluationError> {
        Grid::arange(self.start, self.stop, self.step)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpringConstants {
    pub k1: f64,
    pub k2: f64,
    pub k3: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VibrationalConfig {
    pub oscillator: OscillatorParams,
    pub grid: GridSpec,
    pub max_level: u32,
    pub springs: SpringConstants,
    pub mode_mass: f64,
}

#[derive(Default)]
pub struct VibrationalConfigBuilder {
    oscillator: Option<OscillatorParams>,
    grid: Option<GridSpec>,
    max_level: Option<u32>,
    springs: Option<SpringConstants>,
    mode_mass: Option<f64>,
}

impl VibrationalConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn oscillator(mut self, params: OscillatorParams) -> Self {
        self.oscillator = Some(params);
        self
    }
    pub fn grid(mut self, grid: GridSpec) -> Self {
        self.grid = Some(grid);
        self
    }
    pub fn max_level(mut self, level: u32) -> Self {
        self.max_level = Some(level);
        self
    }
    pub fn springs(mut self, springs: SpringConstants) -> Self {
        self.springs = Some(springs);
        self
    }
    pub fn mode_mass(mut self, mass: f64) -> Self {
        self.mode_mass = Some(mass);
        self
    }

    pub fn build(self) -> Result<VibrationalConfig, ConfigError> {
        Ok(VibrationalConfig {
            oscillator: self
                .oscillator
                .ok_or(ConfigError::MissingParameter("oscillator"))?,
            grid: self.grid.ok_or(ConfigError::MissingParameter("grid"))?,
            max_level: self
                .max_level
                .ok_or(ConfigError::MissingParameter("max_level"))?,
            springs: self
                .springs
                .ok_or(ConfigError::MissingParameter("springs"))?,
            mode_mass: self
                .mode_mass
                .ok_or(ConfigError::MissingParameter("mode_mass"))?,
        })
    }
}
