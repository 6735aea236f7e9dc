use crate::core::error::EvaluationError;
use crate::core::normal_modes::solve_normal_modes;
use crate::core::oscillator::{WavefunctionSample, analytic_transition_dipole, sample_wavefunction};
use crate::engine::config::VibrationalConfig;
use crate::engine::error::EngineError;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, instrument};

/// Magnitude below which a transition integral counts as forbidden.
const FORBIDDEN_THRESHOLD: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelSummary {
    pub n: u32,
    pub energy: f64,
    pub norm: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransitionSummary {
    pub from: u32,
    pub to: u32,
    pub numeric: f64,
    pub analytic: f64,
    pub allowed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModeSummary {
    pub eigenvalue: f64,
    pub frequency: f64,
    pub eigenvector: Vec<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VibrationalReport {
    pub alpha: f64,
    pub grid_points: usize,
    pub levels: Vec<LevelSummary>,
    pub transitions: Vec<TransitionSummary>,
    pub modes: Vec<ModeSummary>,
    #[serde(skip)]
    pub samples: Vec<WavefunctionSample>,
}

impl VibrationalReport {
    /// Transitions whose numeric integral is non-negligible.
    pub fn observed_transitions(&self) -> impl Iterator<Item = &TransitionSummary> {
        self.transitions
            .iter()
            .filter(|t| t.numeric.abs() > FORBIDDEN_THRESHOLD)
    }
}

#[instrument(skip_all, name = "vibrational_workflow")]
pub fn run(config: &VibrationalConfig) -> Result<VibrationalReport, EngineError> {
    config.oscillator.validate()?;
    let grid = config.grid.build()?;
    let alpha = config.oscillator.alpha();
    let max_level = i32::try_from(config.max_level).map_err(|_| {
        EvaluationError::InvalidDomain(format!("max level {} is too large", config.max_level))
    })?;
    info!(
        alpha,
        grid_points = grid.len(),
        max_level,
        "Sampling oscillator wavefunctions."
    );

    let samples = (0..=max_level)
        .into_par_iter()
        .map(|n| sample_wavefunction(n, alpha, &grid))
        .collect::<Result<Vec<_>, _>>()?;

    let levels = samples
        .iter()
        .map(|s| {
            Ok(LevelSummary {
                n: s.n,
                energy: config.oscillator.energy(s.n),
                norm: s.norm_squared()?,
            })
        })
        .collect::<Result<Vec<_>, EvaluationError>>()?;

    let pairs: Vec<(usize, usize)> = (0..samples.len())
        .flat_map(|i| (i + 1..samples.len()).map(move |j| (i, j)))
        .collect();
    let transitions = pairs
        .par_iter()
        .map(|&(i, j)| {
            let (a, b) = (&samples[i], &samples[j]);
            let numeric = a.transition_integral(b)?;
            Ok(TransitionSummary {
                from: a.n,
                to: b.n,
                numeric,
                analytic: analytic_transition_dipole(a.n, b.n, alpha)?,
                allowed: a.n.abs_diff(b.n) == 1,
            })
        })
        .collect::<Result<Vec<_>, EvaluationError>>()?;
    debug!(count = transitions.len(), "Computed transition integrals.");

    let springs = config.springs;
    let normal_modes = solve_normal_modes(springs.k1, springs.k2, springs.k3)?;
    let frequencies = normal_modes.frequencies(config.mode_mass)?;
    let modes = normal_modes
        .eigenvalues
        .iter()
        .zip(&normal_modes.eigenvectors)
        .zip(frequencies)
        .map(|((&eigenvalue, eigenvector), frequency)| ModeSummary {
            eigenvalue,
            frequency,
            eigenvector: eigenvector.clone(),
        })
        .collect();
    info!("Vibrational analysis complete.");

    Ok(VibrationalReport {
        alpha,
        grid_points: grid.len(),
        levels,
        transitions,
        modes,
        samples,
    })
}
