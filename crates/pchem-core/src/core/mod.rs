//! # Core Module
//!
//! Stateless numerics and data models. Nothing in this module holds state
//! between calls, so every evaluator is safe to invoke from multiple threads.
//!
//! ## Architecture
//!
//! - **Numerics** ([`math`], [`grid`]) - Simpson quadrature, Hermite polynomials, sampling grids
//! - **Quantum Models** ([`oscillator`], [`particle_box`]) - Closed-form wavefunctions and energies
//! - **Vibrations** ([`normal_modes`]) - Symmetric eigen-decomposition of stiffness matrices
//! - **Kinetics** ([`kinetics`]) - Elementary steps, intermediates, and derived rate laws
//! - **File I/O** ([`io`]) - TOML mechanism descriptions and CSV sample tables
//! - **Errors** ([`error`]) - The evaluation error taxonomy shared by the numeric modules

pub mod error;
pub mod grid;
pub mod io;
pub mod kinetics;
pub mod math;
pub mod normal_modes;
pub mod oscillator;
pub mod particle_box;
