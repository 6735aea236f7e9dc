//! # pchem Core Library
//!
//! Small, pure evaluators for introductory physical chemistry: harmonic-oscillator
//! wavefunctions and their transition integrals, normal modes of coupled springs,
//! the particle in a box, and the bookkeeping behind proposed reaction mechanisms.
//!
//! ## Architectural Philosophy
//!
//! The library keeps the same three-layer split throughout:
//!
//! - **[`core`]: The Foundation.** Stateless models and numerics (`oscillator`,
//!   `normal_modes`, `particle_box`, `kinetics`), quadrature, and file formats.
//!   Every function here is pure; parameters are passed explicitly.
//!
//! - **[`engine`]: Configuration and Errors.** Validated, builder-constructed
//!   configuration and the [`engine::error::EngineError`] that unifies failures
//!   from every `core` module.
//!
//! - **[`workflows`]: The Public API.** End-to-end procedures that combine core
//!   pieces into serializable reports, such as the full vibrational analysis or
//!   the validation of a proposed mechanism.

pub mod core;
pub mod engine;
pub mod workflows;
