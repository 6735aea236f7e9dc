//! # Workflows Module
//!
//! High-level entry points that tie `core` evaluators together and return
//! serializable reports.
//!
//! - **Vibrational Workflow** ([`vibrational`]) - Samples oscillator levels, tabulates
//!   transition integrals against the selection rule, and solves the normal modes.
//! - **Mechanism Workflow** ([`mechanism`]) - Checks a proposed mechanism against the
//!   overall reaction and the observed rate law.

pub mod mechanism;
pub mod vibrational;
