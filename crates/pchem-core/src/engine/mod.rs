//! # Engine Module
//!
//! Configuration and error plumbing shared by the workflows.
//!
//! - **Configuration** ([`config`]) - Builder-validated parameters for the vibrational workflow
//! - **Error Handling** ([`error`]) - [`error::EngineError`], wrapping every core failure

pub mod config;
pub mod error;
