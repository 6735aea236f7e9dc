pub mod mechanism;
pub mod modes;
pub mod particle;
pub mod vibrational;

use crate::error::Result;
use serde::Serialize;
use std::path::Path;
use tracing::info;

fn write_toml_report<T: Serialize>(path: &Path, report: &T) -> Result<()> {
    let text = toml::to_string(report)?;
    std::fs::write(path, text)?;
    info!("Report written to {:?}", path);
    Ok(())
}
