use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::AppConfig;
use crate::cli::VibrationalArgs;
use crate::error::{CliError, Result};
use crate::utils::parser;
use pchem::core::oscillator::OscillatorParams;
use pchem::engine::config::{GridSpec, SpringConstants, VibrationalConfigBuilder};
use pchem::engine::error::EngineError;
use std::str::FromStr;

pub fn build_config(args: &VibrationalArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let osc_file = file_config.oscillator.take().unwrap_or_default();
    let oscillator = OscillatorParams::new(
        osc_file.hbar.unwrap_or(defaults.hbar),
        args.force_constant
            .or(osc_file.force_constant)
            .unwrap_or(defaults.force_constant),
        args.mass.or(osc_file.mass).unwrap_or(defaults.mass),
    )
    .map_err(EngineError::from)?;
    let max_level = args
        .max_level
        .or(osc_file.max_level)
        .unwrap_or(defaults.max_level);

    let grid_file = file_config.grid.take().unwrap_or_default();
    let grid = GridSpec {
        start: grid_file.start.unwrap_or(defaults.grid_start),
        stop: grid_file.stop.unwrap_or(defaults.grid_stop),
        step: grid_file.step.unwrap_or(defaults.grid_step),
    };

    let springs_file = file_config.springs.take().unwrap_or_default();
    let springs = SpringConstants {
        k1: springs_file.k1.unwrap_or(defaults.k1),
        k2: springs_file.k2.unwrap_or(defaults.k2),
        k3: springs_file.k3.unwrap_or(defaults.k3),
    };
    let mode_mass = springs_file.mass.unwrap_or(defaults.mode_mass);

    let core_config = VibrationalConfigBuilder::new()
        .oscillator(oscillator)
        .grid(grid)
        .max_level(max_level)
        .springs(springs)
        .mode_mass(mode_mass)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        core_config,
        report_path: args.output.clone(),
        samples_path: args.samples.clone(),
    })
}

fn parse_number<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value.parse().map_err(|_| {
        CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value))
    })
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let set = parser::parse_set_value(kv_pair).map_err(|e| CliError::Argument(e.to_string()))?;
        let key = set.path();
        let float = || parse_number::<f64>(&key, set.value, "float");

        match (set.section, set.key) {
            ("oscillator", "hbar") => {
                config.oscillator.get_or_insert_with(Default::default).hbar = Some(float()?);
            }
            ("oscillator", "force-constant") => {
                config
                    .oscillator
                    .get_or_insert_with(Default::default)
                    .force_constant = Some(float()?);
            }
            ("oscillator", "mass") => {
                config.oscillator.get_or_insert_with(Default::default).mass = Some(float()?);
            }
            ("oscillator", "max-level") => {
                config.oscillator.get_or_insert_with(Default::default).max_level =
                    Some(parse_number(&key, set.value, "integer")?);
            }
            ("grid", "start") => {
                config.grid.get_or_insert_with(Default::default).start = Some(float()?);
            }
            ("grid", "stop") => {
                config.grid.get_or_insert_with(Default::default).stop = Some(float()?);
            }
            ("grid", "step") => {
                config.grid.get_or_insert_with(Default::default).step = Some(float()?);
            }
            ("springs", "k1") => {
                config.springs.get_or_insert_with(Default::default).k1 = Some(float()?);
            }
            ("springs", "k2") => {
                config.springs.get_or_insert_with(Default::default).k2 = Some(float()?);
            }
            ("springs", "k3") => {
                config.springs.get_or_insert_with(Default::default).k3 = Some(float()?);
            }
            ("springs", "mass") => {
                config.springs.get_or_insert_with(Default::default).mass = Some(float()?);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}
