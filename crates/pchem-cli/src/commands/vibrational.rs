use super::write_toml_report;
use crate::cli::VibrationalArgs;
use crate::config::builder::build_config;
use crate::error::Result;
use pchem::core::io::samples::SampleTable;
use pchem::engine::error::EngineError;
use pchem::workflows;
use tracing::info;

pub fn run(args: VibrationalArgs) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let app_config = build_config(&args)?;

    println!(
        "Sampling oscillator levels 0..={}...",
        app_config.core_config.max_level
    );
    let report = workflows::vibrational::run(&app_config.core_config)?;

    println!(
        "alpha = {:.6}, {} grid points",
        report.alpha, report.grid_points
    );
    println!("{:>4} {:>14} {:>14}", "n", "energy", "<n|n>");
    for level in &report.levels {
        println!("{:>4} {:>14.6} {:>14.8}", level.n, level.energy, level.norm);
    }

    println!();
    println!(
        "{:>4} {:>4} {:>14} {:>14}  {}",
        "i", "j", "<i|x|j>", "analytic", "selection rule"
    );
    for t in &report.transitions {
        println!(
            "{:>4} {:>4} {:>14.8} {:>14.8}  {}",
            t.from,
            t.to,
            t.numeric,
            t.analytic,
            if t.allowed { "allowed" } else { "forbidden" }
        );
    }
    let observed: Vec<String> = report
        .observed_transitions()
        .map(|t| format!("{}<->{}", t.from, t.to))
        .collect();
    println!("Observed transitions: {}", observed.join(", "));

    println!();
    println!("{:>14} {:>14}  {}", "eigenvalue", "frequency", "eigenvector");
    for mode in &report.modes {
        println!(
            "{:>14.8} {:>14.8}  {:?}",
            mode.eigenvalue, mode.frequency, mode.eigenvector
        );
    }

    if let Some(path) = &app_config.report_path {
        write_toml_report(path, &report)?;
        println!("Report written to: {}", path.display());
    }

    if let Some(path) = &app_config.samples_path {
        let table = SampleTable::from_wavefunctions(&report.samples).map_err(EngineError::from)?;
        table.write_to_path(path).map_err(EngineError::from)?;
        info!(columns = report.samples.len(), "Sample table written to {:?}", path);
        println!("Samples written to: {}", path.display());
    }

    Ok(())
}
