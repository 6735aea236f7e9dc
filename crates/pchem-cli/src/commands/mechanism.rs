use super::write_toml_report;
use crate::cli::MechanismArgs;
use crate::error::Result;
use pchem::workflows;
use pchem::workflows::mechanism::MechanismReport;
use serde::Serialize;
use tracing::{info, warn};

#[derive(Serialize)]
struct MechanismReports<'a> {
    mechanisms: &'a [MechanismReport],
}

pub fn run(args: MechanismArgs) -> Result<()> {
    let mut reports = Vec::with_capacity(args.files.len());

    for path in &args.files {
        info!("Analyzing mechanism file {:?}", path);
        let report = workflows::mechanism::run_from_path(path)?;

        let title = report
            .name
            .clone()
            .unwrap_or_else(|| path.display().to_string());
        println!("== {} ==", title);
        for step in &report.steps {
            println!(
                "  step {}: {} [{}{}]",
                step.label,
                step.reaction,
                step.treatment,
                step.molecularity
                    .as_deref()
                    .map(|m| format!(", {}", m))
                    .unwrap_or_default()
            );
        }
        println!("  overall:   {}", report.overall);
        println!(
            "  summed:    {} ({})",
            report.summed,
            if report.matches_overall { "matches" } else { "differs" }
        );
        if !report.intermediates.is_empty() {
            println!("  intermediates: {}", report.intermediates.join(", "));
        }
        println!("  observed rate:  {}", report.observed_rate_law);
        match &report.derived_rate_law {
            Some(law) => println!("  derived rate:   {}", law),
            None => println!("  derived rate:   (not derivable)"),
        }
        for issue in &report.issues {
            println!("  - {}", issue);
        }

        if report.valid {
            println!("  verdict: consistent");
        } else {
            warn!("Mechanism {:?} is not consistent with the observations.", title);
            println!("  verdict: rejected");
        }
        reports.push(report);
    }

    if let Some(path) = &args.output {
        write_toml_report(path, &MechanismReports { mechanisms: &reports })?;
        println!("Report written to: {}", path.display());
    }

    let accepted = reports.iter().filter(|r| r.valid).count();
    println!("{} of {} mechanism(s) consistent.", accepted, reports.len());
    Ok(())
}
