use crate::core::io::mechanism_file::MechanismFile;
use crate::core::kinetics::mechanism::analyze;
use crate::engine::error::EngineError;
use serde::Serialize;
use std::path::Path;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepSummary {
    pub label: String,
    pub reaction: String,
    pub treatment: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub molecularity: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MechanismReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub overall: String,
    pub summed: String,
    pub matches_overall: bool,
    pub intermediates: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub derived_rate_law: Option<String>,
    pub observed_rate_law: String,
    pub matches_rate_law: bool,
    pub valid: bool,
    pub issues: Vec<String>,
    pub steps: Vec<StepSummary>,
}

#[instrument(skip_all, name = "mechanism_workflow")]
pub fn run(file: &MechanismFile) -> Result<MechanismReport, EngineError> {
    let overall = file.overall_reaction()?;
    let observed = file.observed_rate_law();
    let mechanism = file.mechanism()?;
    info!(
        steps = mechanism.steps().len(),
        overall = %overall,
        "Analyzing proposed mechanism."
    );

    let analysis = analyze(&mechanism, &overall, &observed);
    for issue in &analysis.issues {
        warn!("{}", issue);
    }

    let steps = mechanism
        .steps()
        .iter()
        .map(|step| StepSummary {
            label: step.label.clone(),
            reaction: step.to_string(),
            treatment: step.treatment.to_string(),
            molecularity: analysis
                .molecularities
                .get(&step.label)
                .map(|m| m.to_string()),
        })
        .collect();

    Ok(MechanismReport {
        name: file.name.clone(),
        overall: overall.to_string(),
        summed: analysis.summed_reaction.to_string(),
        matches_overall: analysis.matches_overall,
        intermediates: analysis.intermediates.clone(),
        derived_rate_law: analysis.derived_rate_law.as_ref().map(|l| l.to_string()),
        observed_rate_law: observed.to_string(),
        matches_rate_law: analysis.matches_rate_law,
        valid: analysis.is_valid(),
        issues: analysis.issues,
        steps,
    })
}

pub fn run_from_path(path: &Path) -> Result<MechanismReport, EngineError> {
    let file = MechanismFile::load(path)?;
    run(&file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn parse(text: &str) -> MechanismFile {
        toml::from_str(text).unwrap()
    }

    const HEADER: &str = r#"
overall = "2NO + O2 -> 2NO2"
[rate-law]
orders = { NO = 2, O2 = 1 }
"#;

    #[test]
    fn run_accepts_rapid_equilibrium_mechanism() {
        let file = parse(&format!(
            "{}{}",
            HEADER,
            r#"
[[steps]]
reaction = "NO + O2 <=> NO3"
treatment = "rapid-equilibrium"
[[steps]]
reaction = "NO3 + NO -> 2NO2"
treatment = "slow"
"#
        ));
        let report = run(&file).unwrap();
        assert!(report.valid, "{:?}", report.issues);
        assert_eq!(report.intermediates, vec!["NO3".to_string()]);
        assert_eq!(report.derived_rate_law.as_deref(), Some("K1 k2 [NO]^2 [O2]"));
        assert_eq!(report.steps[0].reaction, "NO + O2 <=> NO3");
        assert_eq!(report.steps[1].molecularity.as_deref(), Some("bimolecular"));
    }

    #[test]
    fn run_rejects_mechanism_that_misses_overall_reaction() {
        let file = parse(&format!(
            "{}{}",
            HEADER,
            r#"
[[steps]]
reaction = "2O2 + 2O2 -> 2O3 + 2O"
[[steps]]
reaction = "2NO + 2O -> 2NO2"
"#
        ));
        let report = run(&file).unwrap();
        assert!(!report.valid);
        assert!(!report.matches_overall);
        assert!(report.steps[0].molecularity.is_none());
    }

    #[test]
    fn run_fails_on_unparseable_overall_reaction() {
        let file = parse(
            "overall = \"nonsense\"\n[rate-law]\norders = {}\n[[steps]]\nreaction = \"A -> B\"\n",
        );
        assert!(matches!(run(&file), Err(EngineError::Mechanism { .. })));
    }

    #[test]
    fn run_from_path_reports_missing_file() {
        let dir = tempdir().unwrap();
        let result = run_from_path(&dir.path().join("missing.toml"));
        assert!(matches!(result, Err(EngineError::FileLoad(_))));
    }

    #[test]
    fn report_serializes_to_toml() {
        let file = parse(&format!(
            "{}{}",
            HEADER,
            "[[steps]]\nreaction = \"NO + NO + O2 -> 2NO2\"\n"
        ));
        let report = run(&file).unwrap();
        assert!(report.valid);
        let text = toml::to_string(&report).unwrap();
        assert!(text.contains("valid = true"));
    }
}
