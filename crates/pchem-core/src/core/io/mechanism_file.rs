use super::FileLoadError;
use crate::core::kinetics::MechanismError;
use crate::core::kinetics::mechanism::{ElementaryStep, Mechanism, Treatment};
use crate::core::kinetics::rate_law::RateLaw;
use crate::core::kinetics::reaction::Reaction;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct RateLawSection {
    #[serde(default = "default_observed_constant")]
    pub constant: String,
    pub orders: BTreeMap<String, f64>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct StepSection {
    pub reaction: String,
    pub label: Option<String>,
    pub treatment: Option<String>,
}

/// A proposed mechanism together with the experimental facts it must explain.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct MechanismFile {
    pub name: Option<String>,
    pub overall: String,
    pub rate_law: RateLawSection,
    pub steps: Vec<StepSection>,
}

fn default_observed_constant() -> String {
    "kobs".to_string()
}

impl MechanismFile {
    pub fn load(path: &Path) -> Result<Self, FileLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| FileLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| FileLoadError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }

    pub fn overall_reaction(&self) -> Result<Reaction, MechanismError> {
        self.overall.parse()
    }

    pub fn observed_rate_law(&self) -> RateLaw {
        self.rate_law
            .orders
            .iter()
            .fold(RateLaw::new(self.rate_law.constant.clone()), |law, (s, &o)| {
                law.with_order(s.clone(), o)
            })
    }

    /// Builds the mechanism; unlabelled steps are numbered from 1.
    pub fn mechanism(&self) -> Result<Mechanism, MechanismError> {
        let steps = self
            .steps
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let treatment = match &s.treatment {
                    Some(t) => t.parse::<Treatment>()?,
                    None => Treatment::Unspecified,
                };
                let label = s.label.clone().unwrap_or_else(|| (i + 1).to_string());
                ElementaryStep::parse(label, &s.reaction, treatment)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Mechanism::new(steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    const MECHANISM_ONE: &str = r#"
name = "NO oxidation via NO3"
overall = "2NO + O2 -> 2NO2"

[rate-law]
constant = "kobs"
orders = { NO = 2, O2 = 1 }

[[steps]]
reaction = "NO + O2 <=> NO3"
treatment = "rapid-equilibrium"

[[steps]]
reaction = "NO3 + NO -> 2NO2"
treatment = "slow"
"#;

    #[test]
    fn load_succeeds_with_valid_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mech.toml");
        let mut file = File::create(&path).unwrap();
        write!(file, "{}", MECHANISM_ONE).unwrap();

        let parsed = MechanismFile::load(&path).unwrap();
        assert_eq!(parsed.name.as_deref(), Some("NO oxidation via NO3"));
        assert_eq!(parsed.steps.len(), 2);

        let mechanism = parsed.mechanism().unwrap();
        assert_eq!(mechanism.steps()[0].label, "1");
        assert_eq!(mechanism.steps()[1].treatment, Treatment::RateDetermining);
        assert!(mechanism.steps()[0].reversible);

        let observed = parsed.observed_rate_law();
        assert_eq!(observed.to_string(), "kobs [NO]^2 [O2]");
    }

    #[test]
    fn load_fails_for_missing_file() {
        let dir = tempdir().unwrap();
        let result = MechanismFile::load(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(FileLoadError::Io { .. })));
    }

    #[test]
    fn load_fails_for_unknown_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(
            &path,
            "overall = \"A -> B\"\nsteps = []\nunexpected = 1\n[rate-law]\norders = {}\n",
        )
        .unwrap();
        let result = MechanismFile::load(&path);
        assert!(matches!(result, Err(FileLoadError::Toml { .. })));
    }

    #[test]
    fn mechanism_reports_unknown_treatment() {
        let file: MechanismFile = toml::from_str(
            "overall = \"A -> B\"\n[rate-law]\norders = { A = 1 }\n[[steps]]\nreaction = \"A -> B\"\ntreatment = \"quick\"\n",
        )
        .unwrap();
        assert_eq!(file.rate_law.constant, "kobs");
        assert!(matches!(
            file.mechanism(),
            Err(MechanismError::UnknownTreatment(_))
        ));
    }
}
