use super::MechanismError;
use super::rate_law::RateLaw;
use super::reaction::{Arrow, Reaction, format_side};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace};

/// How a step is treated when deriving the mechanism's rate law.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Treatment {
    #[default]
    Unspecified,
    RateDetermining,
    RapidEquilibrium,
    SteadyState,
}

impl Treatment {
    fn eliminates_intermediates(self) -> bool {
        matches!(self, Self::RapidEquilibrium | Self::SteadyState)
    }
}

impl FromStr for Treatment {
    type Err = MechanismError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Ok(Self::Unspecified),
            "slow" | "rate-determining" | "rate-limiting" => Ok(Self::RateDetermining),
            "rapid-equilibrium" | "fast-equilibrium" | "pre-equilibrium" => {
                Ok(Self::RapidEquilibrium)
            }
            "steady-state" => Ok(Self::SteadyState),
            other => Err(MechanismError::UnknownTreatment(other.to_string())),
        }
    }
}

impl fmt::Display for Treatment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unspecified => "unspecified",
            Self::RateDetermining => "rate-determining",
            Self::RapidEquilibrium => "rapid-equilibrium",
            Self::SteadyState => "steady-state",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Molecularity {
    Unimolecular,
    Bimolecular,
    Termolecular,
}

impl fmt::Display for Molecularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unimolecular => "unimolecular",
            Self::Bimolecular => "bimolecular",
            Self::Termolecular => "termolecular",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElementaryStep {
    pub label: String,
    pub reaction: Reaction,
    pub reversible: bool,
    pub treatment: Treatment,
}

impl ElementaryStep {
    pub fn parse(
        label: impl Into<String>,
        text: &str,
        treatment: Treatment,
    ) -> Result<Self, MechanismError> {
        let (reaction, arrow) = Reaction::parse_with_arrow(text)?;
        Ok(Self {
            label: label.into(),
            reaction,
            reversible: arrow == Arrow::Reversible,
            treatment,
        })
    }

    pub fn molecularity(&self) -> Result<Molecularity, MechanismError> {
        match self.reaction.reactant_count() {
            1 => Ok(Molecularity::Unimolecular),
            2 => Ok(Molecularity::Bimolecular),
            3 => Ok(Molecularity::Termolecular),
            count => Err(MechanismError::Molecularity {
                label: self.label.clone(),
                count,
            }),
        }
    }

    pub fn rate_constant(&self) -> String {
        format!("k{}", self.label)
    }

    pub fn equilibrium_constant(&self) -> String {
        format!("K{}", self.label)
    }

    /// Forward rate `k · Π[reactant]^coefficient` of an elementary step.
    pub fn rate_law(&self) -> RateLaw {
        let mut law = RateLaw::new(self.rate_constant());
        for (species, &count) in &self.reaction.reactants {
            law.multiply_species(species, f64::from(count));
        }
        law
    }
}

impl fmt::Display for ElementaryStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arrow = if self.reversible { "<=>" } else { "->" };
        write!(
            f,
            "{} {} {}",
            format_side(&self.reaction.reactants),
            arrow,
            format_side(&self.reaction.products)
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mechanism {
    steps: Vec<ElementaryStep>,
}

impl Mechanism {
    pub fn new(steps: Vec<ElementaryStep>) -> Result<Self, MechanismError> {
        if steps.is_empty() {
            return Err(MechanismError::NoSteps);
        }
        Ok(Self { steps })
    }

    pub fn steps(&self) -> &[ElementaryStep] {
        &self.steps
    }

    /// Sum of all steps with species common to both sides cancelled.
    pub fn overall_reaction(&self) -> Reaction {
        self.summed_steps().cancelled()
    }

    /// Species produced and later consumed with no net change.
    ///
    /// A species that is consumed before any step produces it is a catalyst
    /// and stays in the rate law as an ordinary species.
    pub fn intermediates(&self) -> BTreeSet<String> {
        let summed = self.summed_steps();
        let net = summed.net_change();
        summed
            .products
            .keys()
            .filter(|s| summed.reactants.contains_key(*s) && !net.contains_key(*s))
            .filter(|s| !self.is_consumed_first(s))
            .cloned()
            .collect()
    }

    /// Index of the step marked rate-determining, or the last step.
    pub fn rate_determining_step(&self) -> usize {
        self.steps
            .iter()
            .position(|s| s.treatment == Treatment::RateDetermining)
            .unwrap_or(self.steps.len() - 1)
    }

    /// Rate law of the rate-determining step with every intermediate replaced
    /// by its equilibrium expression.
    ///
    /// Steady-state steps are taken in the limit where the reverse rate
    /// dominates, which reduces `[I]` to the same `K · Π[reactants]` form.
    pub fn derive_rate_law(&self) -> Result<RateLaw, MechanismError> {
        let rds = self.rate_determining_step();
        let intermediates = self.intermediates();
        let mut law = self.steps[rds].rate_law();
        debug!(step = %self.steps[rds].label, law = %law, "Starting from rate-determining step.");

        let max_substitutions = self.steps.len() * intermediates.len().max(1) + 1;
        for _ in 0..max_substitutions {
            let Some(species) = law
                .orders
                .keys()
                .find(|s| intermediates.contains(*s))
                .cloned()
            else {
                return Ok(law);
            };
            let (index, step) = self.equilibrium_source(&species, rds)?;
            let power = law.take_species(&species);
            let coefficient = f64::from(step.reaction.products[&species]);
            let scale = power / coefficient;

            law.multiply_constant(&step.equilibrium_constant(), scale);
            for (reactant, &count) in &step.reaction.reactants {
                law.multiply_species(reactant, f64::from(count) * scale);
            }
            for (product, &count) in &step.reaction.products {
                if *product != species {
                    law.multiply_species(product, -f64::from(count) * scale);
                }
            }
            trace!(%species, step = index, law = %law, "Eliminated intermediate.");
        }

        let remaining = law
            .orders
            .keys()
            .find(|s| intermediates.contains(*s))
            .cloned()
            .unwrap_or_default();
        Err(MechanismError::UnresolvedIntermediate {
            species: remaining,
            reason: "substitutions do not terminate".to_string(),
        })
    }

    fn is_consumed_first(&self, species: &str) -> bool {
        self.steps
            .iter()
            .find(|s| {
                s.reaction.reactants.contains_key(species)
                    || s.reaction.products.contains_key(species)
            })
            .is_some_and(|s| s.reaction.reactants.contains_key(species))
    }

    fn summed_steps(&self) -> Reaction {
        let mut total = Reaction::default();
        for step in &self.steps {
            total.accumulate(&step.reaction);
        }
        total
    }

    fn equilibrium_source(
        &self,
        species: &str,
        rds: usize,
    ) -> Result<(usize, &ElementaryStep), MechanismError> {
        self.steps
            .iter()
            .enumerate()
            .find(|(i, s)| {
                *i != rds
                    && s.treatment.eliminates_intermediates()
                    && s.reaction.products.contains_key(species)
            })
            .ok_or_else(|| MechanismError::UnresolvedIntermediate {
                species: species.to_string(),
                reason: "no rapid-equilibrium or steady-state step produces it".to_string(),
            })
    }
}

/// Outcome of checking a mechanism against an overall reaction and an
/// experimentally observed rate law.
#[derive(Debug, Clone, PartialEq)]
pub struct MechanismAnalysis {
    pub summed_reaction: Reaction,
    pub matches_overall: bool,
    pub intermediates: Vec<String>,
    pub molecularities: BTreeMap<String, Molecularity>,
    pub derived_rate_law: Option<RateLaw>,
    pub matches_rate_law: bool,
    pub issues: Vec<String>,
}

impl MechanismAnalysis {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }
}

pub fn analyze(mechanism: &Mechanism, overall: &Reaction, observed: &RateLaw) -> MechanismAnalysis {
    let mut issues = Vec::new();

    let summed_reaction = mechanism.overall_reaction();
    let matches_overall = summed_reaction.is_equivalent_to(overall);
    if !matches_overall {
        issues.push(format!(
            "steps sum to '{}' instead of '{}'",
            summed_reaction, overall
        ));
    }

    let mut molecularities = BTreeMap::new();
    for step in mechanism.steps() {
        match step.molecularity() {
            Ok(m) => {
                molecularities.insert(step.label.clone(), m);
            }
            Err(e) => issues.push(e.to_string()),
        }
    }

    let (derived_rate_law, matches_rate_law) = match mechanism.derive_rate_law() {
        Ok(law) => {
            let matches = law.has_same_orders(observed);
            if !matches {
                issues.push(format!(
                    "derived rate law '{}' disagrees with observed '{}'",
                    law, observed
                ));
            }
            (Some(law), matches)
        }
        Err(e) => {
            issues.push(e.to_string());
            (None, false)
        }
    };

    MechanismAnalysis {
        summed_reaction,
        matches_overall,
        intermediates: mechanism.intermediates().into_iter().collect(),
        molecularities,
        derived_rate_law,
        matches_rate_law,
        issues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    fn step(label: &str, text: &str, treatment: Treatment) -> ElementaryStep {
        ElementaryStep::parse(label, text, treatment).unwrap()
    }

    fn overall() -> Reaction {
        "2NO + O2 -> 2NO2".parse().unwrap()
    }

    fn observed() -> RateLaw {
        RateLaw::new("kobs").with_order("NO", 2.0).with_order("O2", 1.0)
    }

    fn mechanism_one() -> Mechanism {
        Mechanism::new(vec![
            step("1", "NO + O2 <=> NO3", Treatment::RapidEquilibrium),
            step("2", "NO3 + NO -> 2NO2", Treatment::RateDetermining),
        ])
        .unwrap()
    }

    fn mechanism_two() -> Mechanism {
        Mechanism::new(vec![
            step("1", "NO + NO <=> N2O2", Treatment::SteadyState),
            step("2", "N2O2 + O2 -> 2NO2", Treatment::Unspecified),
        ])
        .unwrap()
    }

    fn mechanism_three() -> Mechanism {
        Mechanism::new(vec![
            step("1", "2O2 + 2O2 -> 2O3 + 2O", Treatment::Unspecified),
            step("2", "2NO + 2O -> 2NO2", Treatment::Unspecified),
        ])
        .unwrap()
    }

    fn mechanism_four() -> Mechanism {
        Mechanism::new(vec![
            step("1", "O2 + O2 <=> O4", Treatment::RapidEquilibrium),
            step("2", "NO + NO <=> N2O2", Treatment::RapidEquilibrium),
            step("3", "N2O2 + O4 -> 2NO2 + O2", Treatment::RateDetermining),
        ])
        .unwrap()
    }

    #[test]
    fn treatment_parses_common_spellings() {
        assert_eq!("slow".parse::<Treatment>().unwrap(), Treatment::RateDetermining);
        assert_eq!(
            "Rapid-Equilibrium".parse::<Treatment>().unwrap(),
            Treatment::RapidEquilibrium
        );
        assert_eq!("steady-state".parse::<Treatment>().unwrap(), Treatment::SteadyState);
        assert!(matches!(
            "fastish".parse::<Treatment>(),
            Err(MechanismError::UnknownTreatment(_))
        ));
    }

    #[test]
    fn molecularity_counts_reactant_molecules() {
        let uni = step("a", "A -> P", Treatment::Unspecified);
        let bi = step("b", "A + B -> P", Treatment::Unspecified);
        let ter = step("c", "2A + B -> P", Treatment::Unspecified);
        let quad = step("d", "2O2 + 2O2 -> 2O3 + 2O", Treatment::Unspecified);
        assert_eq!(uni.molecularity().unwrap(), Molecularity::Unimolecular);
        assert_eq!(bi.molecularity().unwrap(), Molecularity::Bimolecular);
        assert_eq!(ter.molecularity().unwrap(), Molecularity::Termolecular);
        assert!(matches!(
            quad.molecularity(),
            Err(MechanismError::Molecularity { count: 4, .. })
        ));
    }

    #[test]
    fn elementary_rate_law_follows_stoichiometry() {
        let law = step("1", "NO + NO -> N2O2", Treatment::Unspecified).rate_law();
        assert_eq!(law.to_string(), "k1 [NO]^2");
    }

    #[test]
    fn step_display_keeps_reversible_arrow() {
        let s = step("1", "NO + O2 <=> NO3", Treatment::RapidEquilibrium);
        assert_eq!(s.to_string(), "NO + O2 <=> NO3");
    }

    #[test]
    fn new_rejects_empty_mechanism() {
        assert!(matches!(Mechanism::new(vec![]), Err(MechanismError::NoSteps)));
    }

    #[test]
    fn mechanism_one_sums_to_overall_and_eliminates_no3() {
        let mechanism = mechanism_one();
        assert!(mechanism.overall_reaction().is_equivalent_to(&overall()));
        assert_eq!(
            mechanism.intermediates().into_iter().collect::<Vec<_>>(),
            vec!["NO3".to_string()]
        );

        let law = mechanism.derive_rate_law().unwrap();
        assert_eq!(law.to_string(), "K1 k2 [NO]^2 [O2]");
        assert!(law.has_same_orders(&observed()));
    }

    #[test]
    fn mechanism_two_steady_state_reduces_to_equilibrium_form() {
        let mechanism = mechanism_two();
        assert_eq!(mechanism.rate_determining_step(), 1);
        let law = mechanism.derive_rate_law().unwrap();
        assert_eq!(law.to_string(), "K1 k2 [NO]^2 [O2]");
        assert!(analyze(&mechanism, &overall(), &observed()).is_valid());
    }

    #[test]
    fn mechanism_three_does_not_sum_to_overall() {
        let analysis = analyze(&mechanism_three(), &overall(), &observed());
        assert!(!analysis.matches_overall);
        assert_eq!(analysis.summed_reaction.to_string(), "2NO + 4O2 -> 2NO2 + 2O3");
        assert!(!analysis.is_valid());
    }

    #[test]
    fn mechanism_four_is_second_order_in_oxygen() {
        let mechanism = mechanism_four();
        let intermediates: Vec<_> = mechanism.intermediates().into_iter().collect();
        assert_eq!(intermediates, vec!["N2O2".to_string(), "O4".to_string()]);

        let analysis = analyze(&mechanism, &overall(), &observed());
        assert!(analysis.matches_overall);
        assert!(!analysis.matches_rate_law);

        let law = analysis.derived_rate_law.unwrap();
        assert!(f64_approx_equal(law.order_of("O2"), 2.0));
        assert!(f64_approx_equal(law.order_of("NO"), 2.0));
        assert_eq!(law.to_string(), "K1 K2 k3 [NO]^2 [O2]^2");
    }

    #[test]
    fn mechanism_one_analysis_is_valid() {
        let analysis = analyze(&mechanism_one(), &overall(), &observed());
        assert!(analysis.is_valid(), "{:?}", analysis.issues);
        assert_eq!(analysis.molecularities["1"], Molecularity::Bimolecular);
    }

    #[test]
    fn intermediate_without_equilibrium_step_is_unresolved() {
        let mechanism = Mechanism::new(vec![
            step("1", "A -> I", Treatment::Unspecified),
            step("2", "I + B -> P", Treatment::RateDetermining),
        ])
        .unwrap();
        assert!(matches!(
            mechanism.derive_rate_law(),
            Err(MechanismError::UnresolvedIntermediate { .. })
        ));
    }

    #[test]
    fn catalyst_is_kept_as_ordinary_species() {
        let mechanism = Mechanism::new(vec![
            step("1", "A + C <=> AC", Treatment::RapidEquilibrium),
            step("2", "AC -> P + C", Treatment::RateDetermining),
        ])
        .unwrap();
        assert_eq!(
            mechanism.intermediates().into_iter().collect::<Vec<_>>(),
            vec!["AC".to_string()]
        );
        assert_eq!(mechanism.overall_reaction().to_string(), "A -> P");

        let law = mechanism.derive_rate_law().unwrap();
        assert_eq!(law.to_string(), "K1 k2 [A] [C]");
    }

    #[test]
    fn substitution_divides_by_intermediate_coefficient() {
        let mechanism = Mechanism::new(vec![
            step("1", "A2 <=> 2A", Treatment::RapidEquilibrium),
            step("2", "A + B -> P", Treatment::RateDetermining),
            step("3", "A + B -> P", Treatment::Unspecified),
        ])
        .unwrap();
        let law = mechanism.derive_rate_law().unwrap();
        assert!(f64_approx_equal(law.order_of("A2"), 0.5));
        assert!(f64_approx_equal(law.order_of("B"), 1.0));
    }
}
