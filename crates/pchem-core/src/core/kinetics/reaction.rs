use super::MechanismError;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Species name to stoichiometric coefficient.
pub type Stoichiometry = BTreeMap<String, u32>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrow {
    Forward,
    Reversible,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Reaction {
    pub reactants: Stoichiometry,
    pub products: Stoichiometry,
}

impl Reaction {
    pub fn new(reactants: Stoichiometry, products: Stoichiometry) -> Self {
        Self {
            reactants,
            products,
        }
    }

    /// Parses `"2NO + O2 -> 2NO2"` and also reports which arrow was used.
    pub fn parse_with_arrow(text: &str) -> Result<(Self, Arrow), MechanismError> {
        let (lhs, rhs, arrow) = if let Some((l, r)) = text.split_once("<=>") {
            (l, r, Arrow::Reversible)
        } else if let Some((l, r)) = text.split_once("->") {
            (l, r, Arrow::Forward)
        } else if let Some((l, r)) = text.split_once("=>") {
            (l, r, Arrow::Forward)
        } else {
            return Err(parse_error(text, "missing '->', '=>' or '<=>'"));
        };
        if [lhs, rhs].iter().any(|side| side.contains("->") || side.contains("=>")) {
            return Err(parse_error(text, "more than one arrow"));
        }

        let reactants = parse_side(text, lhs)?;
        let products = parse_side(text, rhs)?;
        Ok((Self::new(reactants, products), arrow))
    }

    /// Sum of reactant coefficients.
    pub fn reactant_count(&self) -> u32 {
        self.reactants.values().sum()
    }

    /// Adds `other` to this reaction side by side without cancelling.
    pub fn accumulate(&mut self, other: &Reaction) {
        for (species, &count) in &other.reactants {
            *self.reactants.entry(species.clone()).or_insert(0) += count;
        }
        for (species, &count) in &other.products {
            *self.products.entry(species.clone()).or_insert(0) += count;
        }
    }

    /// Removes species that appear on both sides by the smaller of the two counts.
    pub fn cancelled(&self) -> Reaction {
        let mut reactants = self.reactants.clone();
        let mut products = self.products.clone();
        for (species, r_count) in self.reactants.iter() {
            if let Some(&p_count) = self.products.get(species) {
                let common = (*r_count).min(p_count);
                subtract(&mut reactants, species, common);
                subtract(&mut products, species, common);
            }
        }
        Reaction::new(reactants, products)
    }

    /// Net change per species (products minus reactants), zeros omitted.
    pub fn net_change(&self) -> BTreeMap<String, i64> {
        let mut change: BTreeMap<String, i64> = BTreeMap::new();
        for (species, &count) in &self.reactants {
            *change.entry(species.clone()).or_insert(0) -= i64::from(count);
        }
        for (species, &count) in &self.products {
            *change.entry(species.clone()).or_insert(0) += i64::from(count);
        }
        change.retain(|_, v| *v != 0);
        change
    }

    /// Whether both reactions describe the same net transformation.
    pub fn is_equivalent_to(&self, other: &Reaction) -> bool {
        self.net_change() == other.net_change()
    }
}

impl FromStr for Reaction {
    type Err = MechanismError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with_arrow(s).map(|(reaction, _)| reaction)
    }
}

impl fmt::Display for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {}",
            format_side(&self.reactants),
            format_side(&self.products)
        )
    }
}

pub(crate) fn format_side(side: &Stoichiometry) -> String {
    side.iter()
        .filter(|(_, count)| **count > 0)
        .map(|(species, &count)| {
            if count == 1 {
                species.clone()
            } else {
                format!("{}{}", count, species)
            }
        })
        .collect::<Vec<_>>()
        .join(" + ")
}

fn subtract(side: &mut Stoichiometry, species: &str, amount: u32) {
    if let Some(count) = side.get_mut(species) {
        *count -= amount;
        if *count == 0 {
            side.remove(species);
        }
    }
}

fn parse_side(text: &str, side: &str) -> Result<Stoichiometry, MechanismError> {
    let mut stoichiometry = Stoichiometry::new();
    for term in side.split('+') {
        let term = term.trim();
        if term.is_empty() {
            return Err(parse_error(text, "empty term"));
        }
        let digits = term.chars().take_while(|c| c.is_ascii_digit()).count();
        let (coefficient, species) = term.split_at(digits);
        let species = species.trim();
        if species.is_empty() {
            return Err(parse_error(text, &format!("term '{}' has no species", term)));
        }
        let coefficient = if coefficient.is_empty() {
            1
        } else {
            coefficient
                .parse::<u32>()
                .map_err(|e| parse_error(text, &format!("bad coefficient in '{}': {}", term, e)))?
        };
        if coefficient == 0 {
            return Err(parse_error(text, &format!("zero coefficient in '{}'", term)));
        }
        *stoichiometry.entry(species.to_string()).or_insert(0) += coefficient;
    }
    Ok(stoichiometry)
}

fn parse_error(text: &str, reason: &str) -> MechanismError {
    MechanismError::Parse {
        input: text.to_string(),
        reason: reason.to_string(),
    }
}
