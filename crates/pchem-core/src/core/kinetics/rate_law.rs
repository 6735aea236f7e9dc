use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

const ORDER_TOLERANCE: f64 = 1e-9;

/// A power-law rate expression `Π constant^p · Π [species]^order`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RateLaw {
    pub constants: BTreeMap<String, f64>,
    pub orders: BTreeMap<String, f64>,
}

impl RateLaw {
    pub fn new(constant: impl Into<String>) -> Self {
        let mut constants = BTreeMap::new();
        constants.insert(constant.into(), 1.0);
        Self {
            constants,
            orders: BTreeMap::new(),
        }
    }

    pub fn with_order(mut self, species: impl Into<String>, order: f64) -> Self {
        self.multiply_species(&species.into(), order);
        self
    }

    pub fn order_of(&self, species: &str) -> f64 {
        self.orders.get(species).copied().unwrap_or(0.0)
    }

    pub fn overall_order(&self) -> f64 {
        self.orders.values().sum()
    }

    pub fn multiply_species(&mut self, species: &str, power: f64) {
        accumulate(&mut self.orders, species, power);
    }

    pub fn multiply_constant(&mut self, constant: &str, power: f64) {
        accumulate(&mut self.constants, constant, power);
    }

    /// Removes `species` and returns the order it carried.
    pub fn take_species(&mut self, species: &str) -> f64 {
        self.orders.remove(species).unwrap_or(0.0)
    }

    /// Same species with the same orders, ignoring constants.
    pub fn has_same_orders(&self, other: &RateLaw) -> bool {
        self.orders
            .keys()
            .chain(other.orders.keys())
            .all(|s| (self.order_of(s) - other.order_of(s)).abs() < ORDER_TOLERANCE)
    }
}

fn accumulate(terms: &mut BTreeMap<String, f64>, key: &str, power: f64) {
    let entry = terms.entry(key.to_string()).or_insert(0.0);
    *entry += power;
    if entry.abs() < ORDER_TOLERANCE {
        terms.remove(key);
    }
}

fn format_power(power: f64) -> String {
    if (power - 1.0).abs() < ORDER_TOLERANCE {
        String::new()
    } else if (power - power.round()).abs() < ORDER_TOLERANCE {
        format!("^{}", power.round() as i64)
    } else {
        format!("^{}", power)
    }
}

impl fmt::Display for RateLaw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut factors: Vec<String> = self
            .constants
            .iter()
            .map(|(name, &p)| format!("{}{}", name, format_power(p)))
            .collect();
        factors.extend(
            self.orders
                .iter()
                .map(|(name, &p)| format!("[{}]{}", name, format_power(p))),
        );
        if factors.is_empty() {
            write!(f, "1")
        } else {
            write!(f, "{}", factors.join(" "))
        }
    }
}
