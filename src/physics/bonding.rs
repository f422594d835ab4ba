// src/physics/bonding.rs

use crate::model::elements::{ElementTable, UnknownElementError};
use std::collections::HashMap;

/// Decides whether two atoms at a given separation count as bonded.
///
/// A trait seam so analyses can swap the distance criterion (or tests can
/// substitute counting/constant policies).
pub trait BondingPolicy {
    fn are_bound(&self, symbol_a: &str, symbol_b: &str, distance: f64) -> bool;
}

/// Covalent-radius-sum criterion: bonded iff
/// `d <= (r_cov(a) + r_cov(b)) * tolerance`.
///
/// Radii are resolved eagerly for a known symbol set so an unknown element
/// fails at construction, not mid-scan.
pub struct CovalentBondPolicy {
    radii: HashMap<String, f64>,
    tolerance: f64,
}

const DEFAULT_TOLERANCE: f64 = 1.15;

impl CovalentBondPolicy {
    pub fn for_symbols(
        symbols: &[String],
        table: &ElementTable,
    ) -> Result<Self, UnknownElementError> {
        Self::with_tolerance(symbols, table, DEFAULT_TOLERANCE)
    }

    pub fn with_tolerance(
        symbols: &[String],
        table: &ElementTable,
        tolerance: f64,
    ) -> Result<Self, UnknownElementError> {
        // Clamp into the same sane range the bond-display cutoff uses.
        let tolerance = tolerance.clamp(0.1, 2.0);
        let mut radii = HashMap::new();
        for symbol in symbols {
            if !radii.contains_key(symbol) {
                radii.insert(symbol.clone(), table.covalent_radius(symbol)?);
            }
        }
        Ok(Self { radii, tolerance })
    }
}

impl BondingPolicy for CovalentBondPolicy {
    fn are_bound(&self, symbol_a: &str, symbol_b: &str, distance: f64) -> bool {
        let (Some(r1), Some(r2)) = (self.radii.get(symbol_a), self.radii.get(symbol_b)) else {
            return false;
        };
        let max_bond_dist = (r1 + r2) * self.tolerance;
        distance <= max_bond_dist
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_covalent_threshold() {
        let table = ElementTable::standard();
        let policy = CovalentBondPolicy::for_symbols(&symbols(&["C", "O"]), &table).unwrap();

        // C-O covalent sum = 0.77 + 0.73 = 1.50, cutoff = 1.725
        assert!(policy.are_bound("C", "O", 1.43)); // typical C-O bond
        assert!(!policy.are_bound("C", "O", 1.80));
        assert!(policy.are_bound("C", "O", 0.0)); // coincident sites still count
    }

    #[test]
    fn test_unknown_symbol_fails_at_construction() {
        let table = ElementTable::standard();
        let res = CovalentBondPolicy::for_symbols(&symbols(&["C", "Qq"]), &table);
        assert!(res.is_err());
    }

    #[test]
    fn test_symmetric() {
        let table = ElementTable::standard();
        let policy = CovalentBondPolicy::for_symbols(&symbols(&["Si", "O"]), &table).unwrap();
        assert_eq!(
            policy.are_bound("Si", "O", 1.6),
            policy.are_bound("O", "Si", 1.6)
        );
    }
}
