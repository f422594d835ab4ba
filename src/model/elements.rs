// src/model/elements.rs

use std::collections::HashMap;
use std::fmt;

/// Lookup failure for a symbol missing from the table.
///
/// A structure containing any unknown element cannot be characterized, so
/// this aborts the whole computation instead of substituting a default.
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownElementError {
    pub symbol: String,
}

impl fmt::Display for UnknownElementError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Unknown element symbol '{}'", self.symbol)
    }
}

impl std::error::Error for UnknownElementError {}

/// Per-element data: covalent radius (Å), van-der-Waals radius (Å), mass (amu).
#[derive(Clone, Copy, Debug)]
pub struct ElementData {
    pub covalent_radius: f64,
    pub vdw_radius: f64,
    pub mass: f64,
}

/// Immutable per-symbol property table.
///
/// Built once (`ElementTable::standard()`) and passed explicitly into sphere
/// set and bonding policy construction, so tests can swap in their own radii
/// via `from_entries`.
pub struct ElementTable {
    entries: HashMap<&'static str, ElementData>,
}

// (symbol, covalent radius, vdW radius, atomic mass)
// Covalent radii after Cordero (2008), vdW radii after Bondi (1964).
const STANDARD_ELEMENTS: &[(&str, f64, f64, f64)] = &[
    // --- Period 1 ---
    ("H", 0.37, 1.20, 1.008),
    ("He", 0.32, 1.40, 4.003),
    // --- Period 2 ---
    ("Li", 1.34, 1.82, 6.941),
    ("Be", 0.90, 1.53, 9.012),
    ("B", 0.82, 1.92, 10.811),
    ("C", 0.77, 1.70, 12.011),
    ("N", 0.75, 1.55, 14.007),
    ("O", 0.73, 1.52, 15.999),
    ("F", 0.71, 1.47, 18.998),
    ("Ne", 0.69, 1.54, 20.180),
    // --- Period 3 ---
    ("Na", 1.54, 2.27, 22.990),
    ("Mg", 1.30, 1.73, 24.305),
    ("Al", 1.18, 1.84, 26.982),
    ("Si", 1.11, 2.10, 28.086),
    ("P", 1.06, 1.80, 30.974),
    ("S", 1.02, 1.80, 32.065),
    ("Cl", 0.99, 1.75, 35.453),
    ("Ar", 0.97, 1.88, 39.948),
    // --- Period 4 ---
    ("K", 1.96, 2.75, 39.098),
    ("Ca", 1.74, 2.31, 40.078),
    ("Sc", 1.44, 2.15, 44.956),
    ("Ti", 1.36, 2.11, 47.867),
    ("V", 1.25, 2.07, 50.942),
    ("Cr", 1.27, 2.06, 51.996),
    ("Mn", 1.39, 2.05, 54.938),
    ("Fe", 1.25, 2.04, 55.845),
    ("Co", 1.26, 2.00, 58.933),
    ("Ni", 1.21, 1.97, 58.693),
    ("Cu", 1.38, 1.96, 63.546),
    ("Zn", 1.31, 2.01, 65.380),
    ("Ga", 1.26, 1.87, 69.723),
    ("Ge", 1.22, 2.11, 72.640),
    ("As", 1.19, 1.85, 74.922),
    ("Se", 1.16, 1.90, 78.960),
    ("Br", 1.14, 1.85, 79.904),
    ("Kr", 1.10, 2.02, 83.798),
    // --- Period 5 (selected) ---
    ("Zr", 1.48, 2.23, 91.224),
    ("Mo", 1.45, 2.17, 95.960),
    ("Ag", 1.53, 1.72, 107.868),
    ("Cd", 1.48, 1.58, 112.411),
    ("Sn", 1.41, 2.17, 118.710),
    ("I", 1.33, 1.98, 126.904),
    // --- Period 6 (selected) ---
    ("Pt", 1.28, 1.75, 195.084),
    ("Au", 1.44, 1.66, 196.967),
    ("Pb", 1.47, 2.02, 207.200),
];

impl ElementTable {
    /// The built-in table: periods 1-4 plus common heavy elements.
    pub fn standard() -> Self {
        let entries = STANDARD_ELEMENTS
            .iter()
            .map(|&(sym, cov, vdw, mass)| {
                (
                    sym,
                    ElementData {
                        covalent_radius: cov,
                        vdw_radius: vdw,
                        mass,
                    },
                )
            })
            .collect();
        Self { entries }
    }

    /// Custom table, mainly for tests with synthetic radii.
    pub fn from_entries(entries: &[(&'static str, ElementData)]) -> Self {
        Self {
            entries: entries.iter().copied().collect(),
        }
    }

    fn get(&self, symbol: &str) -> Result<&ElementData, UnknownElementError> {
        self.entries.get(symbol).ok_or_else(|| UnknownElementError {
            symbol: symbol.to_string(),
        })
    }

    /// Covalent radius in Å (bond detection).
    pub fn covalent_radius(&self, symbol: &str) -> Result<f64, UnknownElementError> {
        Ok(self.get(symbol)?.covalent_radius)
    }

    /// Van-der-Waals radius in Å (void and overlap volumes).
    pub fn vdw_radius(&self, symbol: &str) -> Result<f64, UnknownElementError> {
        Ok(self.get(symbol)?.vdw_radius)
    }

    /// Atomic mass in amu (density).
    pub fn mass(&self, symbol: &str) -> Result<f64, UnknownElementError> {
        Ok(self.get(symbol)?.mass)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_symbols() {
        let table = ElementTable::standard();
        assert!((table.covalent_radius("C").unwrap() - 0.77).abs() < 1e-12);
        assert!((table.vdw_radius("O").unwrap() - 1.52).abs() < 1e-12);
        assert!((table.mass("Zn").unwrap() - 65.380).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_symbol_errors() {
        let table = ElementTable::standard();
        let err = table.vdw_radius("Xx").unwrap_err();
        assert_eq!(err.symbol, "Xx");
        assert!(table.mass("").is_err());
    }

    #[test]
    fn test_custom_table() {
        let table = ElementTable::from_entries(&[(
            "Q",
            ElementData {
                covalent_radius: 1.0,
                vdw_radius: 2.0,
                mass: 10.0,
            },
        )]);
        assert!((table.vdw_radius("Q").unwrap() - 2.0).abs() < 1e-12);
        assert!(table.vdw_radius("C").is_err());
    }
}
