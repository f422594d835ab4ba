// src/model/structure.rs

use crate::model::elements::{ElementTable, UnknownElementError};
use serde::{Deserialize, Serialize};

// amu -> g, Å³ -> cm³
const AMU_TO_G: f64 = 1.660_539_066_60e-24;
const A3_TO_CM3: f64 = 1.0e-24;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Atom {
    pub element: String,
    /// Cartesian position in Å.
    pub position: [f64; 3],
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Structure {
    // Lattice vectors: [a_vec, b_vec, c_vec]
    pub lattice: [[f64; 3]; 3],
    pub atoms: Vec<Atom>,
    // Chemical formula string (e.g. "SiO2")
    #[serde(skip)]
    pub formula: String,
}

impl Structure {
    /// Sum of atomic masses in amu. Fails on the first unknown symbol.
    pub fn total_mass(&self, table: &ElementTable) -> Result<f64, UnknownElementError> {
        let mut total = 0.0;
        for atom in &self.atoms {
            total += table.mass(&atom.element)?;
        }
        Ok(total)
    }

    /// Crystallographic density in g/cm³ given the cell volume in Å³.
    pub fn density(
        &self,
        table: &ElementTable,
        cell_volume: f64,
    ) -> Result<f64, UnknownElementError> {
        let mass_g = self.total_mass(table)? * AMU_TO_G;
        Ok(mass_g / (cell_volume * A3_TO_CM3))
    }
}
