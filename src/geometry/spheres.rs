// src/geometry/spheres.rs

use crate::geometry::cell::PeriodicCell;
use crate::model::elements::{ElementTable, UnknownElementError};
use crate::model::structure::Structure;
use nalgebra::Vector3;
use std::f64::consts::PI;
use std::fmt;

// --- ERROR HANDLING ---

#[derive(Debug, Clone)]
pub enum SphereSetError {
    MismatchedLengths { symbols: usize, positions: usize },
    NegativeRadius { symbol: String, radius: f64 },
    UnknownElement(UnknownElementError),
}

impl fmt::Display for SphereSetError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SphereSetError::MismatchedLengths { symbols, positions } => write!(
                f,
                "Mismatched input lengths: {} symbols vs {} positions",
                symbols, positions
            ),
            SphereSetError::NegativeRadius { symbol, radius } => {
                write!(f, "Negative radius {} for element '{}'", radius, symbol)
            }
            SphereSetError::UnknownElement(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SphereSetError {}

impl From<UnknownElementError> for SphereSetError {
    fn from(e: UnknownElementError) -> Self {
        SphereSetError::UnknownElement(e)
    }
}

// --- SPHERES ---

/// Plain (center, radius) value, both in Å.
#[derive(Clone, Copy, Debug)]
pub struct Sphere {
    pub center: Vector3<f64>,
    pub radius: f64,
}

/// Ordered sphere collection, index-aligned with the originating atoms.
///
/// Radii are resolved from the element table once at construction; the set
/// is read-only afterward.
pub struct SphereSet {
    spheres: Vec<Sphere>,
}

impl SphereSet {
    /// Build from parallel symbol/position sequences (Cartesian Å),
    /// resolving each radius through the vdW table.
    pub fn new(
        symbols: &[String],
        positions: &[[f64; 3]],
        table: &ElementTable,
    ) -> Result<Self, SphereSetError> {
        if symbols.len() != positions.len() {
            return Err(SphereSetError::MismatchedLengths {
                symbols: symbols.len(),
                positions: positions.len(),
            });
        }

        let mut spheres = Vec::with_capacity(symbols.len());
        for (symbol, pos) in symbols.iter().zip(positions) {
            let radius = table.vdw_radius(symbol)?;
            if radius < 0.0 {
                return Err(SphereSetError::NegativeRadius {
                    symbol: symbol.clone(),
                    radius,
                });
            }
            spheres.push(Sphere {
                center: Vector3::from(*pos),
                radius,
            });
        }
        Ok(Self { spheres })
    }

    pub fn from_structure(
        structure: &Structure,
        table: &ElementTable,
    ) -> Result<Self, SphereSetError> {
        let symbols: Vec<String> = structure.atoms.iter().map(|a| a.element.clone()).collect();
        let positions: Vec<[f64; 3]> = structure.atoms.iter().map(|a| a.position).collect();
        Self::new(&symbols, &positions, table)
    }

    pub fn len(&self) -> usize {
        self.spheres.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spheres.is_empty()
    }

    pub fn sphere(&self, i: usize) -> &Sphere {
        &self.spheres[i]
    }

    /// True iff the probe touches any member sphere, short-circuiting on the
    /// first hit. Plain Euclidean distance: probes are generated inside the
    /// primary cell, so no periodic correction is applied here.
    pub fn intersects(&self, probe: &Sphere) -> bool {
        self.spheres.iter().any(|s| {
            let reach = s.radius + probe.radius;
            (s.center - probe.center).norm_squared() <= reach * reach
        })
    }

    /// Geometric overlap volume (Å³) of spheres `i` and `j`, with the center
    /// distance taken as the minimum-image distance in `cell`.
    pub fn pair_overlap(&self, i: usize, j: usize, cell: &PeriodicCell) -> f64 {
        let a = &self.spheres[i];
        let b = &self.spheres[j];
        let d = cell.minimum_image_distance(a.center, b.center);
        lens_volume(d, a.radius, b.radius)
    }
}

/// Two-sphere intersection ("lens") volume for center distance `d`.
///
/// Continuous at both boundary cases: zero as d grows to r1 + r2, and the
/// full small-sphere volume as d shrinks to |r1 - r2|.
pub fn lens_volume(d: f64, r1: f64, r2: f64) -> f64 {
    if d >= r1 + r2 {
        return 0.0;
    }
    if d <= (r1 - r2).abs() {
        let r_min = r1.min(r2);
        return 4.0 / 3.0 * PI * r_min.powi(3);
    }
    // Spherical-cap lens formula
    let num = PI
        * (r1 + r2 - d).powi(2)
        * (d * d + 2.0 * d * r2 - 3.0 * r2 * r2 + 2.0 * d * r1 - 3.0 * r1 * r1 + 6.0 * r1 * r2);
    (num / (12.0 * d)).max(0.0)
}
