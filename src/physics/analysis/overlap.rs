// src/physics/analysis/overlap.rs
//
// Total pairwise overlap volume of bonded atom spheres.
//
// Known limitation: summing per-pair lens volumes over-counts regions where
// three or more spheres mutually intersect, so this approximates the union
// overlap from above. Left uncorrected.

use crate::geometry::cell::PeriodicCell;
use crate::geometry::spheres::SphereSet;
use crate::physics::bonding::BondingPolicy;
use std::fmt;

#[derive(Debug, Clone)]
pub enum OverlapError {
    MismatchedLengths { symbols: usize, spheres: usize },
}

impl fmt::Display for OverlapError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OverlapError::MismatchedLengths { symbols, spheres } => write!(
                f,
                "Mismatched input lengths: {} symbols vs {} spheres",
                symbols, spheres
            ),
        }
    }
}

impl std::error::Error for OverlapError {}

/// Sum of two-sphere overlap volumes (Å³) over all bonded pairs.
///
/// Every unordered pair (i, j) with i < j is evaluated exactly once; pairs
/// whose minimum-image separation fails the bonding policy contribute
/// nothing, regardless of vdW overlap.
pub fn total_overlap(
    spheres: &SphereSet,
    symbols: &[String],
    cell: &PeriodicCell,
    policy: &dyn BondingPolicy,
) -> Result<f64, OverlapError> {
    if symbols.len() != spheres.len() {
        return Err(OverlapError::MismatchedLengths {
            symbols: symbols.len(),
            spheres: spheres.len(),
        });
    }

    let n = spheres.len();
    let mut total = 0.0;
    for i in 0..n {
        for j in (i + 1)..n {
            let d = cell.minimum_image_distance(spheres.sphere(i).center, spheres.sphere(j).center);
            if policy.are_bound(&symbols[i], &symbols[j], d) {
                total += spheres.pair_overlap(i, j, cell);
            }
        }
    }
    Ok(total)
}
