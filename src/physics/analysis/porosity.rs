// src/physics/analysis/porosity.rs
//
// Monte-Carlo void fraction: drop probe spheres at uniform random points in
// the cell and count how many touch an atom.

use crate::geometry::cell::PeriodicCell;
use crate::geometry::spheres::{Sphere, SphereSet};
use nalgebra::Vector3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;
use std::fmt;

// --- 1. PUBLIC CONSTANTS ---

/// Standard molecular probes for accessibility screening.
/// Kinetic radii from gas adsorption experiments.
pub const PRESET_PROBES: &[(&str, f64)] = &[
    ("He", 1.20),        // Helium pycnometry standard
    ("H2", 1.45),        // Hydrogen storage
    ("H2O", 1.32),       // Water accessibility
    ("CO2", 1.65),       // Carbon capture
    ("N2", 1.82),        // BET surface area (77K)
    ("CH4", 1.90),       // Methane storage
    ("Geometric", 0.00), // Pure geometric void (no probe)
];

// Trials handled per worker chunk; small enough for load balancing, large
// enough that RNG setup cost is negligible.
const CHUNK_TRIALS: u64 = 16_384;

// --- 2. ERROR HANDLING ---

#[derive(Debug, Clone)]
pub enum PorosityError {
    InvalidTrialCount(u64),
    InvalidProbeRadius(f64),
}

impl fmt::Display for PorosityError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PorosityError::InvalidTrialCount(n) => {
                write!(f, "Trial count must be positive, got {}", n)
            }
            PorosityError::InvalidProbeRadius(r) => {
                write!(f, "Probe radius must be non-negative and finite, got {}", r)
            }
        }
    }
}

impl std::error::Error for PorosityError {}

// --- 3. RESULTS ---

/// Raw hit/miss counts from one sampling run.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct SamplingResult {
    pub trials: u64,
    pub hits: u64,
    pub probe_radius: f64,
}

impl SamplingResult {
    /// Fraction of the cell volume not touched by the probe, in [0, 1].
    pub fn void_fraction(&self) -> f64 {
        1.0 - self.hits as f64 / self.trials as f64
    }

    /// Probe-accessible pore volume in Å³.
    pub fn accessible_volume(&self, cell: &PeriodicCell) -> f64 {
        self.void_fraction() * cell.volume()
    }

    /// Specific pore volume in cm³/g for a given crystal density (g/cm³).
    pub fn pore_volume_per_gram(&self, density: f64) -> f64 {
        self.void_fraction() / density
    }
}

// --- 4. ESTIMATOR ---

/// Estimate the void fraction of `spheres` in `cell` with a probe of
/// `probe_radius` over `trials` random points.
///
/// Unbiased as trials grows; standard error scales as 1/sqrt(trials). Each
/// call draws fresh entropy, so results are not reproducible between runs;
/// use [`estimate_seeded`] for deterministic output.
pub fn estimate(
    cell: &PeriodicCell,
    spheres: &SphereSet,
    probe_radius: f64,
    trials: u64,
) -> Result<SamplingResult, PorosityError> {
    estimate_seeded(cell, spheres, probe_radius, trials, rand::thread_rng().gen())
}

/// Deterministic variant: per-chunk RNG streams are derived from `seed`, so
/// the result is reproducible and independent of worker count and
/// scheduling order.
pub fn estimate_seeded(
    cell: &PeriodicCell,
    spheres: &SphereSet,
    probe_radius: f64,
    trials: u64,
    seed: u64,
) -> Result<SamplingResult, PorosityError> {
    // --- Validation ---
    if trials == 0 {
        return Err(PorosityError::InvalidTrialCount(trials));
    }
    if probe_radius < 0.0 || !probe_radius.is_finite() {
        return Err(PorosityError::InvalidProbeRadius(probe_radius));
    }

    // --- Parallel fan-out over trial chunks ---
    // Hit counts combine by plain summation, so the reduction is associative
    // and the worker split does not affect the result.
    let n_chunks = trials.div_ceil(CHUNK_TRIALS);

    let hits: u64 = (0..n_chunks)
        .into_par_iter()
        .map(|chunk| {
            let chunk_trials = CHUNK_TRIALS.min(trials - chunk * CHUNK_TRIALS);
            // SplitMix64 step decorrelates the per-chunk seeds.
            let chunk_seed = splitmix64(seed.wrapping_add(chunk));
            let mut rng = SmallRng::seed_from_u64(chunk_seed);

            let mut local_hits = 0u64;
            for _ in 0..chunk_trials {
                // Uniform point in fractional coordinates [0, 1)^3
                let frac = Vector3::new(rng.gen::<f64>(), rng.gen::<f64>(), rng.gen::<f64>());
                let probe = Sphere {
                    center: cell.frac_to_cart(frac),
                    radius: probe_radius,
                };
                if spheres.intersects(&probe) {
                    local_hits += 1;
                }
            }
            local_hits
        })
        .sum();

    Ok(SamplingResult {
        trials,
        hits,
        probe_radius,
    })
}

fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9e37_79b9_7f4a_7c15);
    x = (x ^ (x >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    x ^ (x >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::elements::{ElementData, ElementTable};
    use std::f64::consts::PI;

    fn cubic(edge: f64) -> PeriodicCell {
        PeriodicCell::from_lattice([[edge, 0.0, 0.0], [0.0, edge, 0.0], [0.0, 0.0, edge]])
            .unwrap()
    }

    /// One synthetic atom of the given radius centered in a cube.
    fn single_sphere(edge: f64, radius: f64) -> SphereSet {
        let table = ElementTable::from_entries(&[(
            "X",
            ElementData {
                covalent_radius: radius,
                vdw_radius: radius,
                mass: 1.0,
            },
        )]);
        let half = edge / 2.0;
        SphereSet::new(&["X".to_string()], &[[half, half, half]], &table).unwrap()
    }

    #[test]
    fn test_zero_trials_rejected() {
        let cell = cubic(5.0);
        let spheres = single_sphere(5.0, 1.0);
        let res = estimate(&cell, &spheres, 0.0, 0);
        assert!(matches!(res, Err(PorosityError::InvalidTrialCount(0))));
    }

    #[test]
    fn test_negative_probe_rejected() {
        let cell = cubic(5.0);
        let spheres = single_sphere(5.0, 1.0);
        assert!(matches!(
            estimate(&cell, &spheres, -0.5, 100),
            Err(PorosityError::InvalidProbeRadius(_))
        ));
    }

    #[test]
    fn test_hits_bounded_by_trials() {
        let cell = cubic(4.0);
        let spheres = single_sphere(4.0, 1.9);
        let result = estimate_seeded(&cell, &spheres, 0.0, 5000, 7).unwrap();
        assert_eq!(result.trials, 5000);
        assert!(result.hits <= result.trials);
        let vf = result.void_fraction();
        assert!((0.0..=1.0).contains(&vf));
    }

    #[test]
    fn test_converges_to_analytic_void_fraction() {
        // Sphere r = 2 in a 10 Å cube: occupied fraction (4/3)π·8/1000.
        let cell = cubic(10.0);
        let spheres = single_sphere(10.0, 2.0);
        let expected = 1.0 - 4.0 / 3.0 * PI * 8.0 / 1000.0;

        let trials = 200_000u64;
        let result = estimate_seeded(&cell, &spheres, 0.0, trials, 42).unwrap();
        // ~5 sigma for a Bernoulli fraction at this sample size
        let sigma = (expected * (1.0 - expected) / trials as f64).sqrt();
        assert!(
            (result.void_fraction() - expected).abs() < 5.0 * sigma,
            "vf = {}, expected {}",
            result.void_fraction(),
            expected
        );
    }

    #[test]
    fn test_probe_radius_shrinks_void() {
        let cell = cubic(10.0);
        let spheres = single_sphere(10.0, 2.0);
        let bare = estimate_seeded(&cell, &spheres, 0.0, 50_000, 1).unwrap();
        let probed = estimate_seeded(&cell, &spheres, 1.2, 50_000, 1).unwrap();
        assert!(probed.void_fraction() < bare.void_fraction());
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let cell = cubic(6.0);
        let spheres = single_sphere(6.0, 1.5);
        let a = estimate_seeded(&cell, &spheres, 1.2, 30_000, 99).unwrap();
        let b = estimate_seeded(&cell, &spheres, 1.2, 30_000, 99).unwrap();
        assert_eq!(a.hits, b.hits);
    }

    #[test]
    fn test_derived_quantities() {
        let cell = cubic(10.0);
        let result = SamplingResult {
            trials: 1000,
            hits: 250,
            probe_radius: 0.0,
        };
        assert!((result.void_fraction() - 0.75).abs() < 1e-12);
        assert!((result.accessible_volume(&cell) - 750.0).abs() < 1e-9);
        assert!((result.pore_volume_per_gram(1.5) - 0.5).abs() < 1e-12);
    }
}
