//! Periodic crystal porosity analysis.
//!
//! Estimates geometric properties of a periodic structure — void fraction,
//! accessible pore volume and pairwise atomic-overlap volume — by
//! Monte-Carlo sampling over a sphere model of the atoms, with correct
//! minimum-image distances in arbitrary (triclinic) cells.

pub mod geometry;
pub mod io;
pub mod model;
pub mod physics;
pub mod utils;

pub use crate::geometry::cell::{GeometryError, PeriodicCell};
pub use crate::geometry::spheres::{Sphere, SphereSet, SphereSetError};
pub use crate::model::elements::{ElementTable, UnknownElementError};
pub use crate::model::structure::{Atom, Structure};
pub use crate::physics::analysis::overlap::{total_overlap, OverlapError};
pub use crate::physics::analysis::porosity::{
    estimate, estimate_seeded, PorosityError, SamplingResult, PRESET_PROBES,
};
pub use crate::physics::bonding::{BondingPolicy, CovalentBondPolicy};
