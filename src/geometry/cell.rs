// src/geometry/cell.rs

use nalgebra::{Matrix3, Vector3};
use std::fmt;

// --- ERROR HANDLING ---

#[derive(Debug, Clone)]
pub enum GeometryError {
    /// Lattice with zero or non-finite volume.
    DegenerateCell(f64),
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GeometryError::DegenerateCell(v) => {
                write!(f, "Degenerate lattice: cell volume {} is not usable", v)
            }
        }
    }
}

impl std::error::Error for GeometryError {}

// --- PERIODIC CELL ---

/// Immutable periodic unit cell.
///
/// Holds the lattice as a basis matrix whose *columns* are the lattice
/// vectors a, b, c, so `basis * frac` maps fractional to Cartesian
/// coordinates (both in Å). The inverse is cached at construction.
#[derive(Clone, Debug)]
pub struct PeriodicCell {
    basis: Matrix3<f64>,
    inv_basis: Matrix3<f64>,
    volume: f64,
}

impl PeriodicCell {
    /// Build from lattice vectors given as rows `[a_vec, b_vec, c_vec]`
    /// (the structure-file convention).
    pub fn from_lattice(lattice: [[f64; 3]; 3]) -> Result<Self, GeometryError> {
        let lat = lattice;
        // Columns = lattice vectors, so row 1 = [ax, bx, cx] etc.
        let basis = Matrix3::new(
            lat[0][0], lat[1][0], lat[2][0], //
            lat[0][1], lat[1][1], lat[2][1], //
            lat[0][2], lat[1][2], lat[2][2],
        );

        // Scalar triple product a · (b × c); sign depends on handedness.
        let det = basis.determinant();
        if !det.is_finite() || det == 0.0 {
            return Err(GeometryError::DegenerateCell(det));
        }

        let inv_basis = basis
            .try_inverse()
            .ok_or(GeometryError::DegenerateCell(det))?;

        Ok(Self {
            basis,
            inv_basis,
            volume: det.abs(),
        })
    }

    /// Cell volume in Å³, always positive for a constructed cell.
    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Fractional -> Cartesian (Å).
    pub fn frac_to_cart(&self, frac: Vector3<f64>) -> Vector3<f64> {
        self.basis * frac
    }

    /// Cartesian (Å) -> fractional.
    pub fn cart_to_frac(&self, cart: Vector3<f64>) -> Vector3<f64> {
        self.inv_basis * cart
    }

    /// True minimum-image distance between two Cartesian points (Å).
    ///
    /// The fractional displacement is wrapped to the nearest image per axis
    /// and then checked against all 27 neighbor translations in {-1,0,1}³.
    /// The plain round-to-nearest wrap alone is exact only for orthogonal
    /// cells; for skewed cells a neighboring image can be closer.
    pub fn minimum_image_distance(&self, p: Vector3<f64>, q: Vector3<f64>) -> f64 {
        let mut df = self.inv_basis * (q - p);
        df.x -= df.x.round();
        df.y -= df.y.round();
        df.z -= df.z.round();

        let mut min_sq = f64::MAX;
        for di in -1i32..=1 {
            for dj in -1i32..=1 {
                for dk in -1i32..=1 {
                    let shifted =
                        Vector3::new(df.x + di as f64, df.y + dj as f64, df.z + dk as f64);
                    let d_cart = self.basis * shifted;
                    let d_sq = d_cart.norm_squared();
                    if d_sq < min_sq {
                        min_sq = d_sq;
                    }
                }
            }
        }
        min_sq.sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cubic(edge: f64) -> PeriodicCell {
        PeriodicCell::from_lattice([[edge, 0.0, 0.0], [0.0, edge, 0.0], [0.0, 0.0, edge]])
            .unwrap()
    }

    #[test]
    fn test_volume_cubic() {
        let cell = cubic(5.0);
        assert!((cell.volume() - 125.0).abs() < 1e-10);
    }

    #[test]
    fn test_volume_row_permutation() {
        // Swapping two lattice rows flips the determinant sign only.
        let v1 = PeriodicCell::from_lattice([[4.0, 0.0, 0.0], [2.0, 3.46, 0.0], [0.5, 0.3, 5.0]])
            .unwrap()
            .volume();
        let v2 = PeriodicCell::from_lattice([[2.0, 3.46, 0.0], [4.0, 0.0, 0.0], [0.5, 0.3, 5.0]])
            .unwrap()
            .volume();
        assert!(v1 > 0.0);
        assert!((v1 - v2).abs() < 1e-10);
    }

    #[test]
    fn test_degenerate_cell_rejected() {
        // Coplanar lattice vectors
        let res =
            PeriodicCell::from_lattice([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0]]);
        assert!(res.is_err());

        let res = PeriodicCell::from_lattice([
            [f64::NAN, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn test_same_point_zero_distance() {
        let cell = cubic(3.0);
        let p = Vector3::new(1.7, 0.2, 2.9);
        assert!(cell.minimum_image_distance(p, p).abs() < 1e-12);
    }

    #[test]
    fn test_unit_cube_wrapping() {
        let cell = cubic(1.0);
        let d = cell.minimum_image_distance(Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.8, 0.0, 0.0));
        assert!((d - 0.2).abs() < 1e-10);

        // Exact tie between two equivalent images
        let d = cell.minimum_image_distance(Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.5, 0.0, 0.0));
        assert!((d - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_frac_cart_roundtrip() {
        let cell =
            PeriodicCell::from_lattice([[4.0, 0.0, 0.0], [2.0, 3.46, 0.0], [0.0, 0.0, 5.0]])
                .unwrap();
        let frac = Vector3::new(0.333, 0.667, 0.25);
        let back = cell.cart_to_frac(cell.frac_to_cart(frac));
        assert!((back - frac).norm() < 1e-10);
    }

    #[test]
    fn test_skewed_cell_beats_naive_wrap() {
        // Strongly sheared cell where round-to-nearest wrapping picks a
        // longer image than the (1,-1,0) neighbor.
        let cell =
            PeriodicCell::from_lattice([[10.0, 0.0, 0.0], [9.0, 1.0, 0.0], [0.0, 0.0, 10.0]])
                .unwrap();
        let p = Vector3::new(0.0, 0.0, 0.0);
        let q = cell.frac_to_cart(Vector3::new(0.45, 0.45, 0.0));

        let d = cell.minimum_image_distance(p, q);

        // Round-to-nearest wrapping leaves this displacement untouched
        // (all components < 0.5), yet the (0,-1,0) image is far closer.
        let naive = q.norm();
        assert!(d < naive - 1e-6, "image search d={} naive={}", d, naive);

        // Brute force over a wider image range agrees.
        let mut brute = f64::MAX;
        for di in -2i32..=2 {
            for dj in -2i32..=2 {
                for dk in -2i32..=2 {
                    let img = cell.frac_to_cart(Vector3::new(
                        0.45 + di as f64,
                        0.45 + dj as f64,
                        dk as f64,
                    ));
                    brute = brute.min(img.norm());
                }
            }
        }
        assert!((d - brute).abs() < 1e-10);
    }
}
