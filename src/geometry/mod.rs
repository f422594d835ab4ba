pub mod cell;
pub mod spheres;
