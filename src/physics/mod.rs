pub mod analysis;
pub mod bonding;
