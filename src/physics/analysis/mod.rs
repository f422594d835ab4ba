pub mod overlap;
pub mod porosity;
