pub mod elements;
pub mod structure;
