pub mod catalog;
pub mod envelope;
