pub mod details;
pub mod overview;
