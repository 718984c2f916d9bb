pub mod levels;
pub mod ui;
