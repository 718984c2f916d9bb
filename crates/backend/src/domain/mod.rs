pub mod a001_application;
pub mod catalog;
