pub mod a001_application;
pub mod a002_payment;
