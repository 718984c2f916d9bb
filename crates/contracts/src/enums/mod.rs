pub mod payment_mode;
pub mod track;

pub use payment_mode::PaymentMode;
pub use track::Track;
