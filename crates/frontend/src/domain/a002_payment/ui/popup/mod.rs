pub mod model;
pub mod page;
pub mod view_model;

pub use page::PaymentPopup;
