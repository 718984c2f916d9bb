pub mod model;
pub mod page;
pub mod steps;
pub mod view_model;

pub use page::ApplicationDetails;
