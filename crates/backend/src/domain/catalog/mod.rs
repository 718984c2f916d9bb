pub mod service;

pub use service::{Catalog, CatalogError};
