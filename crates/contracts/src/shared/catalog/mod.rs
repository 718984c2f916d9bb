//! Catalog records as the list endpoints serve them.
//!
//! Field names differ between entities on purpose: they mirror the payloads of
//! the legacy admissions API, and the frontend resolves labels and ids through
//! probe tables rather than through these structs.

pub mod records;
pub mod seed;

pub use records::*;
pub use seed::CatalogSeed;
