//! Cascading selection: dependent dropdown chains whose option lists arrive
//! asynchronously, with saved labels or ids reconciled back into ids.
//!
//! `resolver` and everything below it are plain Rust with no browser
//! dependency; `controller` and `source` bind them to Leptos and HTTP.

pub mod controller;
pub mod error;
pub mod id;
pub mod index;
pub mod level;
pub mod probe;
pub mod reconcile;
pub mod record;
pub mod resolver;
pub mod shell;
pub mod source;

pub use controller::CascadeController;
pub use error::{CascadeError, PayloadError};
pub use id::OptionId;
pub use level::{LevelSpec, SavedRef};
pub use probe::EntityKind;
pub use resolver::{CascadeResolver, CascadeSettings, FetchTicket, LoadOutcome, SelectionOutcome};
pub use shell::PayloadBuilder;
pub use source::{HttpOptionSource, OptionSource};
