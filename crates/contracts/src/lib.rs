//! Wire types shared by the admissions frontend and backend.

pub mod domain;
pub mod enums;
pub mod shared;
