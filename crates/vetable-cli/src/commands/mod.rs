//! Command implementations.

pub mod cases;
pub mod profile;
