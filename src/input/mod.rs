//! Input loading and boundary validation

pub mod loader;

pub use loader::ProfileLoader;
