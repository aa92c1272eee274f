//! Formatters

pub mod json;

pub use json::json;
