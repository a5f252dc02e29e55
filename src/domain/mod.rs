//! Domain layer: core types and validation policy

pub mod model;
pub mod rules;
