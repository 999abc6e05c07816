//! Side-effecting collaborators used by the workflow loader.

pub mod config;
pub mod data;
pub mod resolver;
pub mod schema;
