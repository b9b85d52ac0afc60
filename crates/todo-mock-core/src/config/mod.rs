//! Server options and seed-state fixture loading.

pub mod error;
pub mod options;
pub mod parser;
