//! Core domain types for lists, tasks, seed state and routes.

pub mod list;
pub mod route;
pub mod state;
pub mod task;
