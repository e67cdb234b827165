//! Bridge between the UI thread and the backend fetch worker.

pub mod commands;
pub mod runtime;
