//! Bridge between the UI thread and the async API worker.

pub mod commands;
pub mod runtime;
