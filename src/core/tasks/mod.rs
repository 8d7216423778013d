// src/core/tasks/mod.rs

//! Long-running background tasks of the dispatcher.

pub mod serfer;
