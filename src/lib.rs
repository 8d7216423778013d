// src/lib.rs

pub mod config;
pub mod core;

// Re-export
pub use crate::config::Config;
pub use crate::core::handler::{EventHandler, HandlerSlots, SerfEventHandler};
pub use crate::core::tasks::serfer::Serfer;
