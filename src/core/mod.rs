// src/core/mod.rs

//! The central module containing the event model, the dispatcher and the
//! event loop that drives it.

pub mod errors;
pub mod events;
pub mod handler;
pub mod tasks;

pub use errors::SerferError;
pub use events::{Event, EventType, Member, MemberEvent, MemberEventType, MemberStatus};
