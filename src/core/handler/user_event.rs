// src/core/handler/user_event.rs

//! Classifies user events as leader-election announcements, service events
//! or unknown traffic.

use super::event_router::SerfEventHandler;
use crate::core::events::UserEvent;
use tracing::{debug, info, warn};

impl SerfEventHandler {
    /// Routes a user event to exactly one of the three user-event slots.
    /// The leader-election check takes priority over the service prefix.
    pub(super) fn handle_user_event(&self, event: &UserEvent) {
        if (self.is_leader_event)(event.name.as_str()) {
            info!(
                "Leader election event '{}' received: {}",
                event.name,
                String::from_utf8_lossy(&event.payload)
            );
            if let Some(handler) = &self.slots.leader_election {
                handler.handle_user_event(event);
            }
            return;
        }

        if let Some(name) = event.name.strip_prefix(self.service_marker.as_str()) {
            debug!("Service event '{}' received at ltime {}.", name, event.ltime);
            if let Some(handler) = &self.slots.user_event {
                handler.handle_user_event(&event.renamed(name));
            }
            return;
        }

        warn!("Unknown user event '{}' received.", event.name);
        if let Some(handler) = &self.slots.unknown_event {
            handler.handle_user_event(event);
        }
    }
}
