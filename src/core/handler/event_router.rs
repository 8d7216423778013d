// src/core/handler/event_router.rs

//! The dispatcher at the center of the event pipeline.
//!
//! `SerfEventHandler` inspects each event's type, hands it to the slot
//! registered for that type and, for membership changes, decides whether the
//! change must also be reconciled into the external store. Reconciliation
//! always runs after the type-specific handler has returned.

use super::{
    EventHandler, LeadershipOracle, MemberEventHandler, QueryEventHandler, Reconciler,
    UserEventHandler,
};
use crate::config::{Config, ReconcileConfig};
use crate::core::SerferError;
use crate::core::events::{Event, MemberEvent, MemberEventType};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

/// Decides whether a user event name announces a leader election.
pub type LeaderEventPredicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// The capabilities the dispatcher routes events to. Every slot is optional.
#[derive(Clone, Default)]
pub struct HandlerSlots {
    pub node_joined: Option<Arc<dyn MemberEventHandler>>,
    pub node_left: Option<Arc<dyn MemberEventHandler>>,
    pub node_failed: Option<Arc<dyn MemberEventHandler>>,
    pub node_updated: Option<Arc<dyn MemberEventHandler>>,
    pub node_reaped: Option<Arc<dyn MemberEventHandler>>,
    /// Receives user events that announce a leader election.
    pub leader_election: Option<Arc<dyn UserEventHandler>>,
    /// Receives user events carrying the service prefix, with the prefix removed.
    pub user_event: Option<Arc<dyn UserEventHandler>>,
    /// Receives user events that match neither of the above.
    pub unknown_event: Option<Arc<dyn UserEventHandler>>,
    pub query: Option<Arc<dyn QueryEventHandler>>,
    pub reconciler: Option<Arc<dyn Reconciler>>,
    /// Without an oracle the local node never considers itself leader.
    pub is_leader: Option<Arc<dyn LeadershipOracle>>,
}

impl fmt::Debug for HandlerSlots {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerSlots")
            .field("node_joined", &self.node_joined.is_some())
            .field("node_left", &self.node_left.is_some())
            .field("node_failed", &self.node_failed.is_some())
            .field("node_updated", &self.node_updated.is_some())
            .field("node_reaped", &self.node_reaped.is_some())
            .field("leader_election", &self.leader_election.is_some())
            .field("user_event", &self.user_event.is_some())
            .field("unknown_event", &self.unknown_event.is_some())
            .field("query", &self.query.is_some())
            .field("reconciler", &self.reconciler.is_some())
            .field("is_leader", &self.is_leader.is_some())
            .finish()
    }
}

/// Dispatches cluster events to the registered handler slots.
///
/// The dispatcher holds no mutable state; it is built once and then shared
/// with the run loop.
pub struct SerfEventHandler {
    pub(super) slots: HandlerSlots,
    pub(super) reconcile_on: ReconcileConfig,
    /// The `<prefix>:` marker of recognized service events.
    pub(super) service_marker: String,
    pub(super) is_leader_event: LeaderEventPredicate,
}

impl SerfEventHandler {
    /// Creates a dispatcher from a validated configuration and a set of slots.
    /// The leader-event predicate matches the names listed in `leader_events`.
    pub fn new(config: &Config, slots: HandlerSlots) -> Result<Self, SerferError> {
        config.validate()?;

        let leader_events: HashSet<String> = config.leader_events.iter().cloned().collect();
        let is_leader_event: LeaderEventPredicate =
            Arc::new(move |name: &str| leader_events.contains(name));

        Ok(Self {
            slots,
            reconcile_on: config.reconcile,
            service_marker: config.service_marker(),
            is_leader_event,
        })
    }

    /// Replaces the name-list leader-event predicate with a custom one.
    pub fn with_leader_event_predicate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.is_leader_event = Arc::new(predicate);
        self
    }

    pub fn slots(&self) -> &HandlerSlots {
        &self.slots
    }

    /// Runs the handler for a membership change and reports whether the change
    /// is eligible for reconciliation.
    fn dispatch_member_event(&self, event: &MemberEvent) -> bool {
        let (handler, reconcile) = match event.event_type {
            MemberEventType::Join => (&self.slots.node_joined, self.reconcile_on.on_join),
            MemberEventType::Leave => (&self.slots.node_left, self.reconcile_on.on_leave),
            MemberEventType::Failed => (&self.slots.node_failed, self.reconcile_on.on_fail),
            MemberEventType::Update => (&self.slots.node_updated, self.reconcile_on.on_update),
            MemberEventType::Reap => (&self.slots.node_reaped, self.reconcile_on.on_reap),
        };

        if let Some(handler) = handler {
            handler.handle_member_event(event);
        }
        reconcile
    }
}

impl EventHandler for SerfEventHandler {
    fn handle_event(&self, event: Option<&Event>) {
        let Some(event) = event else {
            return;
        };

        match event {
            Event::Member(member_event) => {
                if self.dispatch_member_event(member_event) {
                    self.reconcile(member_event);
                }
            }
            Event::User(user_event) => self.handle_user_event(user_event),
            Event::Query(query) => {
                if let Some(handler) = &self.slots.query {
                    handler.handle_query_event(query.clone());
                }
            }
            Event::Other { .. } => {
                warn!("Unhandled Serf event: {:?}", event);
            }
        }
    }
}

impl fmt::Debug for SerfEventHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerfEventHandler")
            .field("slots", &self.slots)
            .field("reconcile_on", &self.reconcile_on)
            .field("service_marker", &self.service_marker)
            .finish_non_exhaustive()
    }
}
