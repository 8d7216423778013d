// src/core/handler/mod.rs

//! Handler capabilities and the dispatcher that routes cluster events to them.
//!
//! Every capability is an object-safe trait held as `Option<Arc<dyn ...>>`, so a
//! slot left empty is a silent no-op. Closures with the matching signature
//! implement the traits directly.

mod reconcile;
mod user_event;

pub mod event_router;

pub use event_router::{HandlerSlots, LeaderEventPredicate, SerfEventHandler};

use crate::core::events::{Event, Member, MemberEvent, Query, UserEvent};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Processes generic cluster events. Depending on the event type, more
/// processing may be delegated to narrower handlers.
pub trait EventHandler: Send + Sync {
    /// Handles a single event. An absent event is a no-op.
    fn handle_event(&self, event: Option<&Event>);
}

/// Handles membership change events.
pub trait MemberEventHandler: Send + Sync {
    fn handle_member_event(&self, event: &MemberEvent);
}

/// Handles user events.
pub trait UserEventHandler: Send + Sync {
    fn handle_user_event(&self, event: &UserEvent);
}

/// Handles query events. Receives its own copy of the query.
pub trait QueryEventHandler: Send + Sync {
    fn handle_query_event(&self, query: Query);
}

/// Reconciles a member with an external, strongly-consistent store.
pub trait Reconciler: Send + Sync {
    fn reconcile(&self, member: Member);
}

/// Reports whether the local process currently leads reconciliation.
/// Called once per reconcilable event and must be free of side effects.
pub trait LeadershipOracle: Send + Sync {
    fn is_leader(&self) -> bool;
}

impl<F> MemberEventHandler for F
where
    F: Fn(&MemberEvent) + Send + Sync,
{
    fn handle_member_event(&self, event: &MemberEvent) {
        self(event)
    }
}

impl<F> UserEventHandler for F
where
    F: Fn(&UserEvent) + Send + Sync,
{
    fn handle_user_event(&self, event: &UserEvent) {
        self(event)
    }
}

impl<F> QueryEventHandler for F
where
    F: Fn(Query) + Send + Sync,
{
    fn handle_query_event(&self, query: Query) {
        self(query)
    }
}

impl<F> Reconciler for F
where
    F: Fn(Member) + Send + Sync,
{
    fn reconcile(&self, member: Member) {
        self(member)
    }
}

impl<F> LeadershipOracle for F
where
    F: Fn() -> bool + Send + Sync,
{
    fn is_leader(&self) -> bool {
        self()
    }
}

/// Lets a consensus layer publish leadership changes through a shared flag.
impl LeadershipOracle for AtomicBool {
    fn is_leader(&self) -> bool {
        self.load(Ordering::Acquire)
    }
}

impl<T> EventHandler for Arc<T>
where
    T: EventHandler + ?Sized,
{
    fn handle_event(&self, event: Option<&Event>) {
        (**self).handle_event(event)
    }
}
