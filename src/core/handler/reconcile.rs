// src/core/handler/reconcile.rs

//! Bridges membership changes into the external reconciler.

use super::event_router::SerfEventHandler;
use crate::core::events::{Member, MemberEvent, MemberEventType, MemberStatus};
use tracing::debug;

/// Produces the copies of the event's members that are handed to the
/// reconciler. Members of a reap event are marked `Reaped`; the event itself is
/// never modified.
pub(super) fn members_to_reconcile(event: &MemberEvent) -> impl Iterator<Item = Member> + '_ {
    let reaped = event.event_type == MemberEventType::Reap;
    event.members.iter().map(move |member| {
        let mut member = member.clone();
        if reaped {
            member.status = MemberStatus::Reaped;
        }
        member
    })
}

impl SerfEventHandler {
    /// Forwards every member of the event to the reconciler, in order, when the
    /// local node is the leader. Leadership is checked once per event.
    pub(super) fn reconcile(&self, event: &MemberEvent) {
        let is_leader = self
            .slots
            .is_leader
            .as_ref()
            .is_some_and(|oracle| oracle.is_leader());
        if !is_leader {
            debug!(
                "Skipping reconciliation of {} event: not the leader.",
                event.event_type
            );
            return;
        }

        let Some(reconciler) = &self.slots.reconciler else {
            return;
        };

        debug!(
            "Reconciling {} member(s) for {} event.",
            event.members.len(),
            event.event_type
        );
        for member in members_to_reconcile(event) {
            reconciler.reconcile(member);
        }
    }
}
