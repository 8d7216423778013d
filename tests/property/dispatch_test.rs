// tests/property/dispatch_test.rs

//! Property-based tests for event routing and reconciliation

use crate::test_helpers::*;
use proptest::prelude::*;
use serfer::config::{Config, ReconcileConfig};
use serfer::core::events::{MemberEventType, MemberStatus};

fn member_event_type() -> impl Strategy<Value = MemberEventType> {
    prop::sample::select(ALL_MEMBER_EVENT_TYPES.to_vec())
}

fn flag_for(reconcile: &ReconcileConfig, event_type: MemberEventType) -> bool {
    match event_type {
        MemberEventType::Join => reconcile.on_join,
        MemberEventType::Leave => reconcile.on_leave,
        MemberEventType::Failed => reconcile.on_fail,
        MemberEventType::Update => reconcile.on_update,
        MemberEventType::Reap => reconcile.on_reap,
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 200,
        ..ProptestConfig::default()
    })]

    #[test]
    fn test_member_event_routing_and_reconciliation(
        flags in prop::array::uniform5(any::<bool>()),
        is_leader in any::<bool>(),
        event_type in member_event_type(),
        names in prop::collection::vec("[a-z0-9-]{1,16}", 0..8)
    ) {
        let reconcile = ReconcileConfig {
            on_join: flags[0],
            on_leave: flags[1],
            on_fail: flags[2],
            on_update: flags[3],
            on_reap: flags[4],
        };
        let ctx = TestContext::with_config(Config { reconcile, ..Config::default() });
        ctx.set_leader(is_leader);

        let members: Vec<_> = names.iter().map(|n| test_member(n)).collect();
        ctx.dispatch(member_event(event_type, members.clone()));

        let slots = ctx.slots_called();
        prop_assert_eq!(slots[0], slot_for(event_type));
        prop_assert!(slots[1..].iter().all(|s| *s == Slot::Reconciler));

        let reconciled = ctx.reconciled();
        if flag_for(&reconcile, event_type) && is_leader {
            prop_assert_eq!(reconciled.len(), members.len());
            for (copy, source) in reconciled.iter().zip(&members) {
                prop_assert_eq!(&copy.name, &source.name);
                if event_type == MemberEventType::Reap {
                    prop_assert_eq!(copy.status, MemberStatus::Reaped);
                } else {
                    prop_assert_eq!(copy.status, source.status);
                }
            }
        } else {
            prop_assert!(reconciled.is_empty());
        }
    }

    #[test]
    fn test_user_events_fire_exactly_one_slot(
        name in prop_oneof![
            Just("leader".to_string()),
            "serf:[a-z:]{0,12}",
            "[a-z:]{0,16}",
        ]
    ) {
        let ctx = TestContext::new();
        ctx.dispatch(user_event(&name, b""));

        let calls = ctx.calls();
        prop_assert_eq!(calls.len(), 1);

        let expected = if name == "leader" {
            Slot::LeaderElection
        } else if name.starts_with("serf:") {
            Slot::UserEvent
        } else {
            Slot::UnknownEvent
        };
        prop_assert_eq!(calls[0].slot, expected);

        if let Recorded::User(forwarded) = &calls[0].recorded {
            let expected_name = name.strip_prefix("serf:").filter(|_| expected == Slot::UserEvent);
            prop_assert_eq!(forwarded.name.as_str(), expected_name.unwrap_or(name.as_str()));
        } else {
            prop_assert!(false, "Expected a user event");
        }
    }
}
