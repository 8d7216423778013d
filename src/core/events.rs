// src/core/events.rs

//! Defines the typed cluster events produced by the gossip layer and consumed
//! by the dispatcher.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::net::IpAddr;

/// The lowest gossip protocol version a member may speak.
pub const PROTOCOL_VERSION_MIN: u8 = 2;
/// The highest gossip protocol version a member may speak.
pub const PROTOCOL_VERSION_MAX: u8 = 5;

/// A Lamport clock value attached to user events and queries.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct LamportTime(pub u64);

impl fmt::Display for LamportTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The status of a member as seen by the gossip layer.
///
/// `Reaped` is synthetic: the gossip layer never assigns it. It is only set on
/// the copy of a member handed to a [`Reconciler`](crate::core::handler::Reconciler)
/// while processing a reap event, and its tag sits outside the range used by
/// the protocol so it never collides with a real status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i8)]
pub enum MemberStatus {
    None = 0,
    Alive = 1,
    Leaving = 2,
    Left = 3,
    Failed = 4,
    Reaped = -1,
}

impl MemberStatus {
    /// Returns the numeric tag of the status.
    pub fn tag(self) -> i8 {
        self as i8
    }

    /// Returns `true` for statuses the gossip protocol itself can produce.
    pub fn is_protocol_status(self) -> bool {
        self.tag() >= 0
    }
}

impl fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MemberStatus::None => "none",
            MemberStatus::Alive => "alive",
            MemberStatus::Leaving => "leaving",
            MemberStatus::Left => "left",
            MemberStatus::Failed => "failed",
            MemberStatus::Reaped => "reaped",
        };
        f.write_str(s)
    }
}

/// A single node of the cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    pub addr: IpAddr,
    pub port: u16,
    #[serde(default)]
    pub tags: HashMap<String, String>,
    pub status: MemberStatus,
    pub protocol_min: u8,
    pub protocol_max: u8,
    pub protocol_cur: u8,
    pub delegate_min: u8,
    pub delegate_max: u8,
    pub delegate_cur: u8,
}

impl Member {
    /// Creates an `Alive` member that speaks the full supported protocol range.
    pub fn new(name: impl Into<String>, addr: IpAddr, port: u16) -> Self {
        Self {
            name: name.into(),
            addr,
            port,
            tags: HashMap::new(),
            status: MemberStatus::Alive,
            protocol_min: PROTOCOL_VERSION_MIN,
            protocol_max: PROTOCOL_VERSION_MAX,
            protocol_cur: PROTOCOL_VERSION_MAX,
            delegate_min: PROTOCOL_VERSION_MIN,
            delegate_max: PROTOCOL_VERSION_MAX,
            delegate_cur: PROTOCOL_VERSION_MAX,
        }
    }

    pub fn with_status(mut self, status: MemberStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }
}

/// The kind of a membership change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemberEventType {
    Join,
    Leave,
    Failed,
    Update,
    Reap,
}

impl fmt::Display for MemberEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MemberEventType::Join => "member-join",
            MemberEventType::Leave => "member-leave",
            MemberEventType::Failed => "member-failed",
            MemberEventType::Update => "member-update",
            MemberEventType::Reap => "member-reap",
        };
        f.write_str(s)
    }
}

/// A membership change affecting one or more members.
/// A single gossip round may batch several members into one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberEvent {
    pub event_type: MemberEventType,
    pub members: Vec<Member>,
}

impl MemberEvent {
    pub fn new(event_type: MemberEventType, members: Vec<Member>) -> Self {
        Self {
            event_type,
            members,
        }
    }
}

/// A custom event broadcast by a cluster member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEvent {
    pub ltime: LamportTime,
    pub name: String,
    pub payload: Bytes,
    pub coalesce: bool,
}

impl UserEvent {
    /// Returns a copy of this event carrying a different name.
    /// The original event is left untouched.
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            ltime: self.ltime,
            name: name.into(),
            payload: self.payload.clone(),
            coalesce: self.coalesce,
        }
    }
}

/// A request broadcast to the cluster that expects responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub ltime: LamportTime,
    pub name: String,
    pub payload: Bytes,
}

/// The discriminant of an [`Event`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventType {
    Member(MemberEventType),
    User,
    Query,
    /// An event kind this core does not know how to classify.
    Other(String),
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventType::Member(kind) => fmt::Display::fmt(kind, f),
            EventType::User => f.write_str("user"),
            EventType::Query => f.write_str("query"),
            EventType::Other(kind) => f.write_str(kind),
        }
    }
}

/// An event delivered by the gossip layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Member(MemberEvent),
    User(UserEvent),
    Query(Query),
    /// Traffic of an unrecognized kind, kept so it can be reported.
    Other { kind: String },
}

impl Event {
    pub fn event_type(&self) -> EventType {
        match self {
            Event::Member(e) => EventType::Member(e.event_type),
            Event::User(_) => EventType::User,
            Event::Query(_) => EventType::Query,
            Event::Other { kind } => EventType::Other(kind.clone()),
        }
    }
}

impl From<MemberEvent> for Event {
    fn from(e: MemberEvent) -> Self {
        Event::Member(e)
    }
}

impl From<UserEvent> for Event {
    fn from(e: UserEvent) -> Self {
        Event::User(e)
    }
}

impl From<Query> for Event {
    fn from(q: Query) -> Self {
        Event::Query(q)
    }
}
