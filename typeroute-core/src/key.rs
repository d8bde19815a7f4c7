//! Routing keys, registration handles and execution policies.

use crate::message::Message;
use std::{
    any::{TypeId, type_name},
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
};

/// The routing key of an event type.
///
/// Two keys are equal iff they were derived from the same concrete type.
/// The type name is carried for diagnostics only and takes no part in
/// equality, hashing or ordering.
#[derive(Clone, Copy)]
pub struct EventTypeKey {
    id: TypeId,
    name: &'static str,
}

impl EventTypeKey {
    /// The key for message type `E`.
    pub fn of<E: Message>() -> Self {
        Self {
            id: TypeId::of::<E>(),
            name: type_name::<E>(),
        }
    }

    /// The underlying [`TypeId`].
    pub fn type_id(&self) -> TypeId {
        self.id
    }

    /// The fully-qualified type name, as reported by [`std::any::type_name`].
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for EventTypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for EventTypeKey {}

impl Hash for EventTypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for EventTypeKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EventTypeKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl fmt::Debug for EventTypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EventTypeKey").field(&self.name).finish()
    }
}

impl fmt::Display for EventTypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Execution policy of a registered handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExecutionPolicy {
    /// The handler stays registered across dispatches.
    #[default]
    Always,
    /// The handler removes itself after its first invocation.
    Once,
}

impl ExecutionPolicy {
    /// Returns `true` for [`ExecutionPolicy::Once`].
    pub const fn is_once(self) -> bool {
        matches!(self, ExecutionPolicy::Once)
    }
}

impl fmt::Display for ExecutionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionPolicy::Always => f.write_str("always"),
            ExecutionPolicy::Once => f.write_str("once"),
        }
    }
}

/// Opaque token identifying one registration.
///
/// Returned by registration and accepted by unregistration. A handle stays
/// valid until it is unregistered or, for [`ExecutionPolicy::Once`], until its
/// handler fires; using it afterwards is a silent no-op.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegistrationHandle {
    key: EventTypeKey,
    seq: u64,
}

impl RegistrationHandle {
    /// Creates a handle. Only registries mint handles.
    #[doc(hidden)]
    pub fn new(key: EventTypeKey, seq: u64) -> Self {
        Self { key, seq }
    }

    /// The routing key this registration lives under.
    pub fn key(&self) -> EventTypeKey {
        self.key
    }

    /// The registry-local sequence number.
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

impl fmt::Debug for RegistrationHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RegistrationHandle({self})")
    }
}

impl fmt::Display for RegistrationHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.key.name, self.seq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_key_identity_is_exact_type() {
        assert_eq!(EventTypeKey::of::<u32>(), EventTypeKey::of::<u32>());
        assert_ne!(EventTypeKey::of::<u32>(), EventTypeKey::of::<u64>());
        assert_ne!(EventTypeKey::of::<u32>(), EventTypeKey::of::<Box<u32>>());
        assert_ne!(
            EventTypeKey::of::<String>(),
            EventTypeKey::of::<&'static str>()
        );
    }

    #[test]
    fn test_key_display_uses_type_name() {
        assert_eq!(EventTypeKey::of::<i32>().to_string(), "i32");
        assert_eq!(EventTypeKey::of::<i32>().name(), "i32");
    }

    #[test]
    fn test_handle_display_and_hash() {
        let a = RegistrationHandle::new(EventTypeKey::of::<i64>(), 1);
        let b = RegistrationHandle::new(EventTypeKey::of::<i64>(), 2);
        assert_eq!(a.to_string(), "i64_1");
        assert_eq!(format!("{b:?}"), "RegistrationHandle(i64_2)");

        let set: HashSet<_> = [a, b, a].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_policy_display() {
        assert_eq!(ExecutionPolicy::default(), ExecutionPolicy::Always);
        assert_eq!(ExecutionPolicy::Once.to_string(), "once");
        assert!(ExecutionPolicy::Once.is_once());
        assert!(!ExecutionPolicy::Always.is_once());
    }
}
