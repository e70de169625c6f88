//! Identifier generation for request records.
//!
//! The record only needs ids to be unique; the algorithm is up to the caller.

use uuid::Uuid;

use crate::types::RequestId;

/// Source of fresh, never reused request ids.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> RequestId;
}

/// Random (v4) UUIDs. The default generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidV4Generator;

impl IdGenerator for UuidV4Generator {
    fn next_id(&self) -> RequestId {
        Uuid::new_v4()
    }
}

/// Time-ordered (v7) UUIDs, for stores that benefit from monotonic keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidV7Generator;

impl IdGenerator for UuidV7Generator {
    fn next_id(&self) -> RequestId {
        Uuid::now_v7()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn v4_ids_are_unique() {
        let ids: HashSet<_> = (0..1000).map(|_| UuidV4Generator.next_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn v7_generator_produces_version_seven() {
        let first = UuidV7Generator.next_id();
        let second = UuidV7Generator.next_id();
        assert_eq!(first.get_version_num(), 7);
        assert_ne!(first, second);
    }
}
