//! Per-element unique identifiers.
//!
//! Every emitted element carries a `(uuid "...")` record. The values have no
//! meaning to this generator, so the source is injected: production runs use
//! [`RandomIds`], tests use [`SequentialIds`] to get byte-identical output.

use uuid::Uuid;

/// A source of element identifiers.
pub trait IdSource {
    /// Returns the next identifier.
    fn next_id(&mut self) -> String;
}

/// Random version-4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdSource for RandomIds {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic UUID-shaped identifiers counting up from 1.
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    issued: u128,
}

impl SequentialIds {
    /// Creates a fresh sequence.
    #[must_use]
    pub const fn new() -> Self {
        Self { issued: 0 }
    }

    /// Number of identifiers handed out so far.
    #[must_use]
    pub const fn issued(&self) -> u128 {
        self.issued
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> String {
        self.issued += 1;
        Uuid::from_u128(self.issued).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_ids_count_up() {
        let mut ids = SequentialIds::new();
        assert_eq!(ids.next_id(), "00000000-0000-0000-0000-000000000001");
        assert_eq!(ids.next_id(), "00000000-0000-0000-0000-000000000002");
        assert_eq!(ids.issued(), 2);
    }

    #[test]
    fn random_ids_are_unique() {
        let mut ids = RandomIds;
        assert_ne!(ids.next_id(), ids.next_id());
    }
}
