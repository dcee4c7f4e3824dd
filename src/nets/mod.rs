//! Net registry and per-component pad-to-net assignments.
//!
//! Net codes are plain integers; code [`UNCONNECTED`] is always present and
//! has an empty name. Boards partition the remaining codes into bands (power,
//! per-channel signals, chain links, matrix lines, junctions) purely to keep
//! them readable in the emitted file.

pub mod chain;

use std::collections::BTreeMap;

use indexmap::IndexMap;

use crate::board::error::{BoardError, BoardResult};

pub use chain::{ChainLink, DaisyChain};

/// Integer net identifier as written to the board file.
pub type NetCode = u32;

/// The reserved "no connection" net.
pub const UNCONNECTED: NetCode = 0;

/// Mapping from net code to net name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetRegistry {
    nets: BTreeMap<NetCode, String>,
}

impl Default for NetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl NetRegistry {
    /// Creates a registry holding only the unconnected net.
    #[must_use]
    pub fn new() -> Self {
        let mut nets = BTreeMap::new();
        nets.insert(UNCONNECTED, String::new());
        Self { nets }
    }

    /// Registers `code` under `name`.
    ///
    /// Registering the same `(code, name)` pair again is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::DuplicateNetCode`] if `code` is already bound to
    /// a different name (this includes giving net 0 a name).
    pub fn register(&mut self, code: NetCode, name: impl Into<String>) -> BoardResult<()> {
        let name = name.into();
        if let Some(existing) = self.nets.get(&code) {
            if *existing == name {
                return Ok(());
            }
            return Err(BoardError::DuplicateNetCode {
                code,
                existing: existing.clone(),
                requested: name,
            });
        }
        tracing::debug!(code, name = %name, "Registered net");
        self.nets.insert(code, name);
        Ok(())
    }

    /// Resolves a code to its name (empty for [`UNCONNECTED`]).
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UnknownNet`] if the code is not registered.
    pub fn resolve(&self, code: NetCode) -> BoardResult<&str> {
        self.nets
            .get(&code)
            .map(String::as_str)
            .ok_or_else(|| BoardError::unknown_net(code))
    }

    /// True if `code` is registered.
    #[must_use]
    pub fn contains(&self, code: NetCode) -> bool {
        self.nets.contains_key(&code)
    }

    /// Iterates `(code, name)` in ascending code order, net 0 first.
    pub fn iter(&self) -> impl Iterator<Item = (NetCode, &str)> {
        self.nets.iter().map(|(code, name)| (*code, name.as_str()))
    }

    /// Number of registered nets, including the unconnected net.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nets.len()
    }

    /// Always false: the unconnected net is always present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nets.is_empty()
    }

    /// Number of named nets (everything except net 0).
    #[must_use]
    pub fn named_count(&self) -> usize {
        self.nets.len() - 1
    }
}

/// Pad-name to net-code assignment for one placement.
///
/// Pads that are not mentioned resolve to [`UNCONNECTED`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PadNets {
    pads: IndexMap<String, NetCode>,
}

impl PadNets {
    /// Creates an empty assignment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style: assigns `pad` to `code`.
    #[must_use]
    pub fn with(mut self, pad: impl Into<String>, code: NetCode) -> Self {
        self.assign(pad, code);
        self
    }

    /// Assigns `pad` to `code`, replacing any earlier assignment.
    pub fn assign(&mut self, pad: impl Into<String>, code: NetCode) {
        self.pads.insert(pad.into(), code);
    }

    /// Net code for `pad`, defaulting to [`UNCONNECTED`].
    #[must_use]
    pub fn net_for(&self, pad: &str) -> NetCode {
        self.pads.get(pad).copied().unwrap_or(UNCONNECTED)
    }

    /// Pad names that carry an explicit assignment, in insertion order.
    pub fn pad_names(&self) -> impl Iterator<Item = &str> {
        self.pads.keys().map(String::as_str)
    }
}

impl<K: Into<String>> FromIterator<(K, NetCode)> for PadNets {
    fn from_iter<I: IntoIterator<Item = (K, NetCode)>>(iter: I) -> Self {
        let mut nets = Self::new();
        for (pad, code) in iter {
            nets.assign(pad, code);
        }
        nets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_registry_has_unconnected_net() {
        let reg = NetRegistry::new();
        assert_eq!(reg.resolve(UNCONNECTED).unwrap(), "");
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.named_count(), 0);
    }

    #[test]
    fn register_and_resolve() {
        let mut reg = NetRegistry::new();
        reg.register(6, "GND").unwrap();
        reg.register(1, "+5VA").unwrap();
        assert_eq!(reg.resolve(6).unwrap(), "GND");
        assert_eq!(reg.resolve(1).unwrap(), "+5VA");
        let codes: Vec<_> = reg.iter().map(|(c, _)| c).collect();
        assert_eq!(codes, vec![0, 1, 6]);
    }

    #[test]
    fn reregistering_same_name_is_ok() {
        let mut reg = NetRegistry::new();
        reg.register(3, "SDA").unwrap();
        assert!(reg.register(3, "SDA").is_ok());
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn conflicting_name_is_rejected() {
        let mut reg = NetRegistry::new();
        reg.register(3, "SDA").unwrap();
        let err = reg.register(3, "SCL").unwrap_err();
        assert!(matches!(err, BoardError::DuplicateNetCode { code: 3, .. }));
        assert!(reg.register(UNCONNECTED, "NC").is_err());
    }

    #[test]
    fn resolve_unknown_fails() {
        let reg = NetRegistry::new();
        assert!(matches!(
            reg.resolve(99),
            Err(BoardError::UnknownNet { code: 99, .. })
        ));
    }

    #[test]
    fn pad_nets_default_to_unconnected() {
        let nets = PadNets::new().with("T", 2).with("S", 6);
        assert_eq!(nets.net_for("T"), 2);
        assert_eq!(nets.net_for("X"), UNCONNECTED);
        assert_eq!(nets.pad_names().collect::<Vec<_>>(), vec!["T", "S"]);
    }

    #[test]
    fn pad_nets_from_iterator() {
        let nets: PadNets = [("1", 1), ("2", 6)].into_iter().collect();
        assert_eq!(nets.net_for("2"), 6);
    }
}
