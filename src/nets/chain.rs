//! Daisy-chain net derivation for addressable LEDs.
//!
//! A chain visits instances in a caller-supplied order. The first instance's
//! data input is the chain's external input net, each following input is a
//! dedicated link net, and the last instance's data output is left
//! unconnected:
//!
//! ```text
//! IN ──▶ [order[0]] ──L0──▶ [order[1]] ──L1──▶ … ──▶ [order[k-1]] ──▶ (net 0)
//! ```
//!
//! The same [`DaisyChain`] value must feed both the net registry (to declare
//! the link nets) and footprint instantiation (to wire DIN/DOUT).

use std::collections::HashSet;

use crate::board::error::{BoardError, BoardResult};
use crate::nets::{NetCode, NetRegistry, UNCONNECTED};

/// Data nets of one chained instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainLink {
    /// Caller-defined instance identifier (e.g. the switch index).
    pub instance: usize,
    /// Position of this instance in the chain (0-based).
    pub position: usize,
    /// Net driving the instance's data input.
    pub data_in: NetCode,
    /// Net driven by the instance's data output.
    pub data_out: NetCode,
}

/// A resolved daisy chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaisyChain {
    input: NetCode,
    first_link: NetCode,
    link_prefix: String,
    links: Vec<ChainLink>,
}

impl DaisyChain {
    /// Derives the chain nets for `order`.
    ///
    /// `input` is the external data net feeding `order[0]`. The `k - 1` link
    /// nets between consecutive instances get consecutive codes starting at
    /// `first_link` and names `{link_prefix}0`, `{link_prefix}1`, …
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidChain`] if an instance appears twice in
    /// `order` or the link codes run past [`NetCode::MAX`].
    pub fn new(
        order: &[usize],
        input: NetCode,
        first_link: NetCode,
        link_prefix: impl Into<String>,
    ) -> BoardResult<Self> {
        let mut seen = HashSet::new();
        if let Some(repeat) = order.iter().find(|&&instance| !seen.insert(instance)) {
            return Err(BoardError::invalid_chain(format!(
                "instance {repeat} appears more than once"
            )));
        }

        let link_code = |i: usize| -> BoardResult<NetCode> {
            NetCode::try_from(i)
                .ok()
                .and_then(|i| first_link.checked_add(i))
                .ok_or_else(|| {
                    BoardError::invalid_chain(format!(
                        "link {i} overflows the net code range starting at {first_link}"
                    ))
                })
        };

        let last = order.len().saturating_sub(1);
        let links = order
            .iter()
            .enumerate()
            .map(|(position, &instance)| -> BoardResult<ChainLink> {
                Ok(ChainLink {
                    instance,
                    position,
                    data_in: if position == 0 {
                        input
                    } else {
                        link_code(position - 1)?
                    },
                    data_out: if position == last {
                        UNCONNECTED
                    } else {
                        link_code(position)?
                    },
                })
            })
            .collect::<BoardResult<Vec<_>>>()?;

        Ok(Self {
            input,
            first_link,
            link_prefix: link_prefix.into(),
            links,
        })
    }

    /// The external input net.
    #[must_use]
    pub const fn input(&self) -> NetCode {
        self.input
    }

    /// Links in chain order.
    #[must_use]
    pub fn links(&self) -> &[ChainLink] {
        &self.links
    }

    /// Number of chained instances.
    #[must_use]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// True if the chain has no instances.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Link for a given instance identifier.
    #[must_use]
    pub fn link_for(&self, instance: usize) -> Option<&ChainLink> {
        self.links.iter().find(|l| l.instance == instance)
    }

    /// `(code, name)` for every inter-instance link net.
    pub fn link_nets(&self) -> impl Iterator<Item = (NetCode, String)> + '_ {
        self.links
            .iter()
            .filter(|l| l.data_out != UNCONNECTED)
            .map(|l| {
                (
                    l.data_out,
                    format!("{}{}", self.link_prefix, l.data_out - self.first_link),
                )
            })
    }

    /// Declares every link net in `registry`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::board::error::BoardError::DuplicateNetCode`] if a link
    /// code is already used by another net.
    pub fn register_links(&self, registry: &mut NetRegistry) -> BoardResult<()> {
        for (code, name) in self.link_nets() {
            registry.register(code, name)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_instance_chain() {
        let chain = DaisyChain::new(&[7], 6, 7, "NEO_D").unwrap();
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.links()[0].data_in, 6);
        assert_eq!(chain.links()[0].data_out, UNCONNECTED);
        assert_eq!(chain.link_nets().count(), 0);
    }

    #[test]
    fn empty_chain() {
        let chain = DaisyChain::new(&[], 6, 7, "NEO_D").unwrap();
        assert!(chain.is_empty());
    }

    #[test]
    fn link_names_follow_position() {
        let chain = DaisyChain::new(&[1, 2, 4, 3], 6, 7, "NEO_D").unwrap();
        let nets: Vec<_> = chain.link_nets().collect();
        assert_eq!(
            nets,
            vec![
                (7, "NEO_D0".to_string()),
                (8, "NEO_D1".to_string()),
                (9, "NEO_D2".to_string()),
            ]
        );
        assert_eq!(chain.link_for(4).unwrap().data_in, 8);
        assert_eq!(chain.link_for(3).unwrap().data_out, UNCONNECTED);
    }

    #[test]
    fn link_codes_past_the_range_are_rejected() {
        let err = DaisyChain::new(&[1, 2, 3], 6, NetCode::MAX, "X").unwrap_err();
        assert!(matches!(err, BoardError::InvalidChain { .. }));
        assert!(DaisyChain::new(&[1, 2], 6, NetCode::MAX, "X").is_ok());
    }

    #[test]
    fn repeated_instance_is_rejected() {
        let err = DaisyChain::new(&[1, 2, 1], 6, 7, "NEO_D").unwrap_err();
        assert!(err.to_string().contains("instance 1"));
    }
}
