use crate::network::Network;

use log::debug;
use petgraph::visit::EdgeRef;
use rustc_hash::FxHashSet;

use std::collections::BTreeSet;

impl Network {
    /// Builds the sub-network usable by any of the given modes.
    ///
    /// Only links whose mode set intersects `modes` are kept, alongside
    /// the nodes they connect. Nodes without a usable link are dropped,
    /// so an empty `modes` set produces an empty network.
    pub fn filter_by_modes(&self, modes: &BTreeSet<String>) -> Network {
        let endpoints = self
            .graph
            .edge_references()
            .filter(|edge| edge.weight().allows_any(modes))
            .flat_map(|edge| [edge.source(), edge.target()])
            .collect::<FxHashSet<_>>();

        let filtered = self.retain(
            |index, _| endpoints.contains(&index),
            |_, link| link.allows_any(modes),
        );

        debug!(
            "Mode filter {:?} kept {} of {} links",
            modes,
            filtered.link_count(),
            self.link_count()
        );

        filtered
    }
}
