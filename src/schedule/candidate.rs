use crate::id::{LinkId, NodeId};
use crate::network::{Link, Network};

use geo::Line;

/// A network link proposed as the attachment of a stop.
///
/// Candidates are produced outside of this crate; routing only reads
/// the link and its geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkCandidate {
    pub link: Link,
    pub geometry: Line,
}

impl LinkCandidate {
    pub fn new(link: Link, geometry: Line) -> Self {
        Self { link, geometry }
    }

    /// Builds the candidate for a link of the given network.
    pub fn from_network(network: &Network, id: &LinkId) -> Option<Self> {
        let link = network.link(id)?;
        let geometry = network.geometry(link)?;
        Some(Self::new(link.clone(), geometry))
    }

    #[inline]
    pub fn from_node(&self) -> &NodeId {
        &self.link.from
    }

    #[inline]
    pub fn to_node(&self) -> &NodeId {
        &self.link.to
    }
}
