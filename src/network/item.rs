use crate::id::{LinkId, NodeId};
use crate::network::NetworkError;

use geo::{Line, Point};
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use rustc_hash::FxHashMap;

use std::collections::BTreeSet;
use std::fmt::{Debug, Formatter};

pub type NetworkStructure = DiGraph<Node, Link>;

/// A network node positioned in planar (projected) coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub position: Point,
}

impl Node {
    pub fn new(id: impl Into<NodeId>, position: Point) -> Self {
        Self {
            id: id.into(),
            position,
        }
    }
}

/// A directed network link.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub id: LinkId,
    pub from: NodeId,
    pub to: NodeId,

    /// Length in network units (usually meters).
    pub length: f64,

    /// Free-flow speed in network units per second.
    pub freespeed: f64,

    /// The modes which may travel along the link.
    pub modes: BTreeSet<String>,
}

impl Link {
    pub fn new<I, S>(
        id: impl Into<LinkId>,
        from: impl Into<NodeId>,
        to: impl Into<NodeId>,
        length: f64,
        freespeed: f64,
        modes: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            from: from.into(),
            to: to.into(),
            length,
            freespeed,
            modes: modes.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether any of the given modes may use this link.
    #[inline]
    pub fn allows_any(&self, modes: &BTreeSet<String>) -> bool {
        !self.modes.is_disjoint(modes)
    }
}

/// Directed multimodal network.
///
/// Nodes and links are held in a `petgraph` arena, with id lookups
/// alongside. The network only grows through [`Network::add_node`]
/// and [`Network::add_link`]; every reduction of it produces a new
/// network (see [`Network::retain`]).
#[derive(Clone, Default)]
pub struct Network {
    pub(crate) graph: NetworkStructure,
    pub(crate) nodes: FxHashMap<NodeId, NodeIndex>,
    pub(crate) links: FxHashMap<LinkId, EdgeIndex>,
}

impl Debug for Network {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Network with Nodes: {}, Links: {}",
            self.node_count(),
            self.link_count()
        )
    }
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, node: Node) -> Result<NodeIndex, NetworkError> {
        if self.nodes.contains_key(&node.id) {
            return Err(NetworkError::DuplicateNode(node.id));
        }

        let id = node.id.clone();
        let index = self.graph.add_node(node);
        self.nodes.insert(id, index);

        Ok(index)
    }

    pub fn add_link(&mut self, link: Link) -> Result<EdgeIndex, NetworkError> {
        if self.links.contains_key(&link.id) {
            return Err(NetworkError::DuplicateLink(link.id));
        }

        if !link.length.is_finite() || link.length < 0.0 {
            return Err(NetworkError::InvalidLength(link.id, link.length));
        }

        if !link.freespeed.is_finite() || link.freespeed <= 0.0 {
            return Err(NetworkError::InvalidFreespeed(link.id, link.freespeed));
        }

        let source = *self
            .nodes
            .get(&link.from)
            .ok_or_else(|| NetworkError::UnknownNode(link.id.clone(), link.from.clone()))?;
        let target = *self
            .nodes
            .get(&link.to)
            .ok_or_else(|| NetworkError::UnknownNode(link.id.clone(), link.to.clone()))?;

        let id = link.id.clone();
        let index = self.graph.add_edge(source, target, link);
        self.links.insert(id, index);

        Ok(index)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn link_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    #[inline]
    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    #[inline]
    pub fn contains_link(&self, id: &LinkId) -> bool {
        self.links.contains_key(id)
    }

    #[inline]
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id).map(|index| &self.graph[*index])
    }

    #[inline]
    pub fn link(&self, id: &LinkId) -> Option<&Link> {
        self.links.get(id).map(|index| &self.graph[*index])
    }

    #[inline]
    pub(crate) fn node_index(&self, id: &NodeId) -> Option<NodeIndex> {
        self.nodes.get(id).copied()
    }

    #[inline]
    pub fn get_position(&self, id: &NodeId) -> Option<Point> {
        self.node(id).map(|node| node.position)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.graph.node_weights()
    }

    pub fn links(&self) -> impl Iterator<Item = &Link> {
        self.graph.edge_weights()
    }

    /// The straight segment between the endpoints of a link.
    pub fn geometry(&self, link: &Link) -> Option<Line> {
        let from = self.get_position(&link.from)?;
        let to = self.get_position(&link.to)?;
        Some(Line::new(from.0, to.0))
    }

    #[inline]
    pub(crate) fn edge_geometry(&self, edge: EdgeIndex) -> Option<Line> {
        let (source, target) = self.graph.edge_endpoints(edge)?;
        Some(Line::new(
            self.graph[source].position.0,
            self.graph[target].position.0,
        ))
    }

    /// Builds a new network holding the nodes accepted by `keep_node`,
    /// and the links accepted by `keep_link` whose endpoints were both kept.
    ///
    /// Insertion order of the source network is preserved.
    pub fn retain<N, L>(&self, mut keep_node: N, mut keep_link: L) -> Network
    where
        N: FnMut(NodeIndex, &Node) -> bool,
        L: FnMut(EdgeIndex, &Link) -> bool,
    {
        let mut reduced = Network::new();
        let mut remap = FxHashMap::<NodeIndex, NodeIndex>::default();

        for index in self.graph.node_indices() {
            let node = &self.graph[index];
            if keep_node(index, node) {
                let next = reduced.graph.add_node(node.clone());
                reduced.nodes.insert(node.id.clone(), next);
                remap.insert(index, next);
            }
        }

        for edge in self.graph.edge_references() {
            let (Some(source), Some(target)) =
                (remap.get(&edge.source()), remap.get(&edge.target()))
            else {
                continue;
            };

            let link = edge.weight();
            if keep_link(edge.id(), link) {
                let next = reduced.graph.add_edge(*source, *target, link.clone());
                reduced.links.insert(link.id.clone(), next);
            }
        }

        reduced
    }
}
