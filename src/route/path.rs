use crate::id::NodeId;
use crate::network::{Link, Network};
use crate::route::costing::TravelCost;
use crate::route::primitives::{AStar, PathCost};

use geo::{Distance, Euclidean, Line, Point};
use log::debug;
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
#[cfg(feature = "tracing")]
use tracing::Level;

/// Geometries shorter than this do not inform the search heuristic.
const MIN_HEURISTIC_LENGTH: f64 = 1e-9;

/// The least-cost path between two network nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    /// Visited nodes, including both endpoints.
    pub nodes: Vec<NodeId>,
    /// Traversed links, in order of travel.
    pub links: Vec<Link>,
    /// Accumulated disutility along the path.
    pub travel_cost: f64,
    /// Accumulated free-flow travel time along the path.
    pub travel_time: f64,
}

/// Point-to-point least-cost search over a fixed network.
///
/// Link weights are taken from the costing once, on construction, so
/// repeated queries only pay for the search itself. Queries hold no
/// shared scratch state, so one calculator may serve concurrent callers.
pub struct PathCalculator<C>
where
    C: TravelCost,
{
    network: Arc<Network>,
    costing: Arc<C>,

    /// Per-link weight, indexed by the link's edge index.
    weights: Vec<PathCost>,

    /// Lowest disutility per unit of straight link geometry, scaling the
    /// euclidean distance to the target into an admissible estimate.
    cost_per_unit: f64,
}

impl<C> Debug for PathCalculator<C>
where
    C: TravelCost + Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "PathCalculator over {:?} using {:?}",
            self.network, self.costing
        )
    }
}

impl<C> PathCalculator<C>
where
    C: TravelCost + Send + Sync,
{
    pub fn new(network: Arc<Network>, costing: Arc<C>) -> Self {
        let edges = network.graph.edge_references().collect::<Vec<_>>();

        let weighted = edges
            .par_iter()
            .map(|edge| {
                let link = edge.weight();
                let geometry = Line::new(
                    network.graph[edge.source()].position.0,
                    network.graph[edge.target()].position.0,
                );

                let weight = PathCost::new(
                    costing.disutility(link, &geometry),
                    costing.travel_time(link),
                );

                let length = Euclidean.distance(Point(geometry.start), Point(geometry.end));
                (weight, length)
            })
            .collect::<Vec<_>>();

        let cost_per_unit = weighted
            .iter()
            .filter(|(_, length)| *length > MIN_HEURISTIC_LENGTH)
            .map(|(weight, length)| weight.cost / length)
            .fold(f64::INFINITY, f64::min);

        let cost_per_unit = if cost_per_unit.is_finite() {
            cost_per_unit.max(0.0)
        } else {
            0.0
        };

        Self {
            network,
            costing,
            weights: weighted.into_iter().map(|(weight, _)| weight).collect(),
            cost_per_unit,
        }
    }
}

impl<C> PathCalculator<C>
where
    C: TravelCost,
{
    pub fn network(&self) -> &Arc<Network> {
        &self.network
    }

    pub fn costing(&self) -> &Arc<C> {
        &self.costing
    }

    /// Finds the least-cost path between two nodes of the network.
    ///
    /// Returns `None` when either node is not part of the network,
    /// or the target cannot be reached from the source.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), level = Level::DEBUG))]
    pub fn path(&self, from: &NodeId, to: &NodeId) -> Option<Path> {
        let graph = &self.network.graph;
        let start = self.network.node_index(from)?;
        let target = self.network.node_index(to)?;
        let destination = graph[target].position;
        let weights = &self.weights;

        let reached = AStar.search(
            start,
            target,
            move |node| {
                graph
                    .edges_directed(node, Direction::Outgoing)
                    .map(move |edge| (edge.target(), edge.id(), weights[edge.id().index()]))
            },
            |node| Euclidean.distance(graph[node].position, destination) * self.cost_per_unit,
        );

        let Some(reached) = reached else {
            debug!("No path from {from} to {to}");
            return None;
        };

        Some(Path {
            nodes: reached
                .nodes
                .iter()
                .map(|node| graph[*node].id.clone())
                .collect(),
            links: reached
                .edges
                .iter()
                .map(|edge| graph[*edge].clone())
                .collect(),
            travel_cost: reached.total_cost.cost,
            travel_time: reached.total_cost.time,
        })
    }
}
