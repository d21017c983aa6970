use crate::network::Network;
use crate::schedule::RouteShape;

use geo::{Coord, Distance, Euclidean, Point};
use log::debug;
use petgraph::graph::NodeIndex;
use rstar::primitives::GeomWithData;
use rstar::{RTree, AABB};
use rustc_hash::FxHashSet;

type IndexedPosition = GeomWithData<Point, NodeIndex>;

impl Network {
    /// Collects every node whose planar distance to the shape polyline
    /// is at most `radius`.
    pub fn nodes_within_buffer(&self, shape: &RouteShape, radius: f64) -> FxHashSet<NodeIndex> {
        let tree = RTree::bulk_load(
            self.graph
                .node_indices()
                .map(|index| IndexedPosition::new(self.graph[index].position, index))
                .collect(),
        );

        shape
            .segments()
            .flat_map(|segment| {
                let (min, max) = (
                    Coord {
                        x: segment.start.x.min(segment.end.x) - radius,
                        y: segment.start.y.min(segment.end.y) - radius,
                    },
                    Coord {
                        x: segment.start.x.max(segment.end.x) + radius,
                        y: segment.start.y.max(segment.end.y) + radius,
                    },
                );

                let envelope = AABB::from_corners(Point(min), Point(max));

                // The envelope over-approximates the buffer around the
                // segment, so every hit is confirmed on exact distance.
                tree.locate_in_envelope(&envelope)
                    .filter(move |entry| Euclidean.distance(entry.geom(), &segment) <= radius)
                    .map(|entry| entry.data)
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    /// Cuts the network down to the nodes within `radius` of the shape.
    ///
    /// Links survive only if both of their endpoints do. Anything outside
    /// the buffer is unreachable afterwards, no matter how cheap.
    pub fn clip_to_shape(&self, shape: &RouteShape, radius: f64) -> Network {
        let within = self.nodes_within_buffer(shape, radius);
        let clipped = self.retain(|index, _| within.contains(&index), |_, _| true);

        debug!(
            "Buffer of {radius} around shape {} kept {} of {} nodes",
            shape.id,
            clipped.node_count(),
            self.node_count()
        );

        clipped
    }
}
