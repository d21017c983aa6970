use crate::config::MappingConfig;
use crate::id::NodeId;
use crate::network::Network;
use crate::route::costing::{ShapeCost, TravelCost};
use crate::route::{Path, PathCalculator};
use crate::schedule::{LinkCandidate, RouteShape};

use log::debug;
use std::collections::BTreeSet;
use std::sync::Arc;

/// The filtered network, costing and path calculator shared by every
/// route mapped onto the same key.
#[derive(Debug)]
pub struct RouterBundle {
    pub network: Arc<Network>,
    pub costing: Arc<ShapeCost>,
    pub calculator: PathCalculator<ShapeCost>,
}

impl RouterBundle {
    /// Reduces the network to the given modes and, when a shape is given,
    /// to the configured buffer around it, then binds costing and search
    /// to the result.
    pub fn build(
        network: &Network,
        modes: &BTreeSet<String>,
        shape: Option<&Arc<RouteShape>>,
        config: &MappingConfig,
    ) -> Self {
        let filtered = network.filter_by_modes(modes);

        let (network, costing) = match shape {
            Some(shape) => (
                filtered.clip_to_shape(shape, config.cut_buffer()),
                ShapeCost::new(
                    Arc::clone(shape),
                    config.travel_cost_type,
                    config.max_weight_distance,
                ),
            ),
            None => (filtered, ShapeCost::unbiased(config.travel_cost_type)),
        };

        debug!("Built bundle over {network:?}");

        let network = Arc::new(network);
        let costing = Arc::new(costing);
        let calculator = PathCalculator::new(Arc::clone(&network), Arc::clone(&costing));

        Self {
            network,
            costing,
            calculator,
        }
    }

    /// Finds the least-cost path within the bundle's network.
    #[inline]
    pub fn path(&self, from: &NodeId, to: &NodeId) -> Option<Path> {
        self.calculator.path(from, to)
    }

    /// The disutility of a candidate's link under the bundle's costing.
    #[inline]
    pub fn link_cost(&self, candidate: &LinkCandidate) -> f64 {
        self.costing.disutility(&candidate.link, &candidate.geometry)
    }
}
