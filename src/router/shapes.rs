use crate::config::MappingConfig;
use crate::id::{LineId, NodeId, RouteId, ShapeId};
use crate::network::Network;
use crate::route::costing::minimal_travel_cost;
use crate::route::primitives::{BundleCache, BundleContext};
use crate::route::{Path, RouterBundle};
use crate::router::{
    network_modes, RouteAssignment, RouteAssignments, RouterError, ScheduleRouters,
};
use crate::schedule::{LinkCandidate, RouteShape, TransitRouteStop, TransitSchedule};

use log::{debug, info, warn};
use measure_time::info_time;
use rustc_hash::FxHashMap;
use std::sync::Arc;
#[cfg(feature = "tracing")]
use tracing::Level;

/// Routes every transit route along its shape.
///
/// Each distinct shape gets its own bundle: the network filtered to the
/// modes of the first route using the shape, cut to the configured buffer
/// around it, and searched under a [`ShapeCost`] bound to it. Routes
/// sharing a shape share the bundle.
///
/// [`ShapeCost`]: crate::route::costing::ShapeCost
pub struct ShapeScheduleRouters {
    config: MappingConfig,
    schedule: Arc<TransitSchedule>,
    network: Arc<Network>,
    shapes: FxHashMap<ShapeId, Arc<RouteShape>>,

    bundles: BundleCache<ShapeId>,
    assignments: RouteAssignments,
    loaded: bool,
}

impl ShapeScheduleRouters {
    /// Creates the routers, rejecting configurations the shape
    /// costing is undefined for.
    pub fn new<I>(
        config: MappingConfig,
        schedule: Arc<TransitSchedule>,
        network: Arc<Network>,
        shapes: I,
    ) -> crate::Result<Self>
    where
        I: IntoIterator<Item = RouteShape>,
    {
        config.validate()?;

        let shapes = shapes
            .into_iter()
            .map(|shape| (shape.id.clone(), Arc::new(shape)))
            .collect();

        Ok(Self {
            config,
            schedule,
            network,
            shapes,
            bundles: BundleCache::default(),
            assignments: RouteAssignments::default(),
            loaded: false,
        })
    }

    pub fn config(&self) -> &MappingConfig {
        &self.config
    }

    /// The bundle a route was assigned, if any.
    pub fn bundle(&self, line: &LineId, route: &RouteId) -> Option<&Arc<RouterBundle>> {
        self.assignments.bundle(line, route)
    }

    /// The bundle built for a shape, if any route used it.
    pub fn shape_bundle(&self, shape: &ShapeId) -> Option<&Arc<RouterBundle>> {
        self.bundles.get(shape)
    }

    /// The number of bundles constructed while loading.
    pub fn bundle_builds(&self) -> usize {
        self.bundles.metadata().builds
    }
}

impl ScheduleRouters for ShapeScheduleRouters {
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, level = Level::INFO))]
    fn load(&mut self) -> Result<(), RouterError> {
        if self.loaded {
            return Err(RouterError::AlreadyLoaded);
        }

        info_time!("Loading shape routers");
        info!(
            "Loading routers for {} routes over {} shapes",
            self.schedule.route_count(),
            self.shapes.len()
        );

        for (line, route) in self.schedule.routes() {
            let shape = route
                .shape_id
                .as_ref()
                .and_then(|shape_id| self.shapes.get(shape_id));

            let assignment = match shape {
                None => {
                    warn!(
                        "No shape available for route {} of line {}. It will be mapped artificially!",
                        route.id, line.id
                    );
                    RouteAssignment::Artificial
                }
                Some(shape) => {
                    let modes = network_modes(&self.config, &route.transport_mode);
                    let context = BundleContext {
                        network: &self.network,
                        config: &self.config,
                        modes: &modes,
                        shape: Some(shape),
                    };

                    RouteAssignment::Routed(self.bundles.query(&context, shape.id.clone()))
                }
            };

            self.assignments
                .insert(line.id.clone(), route.id.clone(), assignment);
        }

        debug!(
            "Assigned {} routes to {} shape bundles",
            self.assignments.len(),
            self.bundles.len()
        );

        self.loaded = true;
        Ok(())
    }

    fn least_cost_path(
        &self,
        from: &NodeId,
        to: &NodeId,
        line: &LineId,
        route: &RouteId,
    ) -> Option<Path> {
        self.assignments.bundle(line, route)?.path(from, to)
    }

    fn minimal_travel_cost(
        &self,
        from: &TransitRouteStop,
        to: &TransitRouteStop,
        _line: &LineId,
        _route: &RouteId,
    ) -> f64 {
        minimal_travel_cost(from, to, self.config.travel_cost_type)
    }

    fn link_candidate_travel_cost(
        &self,
        line: &LineId,
        route: &RouteId,
        candidate: &LinkCandidate,
    ) -> Option<f64> {
        self.assignments
            .bundle(line, route)
            .map(|bundle| bundle.link_cost(candidate))
    }

    fn is_artificial(&self, line: &LineId, route: &RouteId) -> Option<bool> {
        self.assignments
            .get(line, route)
            .map(RouteAssignment::is_artificial)
    }
}
