use crate::config::MappingConfig;
use crate::id::{LineId, NodeId, RouteId};
use crate::network::Network;
use crate::route::costing::minimal_travel_cost;
use crate::route::primitives::{BundleCache, BundleContext};
use crate::route::{Path, RouterBundle};
use crate::router::{
    network_modes, RouteAssignment, RouteAssignments, RouterError, ScheduleRouters,
};
use crate::schedule::{LinkCandidate, TransitRouteStop, TransitSchedule};

use log::info;
use measure_time::info_time;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Routes every transit route over the network of its modes, unbiased.
///
/// Routes whose transport modes resolve to the same network modes share
/// one bundle. No route is artificial.
pub struct ModeScheduleRouters {
    config: MappingConfig,
    schedule: Arc<TransitSchedule>,
    network: Arc<Network>,

    bundles: BundleCache<BTreeSet<String>>,
    assignments: RouteAssignments,
    loaded: bool,
}

impl ModeScheduleRouters {
    pub fn new(
        config: MappingConfig,
        schedule: Arc<TransitSchedule>,
        network: Arc<Network>,
    ) -> crate::Result<Self> {
        config.validate()?;

        Ok(Self {
            config,
            schedule,
            network,
            bundles: BundleCache::default(),
            assignments: RouteAssignments::default(),
            loaded: false,
        })
    }

    pub fn bundle(&self, line: &LineId, route: &RouteId) -> Option<&Arc<RouterBundle>> {
        self.assignments.bundle(line, route)
    }

    pub fn bundle_builds(&self) -> usize {
        self.bundles.metadata().builds
    }
}

impl ScheduleRouters for ModeScheduleRouters {
    fn load(&mut self) -> Result<(), RouterError> {
        if self.loaded {
            return Err(RouterError::AlreadyLoaded);
        }

        info_time!("Loading mode routers");

        for (line, route) in self.schedule.routes() {
            let modes = network_modes(&self.config, &route.transport_mode);
            let context = BundleContext {
                network: &self.network,
                config: &self.config,
                modes: &modes,
                shape: None,
            };

            let bundle = self.bundles.query(&context, modes.clone().into_owned());
            self.assignments.insert(
                line.id.clone(),
                route.id.clone(),
                RouteAssignment::Routed(bundle),
            );
        }

        info!(
            "Assigned {} routes to {} mode bundles",
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
