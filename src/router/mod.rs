//! Routers answering least-cost queries on behalf of the mapping
//! pipeline, per (line, route) of a schedule.
//!
//! Two routers implement [`ScheduleRouters`]:
//!
//! - [`ShapeScheduleRouters`]
//!     Builds one bundle per route shape, cut to a buffer around the
//!     shape and biased towards it. Routes without a shape are flagged
//!     artificial and have no bundle.
//!
//! - [`ModeScheduleRouters`]
//!     Builds one unbiased bundle per distinct set of network modes.
//!
//! Both must be [loaded](ScheduleRouters::load) before any query is made.

pub mod shapes;
pub mod standard;

#[doc(inline)]
pub use shapes::ShapeScheduleRouters;
#[doc(inline)]
pub use standard::ModeScheduleRouters;

use crate::config::MappingConfig;
use crate::id::{LineId, NodeId, RouteId};
use crate::route::{Path, RouterBundle};
use crate::schedule::{LinkCandidate, TransitRouteStop};

use log::warn;
use rustc_hash::FxHashMap;
use std::borrow::Cow;
use std::collections::BTreeSet;
use std::sync::Arc;

#[derive(thiserror::Error, Debug)]
pub enum RouterError {
    #[error("routers were already loaded")]
    AlreadyLoaded,
}

pub trait ScheduleRouters {
    /// Resolves the bundle of every route of the schedule, building
    /// each distinct bundle once. Must complete before any query.
    fn load(&mut self) -> Result<(), RouterError>;

    /// The least-cost path between two nodes, for the given route.
    ///
    /// `None` when the route has no bundle, either node is not part of
    /// the route's network, or no path exists.
    fn least_cost_path(
        &self,
        from: &NodeId,
        to: &NodeId,
        line: &LineId,
        route: &RouteId,
    ) -> Option<Path>;

    /// The least-cost path from the end of one candidate link
    /// to the start of another.
    fn least_cost_path_between(
        &self,
        from: &LinkCandidate,
        to: &LinkCandidate,
        line: &LineId,
        route: &RouteId,
    ) -> Option<Path> {
        self.least_cost_path(from.to_node(), to.from_node(), line, route)
    }

    /// A cheap lower bound on the cost between two stops of the route.
    fn minimal_travel_cost(
        &self,
        from: &TransitRouteStop,
        to: &TransitRouteStop,
        line: &LineId,
        route: &RouteId,
    ) -> f64;

    /// The route's disutility of a single candidate link.
    fn link_candidate_travel_cost(
        &self,
        line: &LineId,
        route: &RouteId,
        candidate: &LinkCandidate,
    ) -> Option<f64>;

    /// Whether the route must be mapped without a path search.
    /// `None` for routes which were not loaded.
    fn is_artificial(&self, line: &LineId, route: &RouteId) -> Option<bool>;
}

/// How a route of the schedule is routed.
#[derive(Debug, Clone)]
pub enum RouteAssignment {
    /// No shape is available, paths cannot be searched.
    Artificial,
    Routed(Arc<RouterBundle>),
}

impl RouteAssignment {
    pub fn bundle(&self) -> Option<&Arc<RouterBundle>> {
        match self {
            RouteAssignment::Artificial => None,
            RouteAssignment::Routed(bundle) => Some(bundle),
        }
    }

    pub fn is_artificial(&self) -> bool {
        matches!(self, RouteAssignment::Artificial)
    }
}

/// Route assignments, keyed by line and then route.
#[derive(Debug, Default)]
pub struct RouteAssignments {
    lines: FxHashMap<LineId, FxHashMap<RouteId, RouteAssignment>>,
}

impl RouteAssignments {
    pub fn insert(&mut self, line: LineId, route: RouteId, assignment: RouteAssignment) {
        self.lines.entry(line).or_default().insert(route, assignment);
    }

    pub fn get(&self, line: &LineId, route: &RouteId) -> Option<&RouteAssignment> {
        self.lines.get(line)?.get(route)
    }

    #[inline]
    pub fn bundle(&self, line: &LineId, route: &RouteId) -> Option<&Arc<RouterBundle>> {
        self.get(line, route)?.bundle()
    }

    pub fn len(&self) -> usize {
        self.lines.values().map(FxHashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The network modes a schedule transport mode may use. Unassigned
/// modes may use nothing, leaving their routes with an empty network.
pub(crate) fn network_modes<'a>(
    config: &'a MappingConfig,
    transport_mode: &str,
) -> Cow<'a, BTreeSet<String>> {
    match config.network_modes(transport_mode) {
        Some(modes) => Cow::Borrowed(modes),
        None => {
            warn!("No network modes assigned to transport mode {transport_mode}");
            Cow::Owned(BTreeSet::new())
        }
    }
}

#[cfg(test)]
mod test;
